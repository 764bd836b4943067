use super::classification::{classification_scores, Averaging};
use super::curves::{pr_curve, roc_auc, roc_curve};
use super::metrics::{Auc, ClassificationMetrics, MetricsResult, PrPoints, RocPoints};
use crate::config::{EvalMode, EvaluatorConfig};
use crate::data_loading::{Cell, DataLoaderFactory, RawTable, TableRole};
use crate::error::{EvalError, Result};
use crate::processing::{coerce_binary_labels, encode_label_pair, ColumnRole, ColumnRoleDetector};
use std::collections::HashMap;
use std::path::Path;

const UNRESOLVED_MESSAGE: &str = "Prediction file must have either a probability column or a predicted label column (label_pred/label/probability/score)";

/// Riadok po spojení ground truth a predikcií cez id.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub id: String,
    pub truth: Cell,
    pub predicted: Cell,
}

/// Inner join cez id v poradí ground truth; opakované id sa rozmnoží.
///
/// Riadky bez id sa nespájajú.
pub fn join_on_id(truth: &[(Cell, Cell)], predicted: &[(Cell, Cell)]) -> Vec<JoinedRow> {
    let mut by_id: HashMap<&str, Vec<&Cell>> = HashMap::new();
    for (id, value) in predicted {
        if let Some(id) = id {
            by_id.entry(id.as_str()).or_default().push(value);
        }
    }

    let mut joined = Vec::new();
    for (id, label) in truth {
        let Some(id) = id else { continue };
        if let Some(values) = by_id.get(id.as_str()) {
            for value in values {
                joined.push(JoinedRow {
                    id: id.clone(),
                    truth: label.clone(),
                    predicted: (*value).clone(),
                });
            }
        }
    }
    joined
}

/// Vyhodnocuje submisie voči ground truth.
///
/// Evaluátor nemá stav medzi volaniami; jednu inštanciu možno zdieľať medzi vláknami.
pub struct SubmissionEvaluator {
    config: EvaluatorConfig,
}

impl SubmissionEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Vyhodnotí dvojicu súborov podľa režimu z konfigurácie.
    ///
    /// Chýbajúci súbor je chyba v oboch režimoch. V tolerantnom režime sa
    /// ostatné chyby vstupu nahradia [`MetricsResult::zeroed`].
    pub fn evaluate(
        &self,
        ground_truth_path: impl AsRef<Path>,
        predictions_path: impl AsRef<Path>,
    ) -> Result<MetricsResult> {
        self.config.validate()?;

        let outcome = self.score_paths(ground_truth_path.as_ref(), predictions_path.as_ref());
        match (outcome, self.config.mode) {
            (Err(e), EvalMode::Tolerant) if e.is_recoverable() => {
                log::warn!("tolerant evaluation degraded to zeroed metrics: {}", e);
                Ok(MetricsResult::zeroed())
            }
            (outcome, _) => outcome,
        }
    }

    /// Odľahčené klasifikačné skórovanie: vždy tolerantné, bez kriviek.
    pub fn compute_classification_metrics(
        &self,
        ground_truth_path: impl AsRef<Path>,
        predictions_path: impl AsRef<Path>,
    ) -> Result<ClassificationMetrics> {
        let evaluator = SubmissionEvaluator::new(
            self.config
                .clone()
                .with_mode(EvalMode::Tolerant)
                .with_curves(false),
        );
        let result = evaluator.evaluate(ground_truth_path, predictions_path)?;
        Ok(ClassificationMetrics::from(&result))
    }

    /// Oba súbory sa prečítajú skôr, než sa parsujú, takže chýbajúci súbor
    /// má prednosť pred chybou formátu.
    fn score_paths(&self, ground_truth_path: &Path, predictions_path: &Path) -> Result<MetricsResult> {
        let truth_text = DataLoaderFactory::read_source(ground_truth_path)?;
        let predictions_text = DataLoaderFactory::read_source(predictions_path)?;

        let truth = DataLoaderFactory::load_with_fallback(&truth_text, TableRole::GroundTruth)?;
        let predictions =
            DataLoaderFactory::load_with_fallback(&predictions_text, TableRole::Predictions)?;
        self.evaluate_tables(&truth, &predictions)
    }

    /// Jadro vyhodnotenia nad načítanými tabuľkami; chyby sa vždy propagujú.
    pub fn evaluate_tables(&self, truth: &RawTable, predictions: &RawTable) -> Result<MetricsResult> {
        let truth_pairs = truth
            .pairs("id", "label")
            .ok_or_else(|| EvalError::schema(TableRole::GroundTruth.schema_message()))?;

        let detected = ColumnRoleDetector::detect(&predictions.headers);
        let values = detected
            .column_name()
            .and_then(|name| predictions.column(name));
        let role = match values {
            Some(values) => ColumnRoleDetector::refine(detected, &predictions.headers, &values),
            None => detected,
        };
        let column = match &role {
            ColumnRole::ScoreColumn(name) | ColumnRole::LabelColumn(name) => name.clone(),
            ColumnRole::Unresolved => return Err(EvalError::schema(UNRESOLVED_MESSAGE)),
        };
        let prediction_pairs = predictions
            .pairs("id", &column)
            .ok_or_else(|| EvalError::schema(TableRole::Predictions.schema_message()))?;

        let joined = join_on_id(&truth_pairs, &prediction_pairs);
        if joined.is_empty() {
            log::warn!("no matching ids between ground truth and predictions");
            return Err(EvalError::EmptyJoin);
        }
        log::debug!("evaluating {} joined rows using {}", joined.len(), role);

        let result = if role.is_score() {
            self.score_based(&joined, &column)?
        } else {
            label_based(&joined)
        };

        if let Auc::Value(v) = result.auc {
            if v <= 0.0 {
                log::warn!("computed ROC AUC <= 0 (value={})", v);
            }
        }
        log::debug!(
            "result: auc={} f1={:.4} acc={:.4} n_samples={}",
            result.auc,
            result.f1,
            result.accuracy,
            result.n_samples
        );
        Ok(result)
    }

    fn score_based(&self, joined: &[JoinedRow], column: &str) -> Result<MetricsResult> {
        let scores = parse_scores(joined, column)?;
        let truth: Vec<Cell> = joined.iter().map(|r| r.truth.clone()).collect();
        let labels = coerce_binary_labels(&truth, &scores)?;

        let hard: Vec<i64> = scores
            .iter()
            .map(|&s| i64::from(s >= self.config.threshold))
            .collect();
        let scored = classification_scores(&labels.codes, &hard, Averaging::Binary { positive: 1 });

        let auc = match roc_auc(&labels.codes, &scores) {
            Ok(v) => Auc::Value(v),
            Err(e) => {
                log::warn!("failed to compute ROC AUC ({}), reporting not applicable", e);
                Auc::NotApplicable
            }
        };

        let (roc, pr) = if self.config.return_curves {
            let roc = roc_curve(&labels.codes, &scores)
                .ok()
                .map(|c| RocPoints { fpr: c.fpr, tpr: c.tpr });
            let pr = pr_curve(&labels.codes, &scores).ok().map(|c| PrPoints {
                precision: c.precision,
                recall: c.recall,
            });
            (roc, pr)
        } else {
            (None, None)
        };

        Ok(MetricsResult {
            auc,
            precision: scored.precision,
            recall: scored.recall,
            f1: scored.f1,
            accuracy: scored.accuracy,
            n_samples: joined.len(),
            roc,
            pr,
        })
    }
}

impl Default for SubmissionEvaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

/// Diskrétne predikcie: bez AUC, priemerovanie podľa počtu tried.
fn label_based(joined: &[JoinedRow]) -> MetricsResult {
    let truth: Vec<Cell> = joined.iter().map(|r| r.truth.clone()).collect();
    let predicted: Vec<Cell> = joined.iter().map(|r| r.predicted.clone()).collect();
    let (y_true, y_pred) = encode_label_pair(&truth, &predicted);

    let averaging = Averaging::for_labels(&y_true);
    let scored = classification_scores(&y_true, &y_pred, averaging);

    MetricsResult {
        auc: Auc::NotApplicable,
        precision: scored.precision,
        recall: scored.recall,
        f1: scored.f1,
        accuracy: scored.accuracy,
        n_samples: joined.len(),
        roc: None,
        pr: None,
    }
}

/// Chýbajúce skóre je NaN; text, ktorý nie je číslo, je chyba.
fn parse_scores(joined: &[JoinedRow], column: &str) -> Result<Vec<f64>> {
    joined
        .iter()
        .map(|row| match row.predicted.as_deref() {
            None => Ok(f64::NAN),
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                EvalError::parse(format!(
                    "Score column '{}' contains non-numeric value '{}'",
                    column, raw
                ))
            }),
        })
        .collect()
}

/// Striktné vyhodnotenie s krivkami (hlavný evaluačný endpoint).
pub fn evaluate(
    ground_truth_path: impl AsRef<Path>,
    predictions_path: impl AsRef<Path>,
) -> Result<MetricsResult> {
    SubmissionEvaluator::new(EvaluatorConfig::strict()).evaluate(ground_truth_path, predictions_path)
}

/// Tolerantné klasifikačné skórovanie; chyba iba pri chýbajúcom súbore.
pub fn compute_classification_metrics(
    ground_truth_path: impl AsRef<Path>,
    predictions_path: impl AsRef<Path>,
) -> Result<ClassificationMetrics> {
    SubmissionEvaluator::new(EvaluatorConfig::tolerant())
        .compute_classification_metrics(ground_truth_path, predictions_path)
}
