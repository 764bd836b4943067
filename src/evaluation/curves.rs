//! ROC a precision-recall krivky nad spojitým skóre.
//!
//! Body kriviek zodpovedajú rozdielnym hodnotám skóre zoradeným zostupne;
//! zhody skóre tvoria jeden bod, takže AUC započíta zhodu ako polovicu.

use std::cmp::Ordering;
use thiserror::Error;

/// Prečo sa krivku (alebo AUC) nepodarilo spočítať.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("no samples")]
    Empty,

    #[error("labels length {labels} != scores length {scores}")]
    LengthMismatch { labels: usize, scores: usize },

    #[error("score at row {row} is not a finite number")]
    NonFiniteScore { row: usize },

    /// Iba jedna trieda; ROC nie je definovaná.
    #[error("only one class present in labels")]
    SingleClass,

    #[error("no positive samples")]
    NoPositives,
}

/// Bod po bode ROC krivka.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    /// Prah pre každý bod; prvý bod (0, 0) má prah +inf.
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Plocha pod krivkou (lichobežníkové pravidlo).
    pub fn auc(&self) -> f64 {
        trapezoidal_auc(&self.fpr, &self.tpr)
    }
}

/// Precision-recall krivka od najvyššieho recallu po (precision=1, recall=0).
#[derive(Debug, Clone, PartialEq)]
pub struct PrCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    /// Prahy k bodom okrem posledného koncového bodu.
    pub thresholds: Vec<f64>,
}

/// Kumulatívne počty FP a TP na každom rozdielnom prahu.
struct ThresholdCounts {
    fps: Vec<f64>,
    tps: Vec<f64>,
    thresholds: Vec<f64>,
}

impl ThresholdCounts {
    fn total_positives(&self) -> f64 {
        self.tps.last().copied().unwrap_or(0.0)
    }

    fn total_negatives(&self) -> f64 {
        self.fps.last().copied().unwrap_or(0.0)
    }
}

fn threshold_counts(y_true: &[i64], scores: &[f64]) -> Result<ThresholdCounts, CurveError> {
    if y_true.len() != scores.len() {
        return Err(CurveError::LengthMismatch {
            labels: y_true.len(),
            scores: scores.len(),
        });
    }
    if scores.is_empty() {
        return Err(CurveError::Empty);
    }
    if let Some(row) = scores.iter().position(|s| !s.is_finite()) {
        return Err(CurveError::NonFiniteScore { row });
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut counts = ThresholdCounts {
        fps: Vec::new(),
        tps: Vec::new(),
        thresholds: Vec::new(),
    };
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < order.len() {
        let current = scores[order[i]];
        while i < order.len() && scores[order[i]] == current {
            if y_true[order[i]] == 1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        counts.fps.push(fp as f64);
        counts.tps.push(tp as f64);
        counts.thresholds.push(current);
    }
    Ok(counts)
}

/// ROC krivka pre binárne kódy (pozitívna trieda = 1).
///
/// Kolineárne medziľahlé body sa vynechajú; na ploche to nič nemení.
pub fn roc_curve(y_true: &[i64], scores: &[f64]) -> Result<RocCurve, CurveError> {
    let counts = threshold_counts(y_true, scores)?;
    let positives = counts.total_positives();
    let negatives = counts.total_negatives();
    if positives == 0.0 || negatives == 0.0 {
        return Err(CurveError::SingleClass);
    }

    let n = counts.fps.len();
    let keep: Vec<usize> = (0..n)
        .filter(|&i| {
            if i == 0 || i + 1 == n {
                return true;
            }
            let second_diff = |v: &[f64]| v[i + 1] - 2.0 * v[i] + v[i - 1];
            second_diff(&counts.fps) != 0.0 || second_diff(&counts.tps) != 0.0
        })
        .collect();

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];
    for i in keep {
        fpr.push(counts.fps[i] / negatives);
        tpr.push(counts.tps[i] / positives);
        thresholds.push(counts.thresholds[i]);
    }

    Ok(RocCurve { fpr, tpr, thresholds })
}

/// Precision-recall krivka pre binárne kódy (pozitívna trieda = 1).
pub fn pr_curve(y_true: &[i64], scores: &[f64]) -> Result<PrCurve, CurveError> {
    let counts = threshold_counts(y_true, scores)?;
    let positives = counts.total_positives();
    if positives == 0.0 {
        return Err(CurveError::NoPositives);
    }

    let mut precision: Vec<f64> = counts
        .tps
        .iter()
        .zip(&counts.fps)
        .map(|(tp, fp)| if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 })
        .collect();
    let mut recall: Vec<f64> = counts.tps.iter().map(|tp| tp / positives).collect();
    let mut thresholds = counts.thresholds;

    precision.reverse();
    recall.reverse();
    thresholds.reverse();
    precision.push(1.0);
    recall.push(0.0);

    Ok(PrCurve {
        precision,
        recall,
        thresholds,
    })
}

/// ROC-AUC pre binárne kódy.
pub fn roc_auc(y_true: &[i64], scores: &[f64]) -> Result<f64, CurveError> {
    Ok(roc_curve(y_true, scores)?.auc())
}

fn trapezoidal_auc(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[1] + ys[0]) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn perfect_ranking_has_unit_auc() {
        let auc = roc_auc(&[0, 1, 0, 1], &[0.1, 0.9, 0.2, 0.8]).unwrap();
        assert!(approx(auc, 1.0));
    }

    #[test]
    fn inverted_ranking_has_zero_auc() {
        let auc = roc_auc(&[1, 0], &[0.1, 0.9]).unwrap();
        assert!(approx(auc, 0.0));
    }

    #[test]
    fn ties_count_half() {
        let auc = roc_auc(&[0, 1], &[0.5, 0.5]).unwrap();
        assert!(approx(auc, 0.5));
    }

    #[test]
    fn mixed_ranking_matches_pair_count() {
        // 4 páry pozitív/negatív, 3 správne zoradené
        let auc = roc_auc(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8]).unwrap();
        assert!(approx(auc, 0.75));
    }

    #[test]
    fn roc_starts_at_origin_and_ends_at_one() {
        let roc = roc_curve(&[0, 0, 1, 1], &[0.1, 0.4, 0.35, 0.8]).unwrap();
        assert_eq!(roc.fpr, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
        assert_eq!(roc.tpr, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
        assert!(roc.thresholds[0].is_infinite());
    }

    #[test]
    fn collinear_points_are_dropped() {
        let roc = roc_curve(&[1, 1, 1, 0], &[0.9, 0.8, 0.7, 0.1]).unwrap();
        assert_eq!(roc.tpr, vec![0.0, 0.0 + 1.0 / 3.0, 1.0, 1.0]);
        assert_eq!(roc.fpr, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn single_class_has_no_roc() {
        assert_eq!(roc_auc(&[1, 1], &[0.2, 0.8]), Err(CurveError::SingleClass));
        assert_eq!(roc_auc(&[0, 0], &[0.2, 0.8]), Err(CurveError::SingleClass));
    }

    #[test]
    fn nan_score_is_rejected() {
        assert_eq!(
            roc_auc(&[0, 1], &[0.2, f64::NAN]),
            Err(CurveError::NonFiniteScore { row: 1 })
        );
    }

    #[test]
    fn pr_curve_ends_at_full_precision_zero_recall() {
        let pr = pr_curve(&[0, 1, 0, 1], &[0.1, 0.9, 0.2, 0.8]).unwrap();
        assert_eq!(pr.recall, vec![1.0, 1.0, 1.0, 0.5, 0.0]);
        assert_eq!(pr.precision, vec![0.5, 2.0 / 3.0, 1.0, 1.0, 1.0]);
        assert_eq!(pr.thresholds, vec![0.1, 0.2, 0.8, 0.9]);
    }

    #[test]
    fn pr_curve_needs_positives() {
        assert_eq!(pr_curve(&[0, 0], &[0.1, 0.2]), Err(CurveError::NoPositives));
    }
}
