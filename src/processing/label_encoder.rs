use crate::data_loading::Cell;
use crate::error::{EvalError, Result};
use std::collections::BTreeMap;

/// Kód pre hodnotu, ktorá nie je v mape tried.
pub const UNKNOWN_CODE: i64 = -1;

/// Textová podoba chýbajúcej hodnoty pri enkódovaní reťazcov.
const NULL_TEXT: &str = "nan";

/// Parsuje celočíselný kód triedy; akceptuje aj `1.0`.
pub fn parse_class_code(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Some(v as i64),
        _ => None,
    }
}

/// Celočíselné kódy celého stĺpca; `None` ak niektorá hodnota chýba alebo nie je číslo.
pub fn parse_class_codes(values: &[Cell]) -> Option<Vec<i64>> {
    values
        .iter()
        .map(|v| v.as_deref().and_then(parse_class_code))
        .collect()
}

/// Label Encoder - mapuje textové triedy na čísla (0, 1, 2, ...)
///
/// Triedy sa zoradia, takže mapa nezávisí od poradia riadkov.
pub struct LabelEncoder {
    mapping: Option<BTreeMap<String, i64>>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self { mapping: None }
    }

    pub fn fit<S: AsRef<str>>(&mut self, values: &[S]) {
        let mut mapping: BTreeMap<String, i64> = values
            .iter()
            .map(|v| (v.as_ref().to_string(), 0))
            .collect();
        for (code, slot) in mapping.values_mut().enumerate() {
            *slot = code as i64;
        }
        self.mapping = Some(mapping);
    }

    /// Neznáme hodnoty (alebo nenafitovaný encoder) dostanú [`UNKNOWN_CODE`].
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> Vec<i64> {
        values
            .iter()
            .map(|v| {
                self.mapping
                    .as_ref()
                    .and_then(|m| m.get(v.as_ref()).copied())
                    .unwrap_or(UNKNOWN_CODE)
            })
            .collect()
    }

    pub fn classes(&self) -> Vec<&str> {
        self.mapping
            .as_ref()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl Default for LabelEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Binárne kódy ground truth pre cestu so skóre.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLabels {
    /// Hodnoty 0/1, pozitívna trieda je 1.
    pub codes: Vec<i64>,
    /// Počet rôznych tried v ground truth.
    pub distinct: usize,
}

/// Prevedie ground truth na {0, 1} pre metriky nad skóre.
///
/// Celočíselné triedy sa použijú priamo (pri dvoch triedach je pozitívna
/// väčšia). Textové triedy: jedna trieda -> 0, dve triedy -> pozitívna je
/// tá s vyšším priemerným skóre, viac tried je chyba.
pub fn coerce_binary_labels(labels: &[Cell], scores: &[f64]) -> Result<BinaryLabels> {
    if let Some(codes) = parse_class_codes(labels) {
        let mut distinct: Vec<i64> = codes.clone();
        distinct.sort_unstable();
        distinct.dedup();
        return match distinct.len() {
            0 => Err(EvalError::schema("Ground truth label column is empty")),
            1 => Ok(BinaryLabels {
                codes: codes.iter().map(|&c| i64::from(c == 1)).collect(),
                distinct: 1,
            }),
            2 => {
                let positive = distinct[1];
                Ok(BinaryLabels {
                    codes: codes.iter().map(|&c| i64::from(c == positive)).collect(),
                    distinct: 2,
                })
            }
            n => Err(EvalError::ClassCardinality { classes: n }),
        };
    }

    let mut unique: Vec<&str> = Vec::new();
    for label in labels.iter().flatten() {
        if !unique.contains(&label.as_str()) {
            unique.push(label);
        }
    }

    match unique.len() {
        0 => Err(EvalError::schema("Ground truth label column is empty")),
        1 => Ok(BinaryLabels {
            codes: vec![0; labels.len()],
            distinct: 1,
        }),
        2 => {
            let positive = positive_by_mean_score(labels, scores, &unique)?;
            let codes = labels
                .iter()
                .map(|l| i64::from(l.as_deref() == Some(positive)))
                .collect();
            Ok(BinaryLabels { codes, distinct: 2 })
        }
        n => Err(EvalError::ClassCardinality { classes: n }),
    }
}

/// Trieda s najvyšším priemerným skóre; pri zhode vyhráva skorší výskyt.
fn positive_by_mean_score<'a>(labels: &[Cell], scores: &[f64], unique: &[&'a str]) -> Result<&'a str> {
    let mut sums = vec![(0.0f64, 0usize); unique.len()];
    for (label, score) in labels.iter().zip(scores) {
        let (Some(label), true) = (label.as_deref(), score.is_finite()) else {
            continue;
        };
        if let Some(idx) = unique.iter().position(|u| *u == label) {
            sums[idx].0 += score;
            sums[idx].1 += 1;
        }
    }

    if sums.iter().all(|(_, n)| *n == 0) {
        return Err(EvalError::schema(
            "Score column contains no numeric data for label mapping",
        ));
    }

    let means: Vec<f64> = sums
        .iter()
        .map(|(sum, n)| if *n == 0 { f64::NEG_INFINITY } else { sum / *n as f64 })
        .collect();

    let mut best = 0;
    for (idx, mean) in means.iter().enumerate().skip(1) {
        if *mean > means[best] {
            best = idx;
        }
    }
    Ok(unique[best])
}

/// Spoločné kódy pre porovnanie diskrétnych predikcií s ground truth.
///
/// Ak sú obe strany celočíselné, kódy sa použijú priamo; inak sa triedy
/// ground truth zoradia a očíslujú a tá istá mapa sa použije na predikcie.
pub fn encode_label_pair(truth: &[Cell], predicted: &[Cell]) -> (Vec<i64>, Vec<i64>) {
    if let (Some(t), Some(p)) = (parse_class_codes(truth), parse_class_codes(predicted)) {
        return (t, p);
    }

    let as_text = |values: &[Cell]| -> Vec<String> {
        values
            .iter()
            .map(|v| v.clone().unwrap_or_else(|| NULL_TEXT.to_string()))
            .collect()
    };
    let truth_text = as_text(truth);
    let predicted_text = as_text(predicted);

    let mut encoder = LabelEncoder::new();
    encoder.fit(&truth_text);
    (encoder.transform(&truth_text), encoder.transform(&predicted_text))
}
