use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Textová značka "AUC nie je k dispozícii" v uloženom JSON.
pub const NOT_APPLICABLE: &str = "-";

/// ROC-AUC alebo explicitné "nie je k dispozícii".
///
/// Nikdy sa nezamieňa s nulou: leaderboard musí odlíšiť chýbajúce AUC od nulového.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Auc {
    Value(f64),
    #[default]
    NotApplicable,
}

impl Auc {
    pub fn value(&self) -> Option<f64> {
        match self {
            Auc::Value(v) => Some(*v),
            Auc::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Auc::Value(_))
    }
}

impl fmt::Display for Auc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auc::Value(v) => write!(f, "{:.4}", v),
            Auc::NotApplicable => write!(f, "{}", NOT_APPLICABLE),
        }
    }
}

impl Serialize for Auc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Auc::Value(v) => serializer.serialize_f64(*v),
            Auc::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Auc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(v)) => Ok(Auc::Value(v)),
            Some(Raw::Text(s)) if s == NOT_APPLICABLE => Ok(Auc::NotApplicable),
            Some(Raw::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Auc::Value)
                .map_err(|_| serde::de::Error::custom(format!("invalid auc value '{}'", s))),
            None => Ok(Auc::NotApplicable),
        }
    }
}

/// Body ROC krivky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocPoints {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
}

/// Body precision-recall krivky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrPoints {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
}

/// Výsledok vyhodnotenia submisie, tak ako sa ukladá k submisii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub auc: Auc,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    #[serde(rename = "acc")]
    pub accuracy: f64,
    pub n_samples: usize,
    #[serde(rename = "ROC", default, skip_serializing_if = "Option::is_none")]
    pub roc: Option<RocPoints>,
    #[serde(rename = "PR", default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<PrPoints>,
}

impl MetricsResult {
    /// Nulový výsledok tolerantného režimu.
    pub fn zeroed() -> Self {
        Self {
            auc: Auc::NotApplicable,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            accuracy: 0.0,
            n_samples: 0,
            roc: None,
            pr: None,
        }
    }

    /// Hodnota metriky pre zoradenie; `None` ak AUC nie je k dispozícii.
    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Auc => self.auc.value(),
            MetricKey::F1 => Some(self.f1),
            MetricKey::Acc => Some(self.accuracy),
            MetricKey::Precision => Some(self.precision),
            MetricKey::Recall => Some(self.recall),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Odľahčený výsledok klasifikačného skórovania.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub acc: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub auc: Auc,
}

impl ClassificationMetrics {
    pub fn zeroed() -> Self {
        Self::from(&MetricsResult::zeroed())
    }
}

impl From<&MetricsResult> for ClassificationMetrics {
    fn from(result: &MetricsResult) -> Self {
        Self {
            acc: result.accuracy,
            precision: result.precision,
            recall: result.recall,
            f1: result.f1,
            auc: result.auc,
        }
    }
}

/// Metrika, podľa ktorej sa zoraďuje leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetricKey {
    #[default]
    Auc,
    F1,
    Acc,
    Precision,
    Recall,
}

impl MetricKey {
    /// Neznámy názov padá na AUC.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "f1" => MetricKey::F1,
            "acc" | "accuracy" => MetricKey::Acc,
            "precision" => MetricKey::Precision,
            "recall" => MetricKey::Recall,
            _ => MetricKey::Auc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Auc => "AUC",
            MetricKey::F1 => "F1",
            MetricKey::Acc => "ACC",
            MetricKey::Precision => "PRECISION",
            MetricKey::Recall => "RECALL",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prečíta metriku z uloženého JSON výsledku.
///
/// Skúša kľúč tak ako je, veľkými, malými písmenami a s veľkým začiatočným
/// písmenom. Rozhoduje prvý kľúč s hodnotou inou ako null, aj keď nie je číslo.
pub fn metric_from_score_json(score: &Value, key: MetricKey) -> Option<f64> {
    let obj = score.as_object()?;
    let name = key.as_str();
    let lower = name.to_lowercase();
    let capitalized = format!("{}{}", &name[..1], &lower[1..]);

    let candidates = [name.to_string(), name.to_uppercase(), lower, capitalized];
    let value = candidates
        .iter()
        .filter_map(|k| obj.get(k))
        .find(|v| !v.is_null())?;

    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
