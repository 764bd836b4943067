//! Diagnostika súboru s ground truth (iba čítanie, bez vyhodnotenia).

use crate::data_loading::{CsvDataLoader, DataLoader, DataLoaderFactory, RawTable};
use crate::error::{EvalError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Kľúč histogramu pre chýbajúci label.
const NULL_LABEL_KEY: &str = "nan";

/// Štatistiky ground truth súboru.
///
/// Pri neplatnej schéme sú vyplnené iba `columns`, `schema_valid` a `errors`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundTruthReport {
    pub columns: Vec<String>,
    pub schema_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_label: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_distribution: Option<BTreeMap<String, usize>>,
}

/// Prečíta ground truth štruktúrovanou stratégiou a vráti diagnostiku.
pub fn analyze_ground_truth(path: impl AsRef<Path>) -> Result<GroundTruthReport> {
    let data = DataLoaderFactory::read_source(path.as_ref())?;
    let table = CsvDataLoader::new()
        .load_from_string(&data)
        .map_err(EvalError::parse)?;
    Ok(analyze_table(&table))
}

/// Diagnostika nad už načítanou tabuľkou.
pub fn analyze_table(table: &RawTable) -> GroundTruthReport {
    let mut report = GroundTruthReport {
        columns: table.headers.clone(),
        schema_valid: true,
        errors: None,
        total_rows: None,
        null_id: None,
        null_label: None,
        duplicate_id: None,
        label_distribution: None,
    };

    let (ids, labels) = match (table.column("id"), table.column("label")) {
        (Some(ids), Some(labels)) => (ids, labels),
        (ids, labels) => {
            let mut errors = Vec::new();
            if ids.is_none() {
                errors.push("Missing 'id' column".to_string());
            }
            if labels.is_none() {
                errors.push("Missing 'label' column".to_string());
            }
            report.schema_valid = false;
            report.errors = Some(errors);
            return report;
        }
    };

    let mut seen: HashSet<Option<&str>> = HashSet::new();
    let duplicates = ids.iter().filter(|id| !seen.insert(**id)).count();

    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    for label in &labels {
        let key = label.unwrap_or(NULL_LABEL_KEY).to_string();
        *distribution.entry(key).or_insert(0) += 1;
    }

    report.total_rows = Some(table.num_rows());
    report.null_id = Some(count_null(&ids));
    report.null_label = Some(count_null(&labels));
    report.duplicate_id = Some(duplicates);
    report.label_distribution = Some(distribution);
    report
}

fn count_null(values: &[Option<&str>]) -> usize {
    values.iter().filter(|v| v.is_none()).count()
}
