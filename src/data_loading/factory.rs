use super::csv_data_loader::CsvDataLoader;
use super::data_loader::DataLoader;
use super::positional_loader::PositionalLoader;
use super::table::RawTable;
use crate::error::{EvalError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Úloha načítavaného súboru; určuje povinné stĺpce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    GroundTruth,
    Predictions,
}

impl TableRole {
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableRole::GroundTruth => &["id", "label"],
            TableRole::Predictions => &["id"],
        }
    }

    /// Povinné stĺpce, ktoré tabuľke chýbajú.
    pub fn missing_columns(&self, table: &RawTable) -> Vec<&'static str> {
        self.required_columns()
            .iter()
            .copied()
            .filter(|c| !table.has_column(c))
            .collect()
    }

    pub fn schema_message(&self) -> &'static str {
        match self {
            TableRole::GroundTruth => "Ground truth CSV must have columns: id,label",
            TableRole::Predictions => "Prediction CSV must contain an id column",
        }
    }
}

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu
    pub fn create(loader_type: &str) -> std::result::Result<Box<dyn DataLoader>, String> {
        match loader_type.to_lowercase().as_str() {
            "csv" | "structured" => Ok(Box::new(CsvDataLoader::new())),
            "positional" => Ok(Box::new(PositionalLoader::new())),
            _ => Err(format!("Neznámy typ loadera: {}", loader_type)),
        }
    }

    /// Vráti zoznam loaderov v poradí, v akom sa skúšajú
    pub fn available_loaders() -> Vec<&'static str> {
        vec!["structured", "positional"]
    }

    /// Prečíta súbor; chýbajúci súbor je vždy [`EvalError::NotFound`].
    pub fn read_source(path: &Path) -> Result<String> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(text
                .strip_prefix('\u{feff}')
                .map(str::to_string)
                .unwrap_or(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(EvalError::not_found(path)),
            Err(e) => Err(EvalError::Io(e)),
        }
    }

    /// Dvojstupňové načítanie: štruktúrovaný CSV, potom pozičný fallback.
    ///
    /// Štruktúrovaný výsledok sa prijme iba ak obsahuje povinné stĺpce roly.
    pub fn load_with_fallback(data: &str, role: TableRole) -> Result<RawTable> {
        match CsvDataLoader::new().load_from_string(data) {
            Ok(table) => {
                let missing = role.missing_columns(&table);
                if missing.is_empty() {
                    return Ok(table);
                }
                log::debug!(
                    "{:?}: structured load lacks {:?}, trying positional fallback",
                    role,
                    missing
                );
            }
            Err(e) => {
                log::debug!("{:?}: structured load failed ({}), trying positional fallback", role, e);
            }
        }

        let table = PositionalLoader::new()
            .load_from_string(data)
            .map_err(|_| EvalError::schema(role.schema_message()))?;
        if table.is_empty() {
            return Err(EvalError::schema(role.schema_message()));
        }
        Ok(table)
    }

    /// Prečíta a načíta súbor pre danú rolu.
    pub fn load_path(path: &Path, role: TableRole) -> Result<RawTable> {
        let data = Self::read_source(path)?;
        Self::load_with_fallback(&data, role)
    }
}
