//! Chybové typy pre vyhodnocovanie submisií.

use std::path::PathBuf;
use thiserror::Error;

/// Výsledok operácií evaluátora.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Chyba pri vyhodnocovaní.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    /// Súbor neexistuje. Fatálne v každom režime.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Cesta, ktorá sa nenašla.
        path: PathBuf,
    },

    /// IO chyba pri čítaní súboru.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Súbor sa nedá rozparsovať ani jednou stratégiou.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Chýba povinný stĺpec alebo obsah stĺpca je nepoužiteľný.
    #[error("{0}")]
    Schema(String),

    /// Ground truth a predikcie nemajú spoločné id.
    #[error("No matching ids between ground truth and predictions")]
    EmptyJoin,

    /// Binárne AUC pri viac ako dvoch triedach ground truth.
    #[error("ROC AUC requires binary ground truth labels (found {classes} classes)")]
    ClassCardinality {
        /// Počet rôznych tried v ground truth.
        classes: usize,
    },

    /// Neplatná konfigurácia.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EvalError {
    /// Vytvorí chybu pre chýbajúci súbor.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        EvalError::NotFound { path: path.into() }
    }

    /// Vytvorí schema chybu.
    pub fn schema(msg: impl Into<String>) -> Self {
        EvalError::Schema(msg.into())
    }

    /// Vytvorí parse chybu.
    pub fn parse(msg: impl Into<String>) -> Self {
        EvalError::Parse(msg.into())
    }

    /// Vytvorí chybu konfigurácie.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        EvalError::InvalidConfig(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EvalError::NotFound { .. })
    }

    /// Či tolerantný režim smie chybu nahradiť nulovým výsledkom.
    ///
    /// Chýbajúci súbor a neplatná konfigurácia sa nikdy neprehĺtajú.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EvalError::NotFound { .. } | EvalError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_never_recoverable() {
        let err = EvalError::not_found("/tmp/missing.csv");
        assert!(err.is_not_found());
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn data_errors_are_recoverable() {
        assert!(EvalError::EmptyJoin.is_recoverable());
        assert!(EvalError::ClassCardinality { classes: 3 }.is_recoverable());
        assert!(EvalError::schema("x").is_recoverable());
        assert!(EvalError::parse("x").is_recoverable());
        assert!(!EvalError::invalid_config("x").is_recoverable());
    }

    #[test]
    fn cardinality_message_names_class_count() {
        let err = EvalError::ClassCardinality { classes: 3 };
        assert_eq!(
            err.to_string(),
            "ROC AUC requires binary ground truth labels (found 3 classes)"
        );
    }
}
