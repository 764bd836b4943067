//! Konfigurácia evaluátora: režim, krivky a prah.
//!
//! Poradie vrstiev: defaulty -> premenné prostredia -> explicitné settery.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_MODE: &str = "SUBMISSION_EVAL_MODE";
pub const ENV_CURVES: &str = "SUBMISSION_EVAL_CURVES";
pub const ENV_THRESHOLD: &str = "SUBMISSION_EVAL_THRESHOLD";

/// Prah, nad ktorým sa skóre považuje za pozitívnu predikciu.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Režim vyhodnotenia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    /// Chyby vstupu sa propagujú.
    #[default]
    Strict,
    /// Chyby vstupu (okrem chýbajúceho súboru) vrátia nulové metriky.
    Tolerant,
}

impl EvalMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Ok(EvalMode::Strict),
            "tolerant" => Ok(EvalMode::Tolerant),
            other => Err(EvalError::invalid_config(format!(
                "unknown mode '{}' (expected strict or tolerant)",
                other
            ))),
        }
    }
}

/// Nastavenia jedného vyhodnotenia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub mode: EvalMode,
    /// Či sa majú počítať ROC a PR krivky.
    pub return_curves: bool,
    pub threshold: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            mode: EvalMode::Strict,
            return_curves: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EvaluatorConfig {
    /// Nastavenie hlavného evaluačného endpointu.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Nastavenie pre odľahčené klasifikačné skórovanie (bez kriviek).
    pub fn tolerant() -> Self {
        Self {
            mode: EvalMode::Tolerant,
            return_curves: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_curves(mut self, return_curves: bool) -> Self {
        self.return_curves = return_curves;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Načíta defaulty prekryté premennými prostredia.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Rovnaké ako [`from_env`](Self::from_env), ale s vlastným zdrojom hodnôt.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(mode) = lookup(ENV_MODE) {
            cfg.mode = EvalMode::parse(&mode)?;
        }
        if let Some(curves) = lookup(ENV_CURVES) {
            cfg.return_curves = parse_bool(ENV_CURVES, &curves)?;
        }
        if let Some(threshold) = lookup(ENV_THRESHOLD) {
            cfg.threshold = threshold.trim().parse::<f64>().map_err(|_| {
                EvalError::invalid_config(format!(
                    "{} must be a number, got '{}'",
                    ENV_THRESHOLD, threshold
                ))
            })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Načíta konfiguráciu z JSON objektu; chýbajúce polia majú default.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| EvalError::invalid_config(format!("bad config JSON: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(EvalError::invalid_config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(EvalError::invalid_config(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_strict_with_curves() {
        let cfg = EvaluatorConfig::default();
        assert_eq!(cfg.mode, EvalMode::Strict);
        assert!(cfg.return_curves);
        assert_eq!(cfg.threshold, 0.5);
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = EvaluatorConfig::from_lookup(lookup_from(&[
            (ENV_MODE, "Tolerant"),
            (ENV_CURVES, "0"),
            (ENV_THRESHOLD, "0.7"),
        ]))
        .unwrap();
        assert_eq!(cfg.mode, EvalMode::Tolerant);
        assert!(!cfg.return_curves);
        assert_eq!(cfg.threshold, 0.7);
    }

    #[test]
    fn bad_env_values_are_rejected() {
        assert!(EvaluatorConfig::from_lookup(lookup_from(&[(ENV_MODE, "lenient")])).is_err());
        assert!(EvaluatorConfig::from_lookup(lookup_from(&[(ENV_CURVES, "maybe")])).is_err());
        assert!(EvaluatorConfig::from_lookup(lookup_from(&[(ENV_THRESHOLD, "1.5")])).is_err());
        assert!(EvaluatorConfig::from_lookup(lookup_from(&[(ENV_THRESHOLD, "abc")])).is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = EvaluatorConfig::from_json(r#"{"mode": "tolerant"}"#).unwrap();
        assert_eq!(cfg.mode, EvalMode::Tolerant);
        assert!(cfg.return_curves);
        assert_eq!(cfg.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn builder_setters_chain() {
        let cfg = EvaluatorConfig::strict()
            .with_mode(EvalMode::Tolerant)
            .with_curves(false)
            .with_threshold(0.3);
        assert_eq!(cfg, EvaluatorConfig::tolerant().with_threshold(0.3));
    }
}
