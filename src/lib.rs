//! Vyhodnocovanie predikcií súťažných submisií voči ground truth.
//!
//! Vstupom sú dva CSV súbory (ground truth a predikcie), výstupom záznam
//! metrík. Evaluátor nepozná používateľov, datasety ani HTTP.
//!
//! ```no_run
//! let result = submission_eval::evaluate("groundtruth.csv", "submission.csv")?;
//! println!("auc={} f1={}", result.auc, result.f1);
//! # Ok::<(), submission_eval::EvalError>(())
//! ```

pub mod config;
pub mod data_loading;
pub mod error;
pub mod evaluation;
pub mod processing;

pub use config::{EvalMode, EvaluatorConfig};
pub use error::{EvalError, Result};
pub use evaluation::{
    analyze_ground_truth, compute_classification_metrics, evaluate, Auc, ClassificationMetrics,
    GroundTruthReport, MetricKey, MetricsResult, SubmissionEvaluator,
};
