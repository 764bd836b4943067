pub mod classification;
pub mod curves;
pub mod evaluator;
pub mod ground_truth;
pub mod metrics;

pub use evaluator::{compute_classification_metrics, evaluate, SubmissionEvaluator};
pub use ground_truth::{analyze_ground_truth, GroundTruthReport};
pub use metrics::{
    metric_from_score_json, Auc, ClassificationMetrics, MetricKey, MetricsResult, PrPoints,
    RocPoints,
};
