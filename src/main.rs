//! submission-eval - vyhodnotenie submisie z príkazového riadku
//!
//! ```bash
//! submission-eval evaluate --ground-truth gt.csv --predictions sub.csv
//! submission-eval evaluate -g gt.csv -p sub.csv --tolerant
//! submission-eval analyze --ground-truth gt.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use submission_eval::{
    analyze_ground_truth, ClassificationMetrics, EvalError, EvalMode, EvaluatorConfig,
    SubmissionEvaluator,
};

#[derive(Parser)]
#[command(name = "submission-eval", version, about = "Score prediction submissions against ground truth")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a predictions file and print the metrics JSON
    Evaluate {
        #[arg(short = 'g', long)]
        ground_truth: PathBuf,

        #[arg(short = 'p', long)]
        predictions: PathBuf,

        /// Return zeroed metrics instead of failing on malformed input
        #[arg(long)]
        tolerant: bool,

        /// Skip ROC and PR curve points
        #[arg(long)]
        no_curves: bool,

        /// Score threshold for a positive prediction
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print ground truth diagnostics as JSON
    Analyze {
        #[arg(short = 'g', long)]
        ground_truth: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_not_found() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(command: Command) -> Result<String, EvalError> {
    match command {
        Command::Evaluate {
            ground_truth,
            predictions,
            tolerant,
            no_curves,
            threshold,
        } => {
            let mut config = EvaluatorConfig::from_env()?;
            if tolerant {
                config = config.with_mode(EvalMode::Tolerant);
            }
            if no_curves {
                config = config.with_curves(false);
            }
            if let Some(t) = threshold {
                config = config.with_threshold(t);
            }

            let evaluator = SubmissionEvaluator::new(config);
            match evaluator.config().mode {
                EvalMode::Strict => to_json(&evaluator.evaluate(&ground_truth, &predictions)?),
                EvalMode::Tolerant => {
                    let result: ClassificationMetrics =
                        evaluator.compute_classification_metrics(&ground_truth, &predictions)?;
                    to_json(&result)
                }
            }
        }
        Command::Analyze { ground_truth } => to_json(&analyze_ground_truth(&ground_truth)?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, EvalError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| EvalError::parse(format!("cannot serialize output: {}", e)))
}
