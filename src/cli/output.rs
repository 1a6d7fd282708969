//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PolarityArgs};
use crate::error::Result;
use crate::sweep::CandidateScore;

/// Result structure for dataset fetching.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResult {
    pub path: String,
    pub url: String,
    pub downloaded: bool,
}

/// Result structure for model training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model_path: String,
    pub total_reviews: usize,
    pub skipped_rows: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub validation_size: usize,
    pub best_l2_penalty: f64,
    pub best_learning_rate: f64,
    pub test_auc: f64,
    pub validation_auc: f64,
    pub candidates: Vec<CandidateScore>,
    pub duration_ms: u64,
}

/// Result structure for model evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub model_path: String,
    pub data_path: String,
    pub examples: usize,
    pub auc: f64,
    pub accuracy: f64,
}

/// Result structure for single-text prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub text: String,
    pub score: f64,
    pub sentiment: String,
}

/// Information about a saved model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfoResult {
    pub path: String,
    pub name: String,
    pub version: String,
    pub trained_at: String,
    pub training_examples: usize,
    pub num_features: usize,
    pub analyzer: String,
    pub iterations: usize,
    pub converged: bool,
    pub final_training_loss: f64,
    pub validation_auc: Option<f64>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PolarityArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &PolarityArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("TrainResult") => {
            output_train_result_human(&value, args)
        }
        _ => {
            // Generic output for other types
            output_generic_human(&value, args)
        }
    }
}

/// Output a training result in human format.
fn output_train_result_human(value: &serde_json::Value, args: &PolarityArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Training Results:");
        println!("════════════════");

        if let Some(total) = obj.get("total_reviews").and_then(|t| t.as_u64()) {
            println!("Reviews loaded: {total}");
        }
        if let Some(skipped) = obj.get("skipped_rows").and_then(|s| s.as_u64())
            && skipped > 0
        {
            println!("Malformed rows skipped: {skipped}");
        }

        let train = obj.get("train_size").and_then(|s| s.as_u64()).unwrap_or(0);
        let test = obj.get("test_size").and_then(|s| s.as_u64()).unwrap_or(0);
        let validation = obj
            .get("validation_size")
            .and_then(|s| s.as_u64())
            .unwrap_or(0);
        println!("Split: {train} train / {test} test / {validation} validation");

        // Candidate table only when verbose
        if args.verbosity() > 1
            && let Some(candidates) = obj.get("candidates").and_then(|c| c.as_array())
        {
            println!();
            println!("Sweep candidates:");
            println!("────────────────");
            for candidate in candidates {
                let point = candidate.get("point");
                let l2 = point
                    .and_then(|p| p.get("l2_penalty"))
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                let lr = point
                    .and_then(|p| p.get("learning_rate"))
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                let auc = candidate
                    .get("test_auc")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                println!("  l2={l2:<6} lr={lr:<5} test AUC={auc:.4}");
            }
        }

        println!();
        if let Some(l2) = obj.get("best_l2_penalty").and_then(|v| v.as_f64()) {
            println!("Best L2 penalty: {l2}");
        }
        if let Some(lr) = obj.get("best_learning_rate").and_then(|v| v.as_f64()) {
            println!("Best learning rate: {lr}");
        }
        if let Some(auc) = obj.get("test_auc").and_then(|v| v.as_f64()) {
            println!("Test AUC: {auc:.4}");
        }
        if let Some(auc) = obj.get("validation_auc").and_then(|v| v.as_f64()) {
            println!("Validation AUC: {auc:.4}");
        }

        println!();
        if let Some(path) = obj.get("model_path").and_then(|p| p.as_str()) {
            println!("Model saved to: {path}");
        }
        if let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64()) {
            println!("Training time: {duration}ms");
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &PolarityArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PolarityArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_prediction_result_serde() {
        let result = PredictionResult {
            text: "great book".to_string(),
            score: 0.92,
            sentiment: "positive".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sentiment, "positive");
        assert_eq!(back.score, 0.92);
    }
}
