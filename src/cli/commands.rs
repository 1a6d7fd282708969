//! Command execution logic for the Polarity CLI.

use std::time::Instant;

use crate::cli::args::{
    Command, EvaluateArgs, FetchArgs, InfoArgs, PolarityArgs, PredictArgs, TrainArgs,
};
use crate::cli::output::{
    EvaluationResult, FetchResult, ModelInfoResult, PredictionResult, TrainResult, output_result,
};
use crate::dataset::{ensure_dataset, load_tsv};
use crate::error::{PolarityError, Result};
use crate::features::hashing::HashingConfig;
use crate::model::SentimentModel;
use crate::pipeline::{PipelineConfig, SentimentPipeline};
use crate::sweep::ParamGrid;

/// Execute the given CLI command.
pub fn execute_command(args: &PolarityArgs) -> Result<()> {
    match &args.command {
        Command::Fetch(fetch_args) => execute_fetch(fetch_args, args),
        Command::Train(train_args) => execute_train(train_args, args),
        Command::Evaluate(evaluate_args) => execute_evaluate(evaluate_args, args),
        Command::Predict(predict_args) => execute_predict(predict_args, args),
        Command::Info(info_args) => execute_info(info_args, args),
    }
}

/// Download the dataset if it is not already present.
fn execute_fetch(fetch_args: &FetchArgs, args: &PolarityArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("Checking dataset at: {}", fetch_args.data_path.display());
    }

    let downloaded = ensure_dataset(&fetch_args.data_path, &fetch_args.url)?;

    let result = FetchResult {
        path: fetch_args.data_path.display().to_string(),
        url: fetch_args.url.clone(),
        downloaded,
    };

    let message = if downloaded {
        "Dataset downloaded"
    } else {
        "Dataset already present"
    };
    output_result(message, &result, args)
}

/// Train a sentiment model with a hyperparameter sweep.
fn execute_train(train_args: &TrainArgs, args: &PolarityArgs) -> Result<()> {
    let start_time = Instant::now();

    if train_args.fetch {
        let downloaded = ensure_dataset(&train_args.data_path, &train_args.url)?;
        if downloaded && args.verbosity() > 0 {
            println!("Downloaded dataset to: {}", train_args.data_path.display());
        }
    }

    if args.verbosity() > 1 {
        println!("Loading dataset from: {}", train_args.data_path.display());
    }

    let dataset = load_tsv(&train_args.data_path)?;
    if dataset.is_empty() {
        return Err(PolarityError::dataset(format!(
            "No usable reviews in {}",
            train_args.data_path.display()
        )));
    }

    if args.verbosity() > 1 {
        println!(
            "Loaded {} reviews ({} skipped, {:.1}% positive)",
            dataset.len(),
            dataset.report.skipped,
            dataset.positive_ratio() * 100.0
        );
    }

    let config = PipelineConfig {
        analyzer: train_args.analyzer.into(),
        hashing: HashingConfig {
            num_features: train_args.num_features,
        },
        seed: train_args.seed,
        grid: ParamGrid {
            max_iter: train_args.max_iter,
            ..ParamGrid::default()
        },
        ..PipelineConfig::default()
    };

    let pipeline = SentimentPipeline::new(config);
    let outcome = pipeline.fit(&dataset.reviews)?;

    outcome.model.save(&train_args.model_path)?;

    let result = TrainResult {
        model_path: train_args.model_path.display().to_string(),
        total_reviews: dataset.len(),
        skipped_rows: dataset.report.skipped,
        train_size: outcome.train_size,
        test_size: outcome.test_size,
        validation_size: outcome.validation_size,
        best_l2_penalty: outcome.best_point.l2_penalty,
        best_learning_rate: outcome.best_point.learning_rate,
        test_auc: outcome.test_auc,
        validation_auc: outcome.validation_auc,
        candidates: outcome.candidates,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result("Model trained successfully", &result, args)
}

/// Evaluate a saved model on a labeled TSV.
fn execute_evaluate(evaluate_args: &EvaluateArgs, args: &PolarityArgs) -> Result<()> {
    let model = SentimentModel::load(&evaluate_args.model_path)?;

    if args.verbosity() > 1 {
        println!("Loading dataset from: {}", evaluate_args.data_path.display());
    }

    let dataset = load_tsv(&evaluate_args.data_path)?;
    if dataset.is_empty() {
        return Err(PolarityError::dataset(format!(
            "No usable reviews in {}",
            evaluate_args.data_path.display()
        )));
    }

    let report = model.evaluate(&dataset.reviews)?;

    let result = EvaluationResult {
        model_path: evaluate_args.model_path.display().to_string(),
        data_path: evaluate_args.data_path.display().to_string(),
        examples: report.examples,
        auc: report.auc,
        accuracy: report.accuracy,
    };

    output_result("Evaluation complete", &result, args)
}

/// Classify a piece of text with a saved model.
fn execute_predict(predict_args: &PredictArgs, args: &PolarityArgs) -> Result<()> {
    let model = SentimentModel::load(&predict_args.model_path)?;

    let score = model.score(&predict_args.text)?;
    let sentiment = if score >= 0.5 { "positive" } else { "negative" };

    let result = PredictionResult {
        text: predict_args.text.clone(),
        score,
        sentiment: sentiment.to_string(),
    };

    output_result("Prediction", &result, args)
}

/// Show a saved model's metadata and training statistics.
fn execute_info(info_args: &InfoArgs, args: &PolarityArgs) -> Result<()> {
    let model = SentimentModel::load(&info_args.model_path)?;

    let result = ModelInfoResult {
        path: info_args.model_path.display().to_string(),
        name: model.metadata.name.clone(),
        version: model.metadata.version.clone(),
        trained_at: model.metadata.trained_at.to_rfc3339(),
        training_examples: model.metadata.training_examples,
        num_features: model.hashing_config().num_features,
        analyzer: model.analyzer_kind().name().to_string(),
        iterations: model.stats.iterations,
        converged: model.stats.converged,
        final_training_loss: model.stats.final_training_loss,
        validation_auc: model.metadata.validation_metrics.get("auc").copied(),
    };

    output_result("Model information", &result, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::AnalyzerKind;
    use crate::cli::args::PolarityArgs;
    use clap::Parser;
    use std::io::Write;

    fn write_tsv(dir: &tempfile::TempDir, rows: &[(u8, &str)]) -> std::path::PathBuf {
        let path = dir.path().join("reviews.tsv");
        let mut file = std::fs::File::create(&path).unwrap();
        for (rating, text) in rows {
            writeln!(file, "{rating}\t{text}").unwrap();
        }
        path
    }

    fn synthetic_rows() -> Vec<(u8, &'static str)> {
        let positive = [
            "great book loved every page",
            "wonderful story highly recommended",
            "excellent read truly enjoyable",
        ];
        let negative = [
            "terrible book wasted my time",
            "awful story badly written",
            "boring read truly disappointing",
        ];
        (0..90)
            .map(|i| {
                if i % 2 == 0 {
                    (5, positive[i % positive.len()])
                } else {
                    (1, negative[i % negative.len()])
                }
            })
            .collect()
    }

    #[test]
    fn test_execute_train_and_info() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_path = write_tsv(&dir, &synthetic_rows());
        let model_path = dir.path().join("model.json");

        let args = PolarityArgs::try_parse_from([
            "polarity",
            "--quiet",
            "train",
            data_path.to_str().unwrap(),
            model_path.to_str().unwrap(),
            "--num-features",
            "1024",
            "--max-iter",
            "150",
        ])
        .unwrap();

        execute_command(&args).unwrap();
        assert!(model_path.exists());

        let model = SentimentModel::load(&model_path).unwrap();
        assert_eq!(model.analyzer_kind(), AnalyzerKind::Standard);
        assert_eq!(model.hashing_config().num_features, 1024);

        let info_args = PolarityArgs::try_parse_from([
            "polarity",
            "--quiet",
            "info",
            model_path.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(&info_args).unwrap();
    }

    #[test]
    fn test_execute_predict() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_path = write_tsv(&dir, &synthetic_rows());
        let model_path = dir.path().join("model.json");

        let train_args = PolarityArgs::try_parse_from([
            "polarity",
            "--quiet",
            "train",
            data_path.to_str().unwrap(),
            model_path.to_str().unwrap(),
            "--num-features",
            "1024",
            "--max-iter",
            "150",
        ])
        .unwrap();
        execute_command(&train_args).unwrap();

        let predict_args = PolarityArgs::try_parse_from([
            "polarity",
            "--quiet",
            "predict",
            model_path.to_str().unwrap(),
            "a wonderful great book",
        ])
        .unwrap();
        execute_command(&predict_args).unwrap();
    }

    #[test]
    fn test_execute_train_empty_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_path = write_tsv(&dir, &[]);
        let model_path = dir.path().join("model.json");

        let args = PolarityArgs::try_parse_from([
            "polarity",
            "--quiet",
            "train",
            data_path.to_str().unwrap(),
            model_path.to_str().unwrap(),
        ])
        .unwrap();

        assert!(execute_command(&args).is_err());
        assert!(!model_path.exists());
    }
}
