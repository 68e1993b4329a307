//! Command-line interface: train, predict, serve

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::artifact::ArtifactBundle;
use crate::data::DataLoader;
use crate::inference::{InferenceService, SessionFeatures};
use crate::training::{Trainer, TrainingConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}

fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}

fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "shopintent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Purchase-intent analysis for online shopping sessions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the pipeline on a session dataset and save the artifact
    Train {
        /// Training dataset (CSV with a header row and a Revenue column)
        #[arg(short, long, default_value = "data/online_shoppers_intention.csv")]
        data: PathBuf,

        /// Output artifact file
        #[arg(short, long, default_value = "models/intent_model.json")]
        artifact: PathBuf,

        /// Fraction of rows held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Random seed for the split and the forest
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of trees in the forest
        #[arg(long, default_value = "200")]
        trees: usize,
    },

    /// Predict purchase intent for one session described in a JSON file
    Predict {
        /// Session file: a JSON mapping of feature name to value
        #[arg(short, long)]
        session: PathBuf,

        /// Trained artifact file
        #[arg(short, long, default_value = "models/intent_model.json")]
        artifact: PathBuf,
    },

    /// Start the prediction server
    Serve {
        /// Server host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Trained artifact file
        #[arg(short, long, default_value = "models/intent_model.json")]
        artifact: PathBuf,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(
    data_path: &PathBuf,
    artifact_path: &PathBuf,
    test_size: f64,
    seed: u64,
    trees: usize,
) -> anyhow::Result<()> {
    section("Train");

    step_run("Loading data");
    let start = Instant::now();
    let df = DataLoader::new().load_csv(data_path)?;
    step_done(&format!(
        "{} rows × {} cols in {:?}",
        df.height(),
        df.width(),
        start.elapsed()
    ));

    let config = TrainingConfig {
        test_size,
        seed,
        n_trees: trees,
        max_depth: None,
    };

    step_run(&format!("Training forest of {} trees", trees));
    let outcome = Trainer::new(config).train(&df)?;
    step_done(&format!("{:.2}s", outcome.training_time_secs));

    if let Some(report) = &outcome.evaluation.report {
        section("Evaluation");
        for line in report.to_string().lines() {
            println!("  {}", line);
        }
        match outcome.evaluation.auc {
            Some(auc) => println!("  {:<12} {}", muted("ROC-AUC"), format!("{:.4}", auc).white()),
            None => println!("  {:<12} {}", muted("ROC-AUC"), dim("skipped (single-class test split)")),
        }
    }

    if let Some(pairs) = outcome.pipeline.feature_importances() {
        section("Top features");
        for (name, importance) in pairs.iter().take(5) {
            println!("  {:<28} {:.4}", muted(name), importance);
        }
    }

    let bundle = ArtifactBundle::from_pipeline(outcome.pipeline);

    step_run(&format!("Saving → {}", artifact_path.display()));
    bundle.save(artifact_path)?;
    step_done(&format!(
        "{} numeric + {} categorical features",
        bundle.numeric_features.len(),
        bundle.categorical_features.len()
    ));

    println!();
    Ok(())
}

pub fn cmd_predict(session_path: &PathBuf, artifact_path: &PathBuf) -> anyhow::Result<()> {
    section("Predict");

    let service = InferenceService::from_artifact(artifact_path)
        .map_err(|e| anyhow::anyhow!("could not load model: {}", e))?;

    let json = std::fs::read_to_string(session_path)?;
    let session: SessionFeatures = serde_json::from_str(&json)?;

    let prediction = service.predict(&session)?;

    println!();
    if prediction.class == 1 {
        println!(
            "  {} likely to buy {}",
            ok("✓"),
            dim(&format!("(probability: {:.2}%)", prediction.probability * 100.0))
        );
    } else {
        println!(
            "  {} unlikely to buy {}",
            muted("✗"),
            dim(&format!("(probability of purchase: {:.2}%)", prediction.probability * 100.0))
        );
    }
    println!();

    Ok(())
}

pub async fn cmd_serve(host: &str, port: u16, artifact_path: &PathBuf) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    let config = ServerConfig {
        host: host.to_string(),
        port,
        artifact_path: artifact_path.display().to_string(),
    };

    run_server(config).await
}
