use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cardiopredict_model::artifacts::save_artifacts;
use cardiopredict_model::dataset::load_dataset;
use cardiopredict_model::training::train;

/// Train the CardioPredict classifier and scaler from the cardio CSV.
#[derive(Parser, Debug)]
#[command(name = "cardio-train", version, about)]
struct Args {
    /// Path to the semicolon-separated cardio training CSV
    #[arg(long, default_value = "cardio_train.csv")]
    data: PathBuf,

    /// Directory where model artifacts are written
    #[arg(long, default_value = "models")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let dataset = load_dataset(&args.data)
        .with_context(|| format!("loading dataset from {}", args.data.display()))?;

    let trained = train(&dataset).context("training failed")?;

    save_artifacts(
        &args.out_dir,
        &trained.model,
        &trained.scaler,
        &trained.feature_names,
    )
    .with_context(|| format!("saving artifacts to {}", args.out_dir.display()))?;

    info!(
        accuracy = trained.test_accuracy,
        out_dir = %args.out_dir.display(),
        "training complete, artifacts saved"
    );
    Ok(())
}
