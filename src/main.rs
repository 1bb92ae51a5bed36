use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use groupscholar_success_predictor::analytics::Analytics;
use groupscholar_success_predictor::classifier::{Classifier, LogisticClassifier};
use groupscholar_success_predictor::config::AppConfig;
use groupscholar_success_predictor::db::{PredictionStore, SqliteStore};
use groupscholar_success_predictor::import;
use groupscholar_success_predictor::models::RawPredictionInput;
use groupscholar_success_predictor::pipeline::PredictionPipeline;
use groupscholar_success_predictor::report;
use groupscholar_success_predictor::telemetry;

#[derive(Parser)]
#[command(name = "success-predictor")]
#[command(about = "Student success index and tier predictions for Group Scholar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Store one sample prediction per tier
    Seed,
    /// Score a student and store the prediction
    Predict {
        #[arg(long, allow_hyphen_values = true)]
        study_hours: String,
        #[arg(long, allow_hyphen_values = true)]
        attendance: String,
        #[arg(long, allow_hyphen_values = true)]
        prev_grade: String,
        /// Low, Medium or High
        #[arg(long)]
        motivation: String,
        /// Low or High
        #[arg(long)]
        parent_support: String,
        #[arg(long)]
        name: Option<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score every row of a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Show the tier distribution and mean success index
    Analytics {
        #[arg(long)]
        json: bool,
    },
    /// List the most recent predictions
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a markdown analytics report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, default_value_t = 10)]
        recent: usize,
    },
}

fn load_classifier(config: &AppConfig) -> anyhow::Result<Arc<dyn Classifier>> {
    let model = match &config.model_path {
        Some(path) => LogisticClassifier::load_model(path)
            .with_context(|| format!("failed to load model from {}", path.display()))?,
        None => LogisticClassifier::default(),
    };
    info!(model = model.name(), "classifier ready");
    Ok(Arc::new(model))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("invalid configuration")?;
    telemetry::init(&config.telemetry).context("failed to initialise logging")?;

    let store = SqliteStore::connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("failed to open {}", config.database.url))?;

    if let Commands::InitDb = cli.command {
        store.init_db().await?;
        println!("Schema ready.");
        return Ok(());
    }

    let store: Arc<dyn PredictionStore> = Arc::new(store);

    match cli.command {
        Commands::InitDb => {}
        Commands::Seed => {
            let pipeline = PredictionPipeline::new(load_classifier(&config)?, store);
            let inserted = import::seed(&pipeline).await?;
            println!("Seeded {inserted} predictions.");
        }
        Commands::Predict {
            study_hours,
            attendance,
            prev_grade,
            motivation,
            parent_support,
            name,
            json,
        } => {
            let pipeline = PredictionPipeline::new(load_classifier(&config)?, store);
            let raw = RawPredictionInput {
                study_hours,
                attendance,
                prev_grade,
                motivation,
                parent_support,
                student_name: name,
            };
            let outcome = pipeline.predict(&raw).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            for warning in outcome.warnings.iter() {
                println!("warning: {warning}");
            }
            println!(
                "Prediction #{}: success index {:.2} ({}), model confidence {:.2}%",
                outcome.id, outcome.composite_score, outcome.tier, outcome.confidence
            );
            println!("Recommendations:");
            for line in outcome.recommendations.iter() {
                println!("- {line}");
            }
        }
        Commands::Import { csv } => {
            let pipeline = PredictionPipeline::new(load_classifier(&config)?, store);
            let inserted = import::import_csv(&pipeline, &csv).await?;
            println!("Stored {inserted} predictions from {}.", csv.display());
        }
        Commands::Analytics { json } => {
            let summary = Analytics::new(store).summary().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!(
                "{} predictions, mean success index {:.2}",
                summary.total, summary.mean_composite_score
            );
            for entry in summary.tier_counts.iter() {
                println!("- {}: {}", entry.tier, entry.count);
            }
        }
        Commands::History { limit } => {
            let records = store.recent(limit).await?;

            if records.is_empty() {
                println!("No predictions recorded yet.");
                return Ok(());
            }

            for record in records.iter() {
                println!(
                    "- #{} {} ({}) index {:.2}, {}",
                    record.id,
                    record.student_name.as_deref().unwrap_or("anonymous"),
                    record.prediction_time.format("%Y-%m-%d %H:%M"),
                    record.ssi_score,
                    record.risk_tier
                );
            }
        }
        Commands::Report { out, recent } => {
            let summary = Analytics::new(store.clone()).summary().await?;
            let records = store.recent(recent).await?;
            let report = report::build_report(&summary, &records);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
