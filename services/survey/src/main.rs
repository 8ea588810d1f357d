//! Survey command line: serve the API or work with the store directly

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_service::{
    StoreBackend, SurveyConfig, SurveyService, build_store, render::render_report, serve,
};

#[derive(Parser)]
#[command(name = "survey")]
#[command(version)]
#[command(about = "Willingness-to-pay demand survey", long_about = None)]
struct Cli {
    /// Configuration file (TOML); SURVEY__* variables override it
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Record one response and show the refreshed views
    Submit {
        /// Price the respondent is willing to pay
        price: f64,
    },
    /// Show the current demand views
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey=info,survey_service=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = SurveyConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &cli.config {
        info!("Loaded configuration from: {}", path.display());
    }

    match cli.command {
        Commands::Serve => {
            info!("Starting survey API v{}", env!("CARGO_PKG_VERSION"));
            info!("Server will bind to: {}", config.server_address());
            serve(config).await?;
        }
        Commands::Submit { price } => {
            let service = open_service(&config)?;
            match service.submit(price).await {
                Ok(submission) => {
                    println!(
                        "✅ Your response of {}{} has been recorded!\n",
                        config.survey.currency, submission.price
                    );
                    print!("{}", render_report(&service.report(true).await));
                }
                Err(e) => {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Report { json } => {
            let service = open_service(&config)?;
            let report = service.report(false).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Commands::Config => {
            println!("{config:#?}");
        }
    }

    Ok(())
}

fn open_service(config: &SurveyConfig) -> Result<SurveyService> {
    if config.store.backend == StoreBackend::Memory {
        warn!("Memory store selected: responses last only for this command");
    }
    let store = build_store(&config.store).context("Failed to open submission store")?;
    Ok(SurveyService::new(config, store)?)
}
