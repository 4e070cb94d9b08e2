//! Swasthya CLI - serve the surge-risk API or query it locally

#![deny(warnings)]

mod server;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swasthya_core::report::{
    render_coordination_text, render_hospitals_text, render_prediction_text,
    render_simulation_text,
};
use swasthya_core::{
    config, render_json, AgentCoordinationStatus, CrisisSimulator, HospitalDirectory,
    PredictSurgeResponse, SurgePredictionService, SurgeRequest,
};
use tracing_subscriber::EnvFilter;

/// Log filter for one-shot commands, keeps stdout clean
const CLI_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "swasthya")]
#[command(about = "Hospital surge-risk prediction API and tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to a JSON config file (default: discover in current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long, env = "SWASTHYA_PORT")]
        port: Option<u16>,
    },
    /// Predict surge risk for an event
    Predict {
        /// Path to a JSON config file supplying risk thresholds
        #[arg(long)]
        config: Option<PathBuf>,

        /// Event name (e.g. diwali, holi, normal)
        #[arg(long)]
        event: Option<String>,

        /// Pollution level (AQI)
        #[arg(long, allow_hyphen_values = true)]
        pollution_level: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// List hospital bed status
    Hospitals {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Simulate a crisis scenario
    Simulate {
        /// Crisis type (echoed back)
        #[arg(long = "type")]
        crisis_type: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Show agent coordination status
    Coordination {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config: config_path,
            host,
            port,
        } => {
            let cwd = std::env::current_dir()?;
            let mut resolved = config::load_and_resolve(&cwd, config_path.as_deref())
                .context("failed to load configuration")?;

            // CLI flags take precedence over config file values
            if let Some(host) = host {
                resolved.host = host;
            }
            if let Some(port) = port {
                if port == 0 {
                    anyhow::bail!("--port must be between 1 and 65535 (got 0)");
                }
                resolved.port = port;
            }

            init_tracing(&resolved.log_filter)?;
            match &resolved.config_path {
                Some(path) => tracing::info!(path = %path.display(), "loaded config"),
                None => tracing::info!("no config file found, using defaults"),
            }

            server::run(resolved).await?;
        }
        Commands::Predict {
            config: config_path,
            event,
            pollution_level,
            format,
        } => {
            init_tracing(CLI_LOG_FILTER)?;
            let cwd = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&cwd, config_path.as_deref())
                .context("failed to load configuration")?;
            let service = SurgePredictionService::with_thresholds(resolved.thresholds);

            let request = SurgeRequest::from_params(event.as_deref(), pollution_level.as_deref());
            let response = PredictSurgeResponse::from(service.predict(&request));

            match format {
                OutputFormat::Text => print!("{}", render_prediction_text(&request, &response)),
                OutputFormat::Json => println!("{}", render_json(&response)),
            }
        }
        Commands::Hospitals { format } => {
            init_tracing(CLI_LOG_FILTER)?;
            let hospitals = HospitalDirectory::new().list();

            match format {
                OutputFormat::Text => print!("{}", render_hospitals_text(&hospitals)),
                OutputFormat::Json => println!("{}", render_json(&hospitals)),
            }
        }
        Commands::Simulate {
            crisis_type,
            format,
        } => {
            init_tracing(CLI_LOG_FILTER)?;
            let result = CrisisSimulator::new().simulate(&crisis_type);

            match format {
                OutputFormat::Text => print!("{}", render_simulation_text(&result)),
                OutputFormat::Json => println!("{}", render_json(&result)),
            }
        }
        Commands::Coordination { format } => {
            init_tracing(CLI_LOG_FILTER)?;
            let status = AgentCoordinationStatus::current();

            match format {
                OutputFormat::Text => print!("{}", render_coordination_text(&status)),
                OutputFormat::Json => println!("{}", render_json(&status)),
            }
        }
    }

    Ok(())
}

/// Install the global subscriber; RUST_LOG overrides `default_filter`
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter: {}", default_filter))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
