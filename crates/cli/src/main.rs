//! CLI application for the IMDS market data ETL service.

use clap::{Parser, Subcommand};
use imds_etl_config::EtlConfig;
use imds_etl_db::SinkDb;
use imds_etl_pipeline::SyncRunner;
use imds_etl_source::SourceDb;
use imds_etl_telemetry::{init_logging, Metrics};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "imds-etl")]
#[command(about = "Periodic sync of the IMDS MySQL feed into PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the periodic sync service
    Run {
        /// Seconds between sync passes
        #[arg(long, default_value = "300")]
        poll_interval_seconds: u64,

        /// Metrics bind address
        #[arg(long, default_value = "0.0.0.0:9090")]
        metrics_bind_address: String,

        /// Log level
        #[arg(long)]
        log_level: Option<String>,

        /// Directory for the append-mode log file (e.g. /var/log/etl)
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Audit file receiving a JSON summary of every pass
        #[arg(long)]
        sample_output_path: Option<PathBuf>,

        /// Run a single pass and exit instead of looping
        #[arg(long, default_value = "false")]
        run_once: bool,
    },
    /// Probe both databases and print their server versions
    Check {
        /// Log level
        #[arg(long)]
        log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            poll_interval_seconds,
            metrics_bind_address,
            log_level,
            log_dir,
            sample_output_path,
            run_once,
        } => {
            init_logging(log_level.as_deref(), log_dir.as_deref())?;
            run_sync(
                poll_interval_seconds,
                &metrics_bind_address,
                sample_output_path,
                run_once,
            )
            .await?;
        }
        Commands::Check { log_level } => {
            init_logging(log_level.as_deref(), None)?;
            check_connectivity().await?;
        }
    }

    Ok(())
}

async fn run_sync(
    poll_interval: u64,
    metrics_addr: &str,
    sample_output_path: Option<PathBuf>,
    run_once: bool,
) -> anyhow::Result<()> {
    info!("Starting IMDS ETL service");

    let config = EtlConfig::from_env()?;

    // Initialize sink and schema first; the feed is read-only.
    let sink = SinkDb::connect(&config.postgres).await?;
    sink.migrate().await?;

    let metrics = Metrics::new()?;
    let source = SourceDb::connect(&config.mysql, metrics.clone()).await?;
    let runner = SyncRunner::new(source, sink, metrics.clone(), sample_output_path);

    start_metrics_server(metrics_addr, metrics.clone()).await?;

    let poll_duration = Duration::from_secs(poll_interval);

    loop {
        let summary = runner.run_pass().await;

        if run_once {
            if !summary.all_ok() {
                anyhow::bail!("sync pass finished with failed jobs: {:?}", summary.failed_jobs);
            }
            info!("Single pass complete, exiting");
            return Ok(());
        }

        sleep(poll_duration).await;
    }
}

async fn check_connectivity() -> anyhow::Result<()> {
    let config = EtlConfig::from_env()?;

    let metrics = Metrics::new()?;
    let source = SourceDb::connect(&config.mysql, metrics).await?;
    let mysql_version = source.probe().await?;
    println!("MySQL source ok: {}", mysql_version);

    let sink = SinkDb::connect(&config.postgres).await?;
    let postgres_version = sink.probe().await?;
    println!("PostgreSQL sink ok: {}", postgres_version);

    Ok(())
}

async fn start_metrics_server(addr: &str, metrics: Metrics) -> anyhow::Result<()> {
    use axum::{
        extract::State,
        http::StatusCode,
        response::IntoResponse,
        routing::get,
        Router,
    };
    use std::sync::Arc;

    let metrics = Arc::new(metrics);

    async fn metrics_handler(
        State(metrics): State<Arc<Metrics>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match metrics.gather() {
            Ok(body) => Ok((StatusCode::OK, body)),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Metrics server listening on http://{}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(())
}
