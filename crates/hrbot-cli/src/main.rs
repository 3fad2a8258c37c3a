mod bootstrap;
mod config;

use clap::{Parser, Subcommand, ValueEnum};
use config::HrbotConfig;
use hrbot_gateway::GatewayServer;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hrbot", about = "HR resource query chatbot")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "hrbot.toml")]
    config: PathBuf,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the employees closest to a query
    Search {
        query: String,
        /// Number of matches (defaults to the configured top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
    /// Answer one chat query and print the recommendation
    Ask { query: String },
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Resolves with the name of whichever signal future completes first.
async fn first_signal<C, T>(ctrl_c: C, terminate: T) -> &'static str
where
    C: Future<Output = ()>,
    T: Future<Output = ()>,
{
    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = first_signal(ctrl_c, terminate).await;
    info!(signal, "Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = HrbotConfig::load(&cli.config).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = bootstrap::build_state(&config).await?;
            let app = GatewayServer::build(Arc::new(state));

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("hrbot API listening on {}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("Server stopped");
        }
        Commands::Search { query, top_k } => {
            let searcher = bootstrap::build_searcher(&config).await?;
            let top_k = top_k.unwrap_or(searcher.default_top_k());
            let matches = searcher.search_scored(&query, top_k).await?;

            if matches.is_empty() {
                println!("No employees found.");
            }
            for (rank, m) in matches.iter().enumerate() {
                println!(
                    "{}. {} (distance {:.4})",
                    rank + 1,
                    m.employee.name,
                    m.distance
                );
                println!(
                    "   {} yrs | Skills: {} | Availability: {}",
                    m.employee.experience_years,
                    m.employee.skills.join(", "),
                    m.employee.availability
                );
            }
        }
        Commands::Ask { query } => {
            if query.trim().is_empty() {
                anyhow::bail!("Query cannot be empty.");
            }
            let state = bootstrap::build_state(&config).await?;
            let matches = state.searcher.search(&query).await?;
            let recommendation = state.generator.generate(&query, &matches).await;

            println!("{}", recommendation.text());
            println!();
            println!("source: {:?}", recommendation.source());
            for e in &*matches {
                println!("  - {} ({})", e.name, e.availability);
            }
        }
    }

    Ok(())
}
