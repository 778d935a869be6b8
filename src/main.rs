use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use notepad::logging::{init_file_logging, init_logging};
use notepad::{
    AppState, DocumentStore, JsonDirStore, MemoryStore, NoteService, ServerConfig, StorageConfig,
    build_router,
};

#[derive(Parser)]
#[command(name = "notepad", version, about = "Personal note-taking service and editor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the notes REST API
    Serve(ServeArgs),
    /// Write notes in the terminal
    Tui {
        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Directory holding the note documents
    #[arg(long, conflicts_with = "in_memory")]
    data_dir: Option<PathBuf>,
    /// Keep notes in memory only
    #[arg(long)]
    in_memory: bool,
    /// Answer 404 for ids with no note instead of an empty result
    #[arg(long)]
    strict_not_found: bool,
    /// Slow list, create and update down like a remote backend would be
    #[arg(long)]
    simulate_latency: bool,
    #[arg(long)]
    list_delay_ms: Option<u64>,
    #[arg(long)]
    create_delay_ms: Option<u64>,
    #[arg(long)]
    update_delay_ms: Option<u64>,
}

impl ServeArgs {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(dir) = self.data_dir {
            config.storage = StorageConfig::JsonDir(dir);
        }
        if self.in_memory {
            config.storage = StorageConfig::Memory;
        }
        if self.strict_not_found {
            config.service.strict_not_found = true;
        }
        if self.simulate_latency {
            config.service = config.service.with_simulated_latency();
        }
        if let Some(ms) = self.list_delay_ms {
            config.service.list_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.create_delay_ms {
            config.service.create_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.update_delay_ms {
            config.service.update_delay = Duration::from_millis(ms);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            init_logging();
            let config = args.apply(ServerConfig::from_env().context("invalid configuration")?);
            tokio::runtime::Runtime::new()
                .context("failed to start tokio runtime")?
                .block_on(serve(config))
        }
        Command::Tui { log_file } => {
            if let Some(path) = log_file {
                init_file_logging(&path)
                    .with_context(|| format!("failed to open log file {}", path.display()))?;
            }
            notepad::tui::run()
        }
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    let store: Arc<dyn DocumentStore> = match &config.storage {
        StorageConfig::Memory => Arc::new(MemoryStore::new()),
        StorageConfig::JsonDir(dir) => Arc::new(
            JsonDirStore::open(dir)
                .await
                .with_context(|| format!("failed to open note store at {}", dir.display()))?,
        ),
    };
    info!(storage = ?config.storage, options = ?config.service, "note store ready");

    let service = NoteService::new(store, config.service.clone());
    let app = build_router(AppState::new(service));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("notepad listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("shutdown signal received"),
                Err(e) => {
                    error!(error = %e, "cannot listen for shutdown signal");
                    std::future::pending::<()>().await
                }
            }
        })
        .await
        .context("server failed")
}
