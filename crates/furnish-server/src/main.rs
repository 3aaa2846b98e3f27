//! furnish server binary.
//!
//! Reads `furnish.toml` (or the path given with `--config`) and `FURNISH_*`
//! environment variables, connects to the configured store, runs the schema
//! migration pipeline and serves HTTP.
//!
//! ```text
//! furnish                 # migrate, then serve
//! furnish migrate         # migrate only, then exit
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use furnish_core::store::UserStore;
use furnish_server::{Backend, ServerConfig};
use furnish_store_memory::MemoryStore;
use furnish_store_mongo::MongoStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Furnish shop server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "furnish.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Command {
  /// Run the schema migration pipeline, then serve HTTP.
  #[default]
  Serve,
  /// Run the schema migration pipeline and exit.
  Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let command = cli.command.unwrap_or_default();

  let server_cfg = furnish_server::config::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  match server_cfg.backend {
    Backend::Mongo => {
      let store = MongoStore::connect(&server_cfg.store)
        .await
        .context("failed to open document store")?;
      run(command, store, &server_cfg).await
    }
    Backend::Memory => {
      tracing::warn!("using the in-memory store; nothing will be persisted");
      run(command, MemoryStore::new(), &server_cfg).await
    }
  }
}

async fn run<S>(command: Command, store: S, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: UserStore + 'static,
{
  match command {
    Command::Serve => furnish_server::serve(store, server_cfg).await,
    Command::Migrate => furnish_server::migrate(&store).await.map(drop),
  }
}
