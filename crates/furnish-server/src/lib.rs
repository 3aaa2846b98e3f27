//! Startup sequence for the Furnish server: schema migration, router
//! assembly and the HTTP listener.
//!
//! The binary in `main.rs` owns config loading, tracing and the choice of
//! backend; everything here is generic over [`UserStore`] so the same
//! sequence runs against MongoDB or the in-memory store.

pub mod config;

use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use furnish_core::{migrate::StepReport, store::UserStore};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use config::{Backend, ServerConfig};

/// Build the full application: API routes, static files for every other
/// path, and request tracing.
pub fn app<S>(store: Arc<S>, static_dir: &Path) -> Router
where
  S: UserStore + 'static,
{
  furnish_api::api_router(store)
    .fallback_service(ServeDir::new(static_dir))
    .layer(TraceLayer::new_for_http())
}

/// Run the migration pipeline, logging each step as it is reported.
pub async fn migrate<S: UserStore>(store: &S) -> anyhow::Result<Vec<StepReport>> {
  let reports = furnish_core::migrate::run(store)
    .await
    .context("schema migration failed")?;
  for report in &reports {
    tracing::info!(step = %report.step, outcome = %report.outcome, "migration step complete");
  }
  Ok(reports)
}

/// Migrate, then serve until the listener fails. The listener is not bound
/// unless every migration step succeeded.
pub async fn serve<S>(store: S, config: &ServerConfig) -> anyhow::Result<()>
where
  S: UserStore + 'static,
{
  migrate(&store).await?;

  let app = app(Arc::new(store), &config.static_dir);
  let address = config.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
