use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use trip_assist::channels::CliChannel;
use trip_assist::config::AppConfig;
use trip_assist::enrich::{DestinationEnricher, WebEnricher};
use trip_assist::planner::{PlannerRouteState, planner_routes};
use trip_assist::session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config);

    eprintln!("✈️  Trip Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Exports: {}", config.export_dir.display());
    if let Some(ref dir) = config.log_dir {
        eprintln!("   Logs: {}", dir.display());
    }

    let enricher: Option<Arc<dyn DestinationEnricher>> = if config.enrich.enabled {
        eprintln!(
            "   Enrichment: enabled (timeout {}s, up to {} suggestions)",
            config.enrich.timeout.as_secs(),
            config.enrich.max_activities
        );
        Some(Arc::new(WebEnricher::new(config.enrich.clone())))
    } else {
        eprintln!("   Enrichment: disabled");
        None
    };

    // ── HTTP API ────────────────────────────────────────────────────────
    let serving_http = match config.http_port {
        Some(port) => {
            let state = PlannerRouteState {
                sessions: SessionStore::new(config.engine),
                enricher: enricher.clone(),
            };
            let app = planner_routes(state);
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
                .await
                .with_context(|| format!("Failed to bind HTTP port {port}"))?;
            eprintln!("   API: http://0.0.0.0:{}/api/sessions", port);
            tokio::spawn(async move {
                tracing::info!(port, "HTTP API started");
                if let Err(e) = axum::serve(listener, app).await {
                    tracing::error!("HTTP API stopped: {}", e);
                }
            });
            true
        }
        None => false,
    };

    eprintln!("   Type your answers and press Enter. /help for commands.\n");

    // ── CLI ─────────────────────────────────────────────────────────────
    let cli = CliChannel::new(config.engine, config.export_dir.clone(), enricher);
    cli.run().await;

    if serving_http {
        eprintln!("CLI closed; HTTP API still serving. Press Ctrl-C to stop.");
        tokio::signal::ctrl_c().await?;
    }

    Ok(())
}

/// Log to stderr, or to a daily rolling file when a log directory is set.
fn init_tracing(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "trip-assist.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
