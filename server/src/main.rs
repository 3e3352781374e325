use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use atelier_server::config::Config;
use atelier_server::locale::LocaleRegistry;
use atelier_server::services::{CachedContentStore, ContentStore, NotionClient};
use atelier_server::{AppState, create_app};

#[derive(Parser, Debug)]
#[command(name = "atelier-server", version, about = "Bilingual catalog and marketing site server")]
struct Args {
    /// Explicit configuration file (default: conf/config.toml lookup)
    #[arg(long)]
    config: Option<String>,

    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads APP_* overrides
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = Config::load_from(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guard = init_tracing(&config);

    let registry =
        LocaleRegistry::new(config.locale.supported.clone(), config.locale.default.clone())
            .context("invalid locale configuration")?;
    tracing::info!(
        "Serving locales [{}], default '{}'",
        registry.locales().join(", "),
        registry.default_locale()
    );

    let notion = NotionClient::new(&config.content_store);
    let content: Arc<dyn ContentStore> = if config.cache.enabled {
        tracing::info!("Content cache enabled, ttl {}s", config.cache.ttl_secs);
        Arc::new(CachedContentStore::new(notion, Duration::from_secs(config.cache.ttl_secs)))
    } else {
        Arc::new(notion)
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState { config, registry, content });
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("atelier-server listening on {}", addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Initialize tracing from config; RUST_LOG wins when set. The returned
/// guard must stay alive for the file writer to flush.
fn init_tracing(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match &config.logging.file {
        Some(file) => {
            let path = Path::new(file);
            let directory = path.parent().unwrap_or_else(|| Path::new("logs"));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "atelier-server.log".to_string());
            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        },
    }
}
