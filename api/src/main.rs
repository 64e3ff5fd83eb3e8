use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use todo_api::{AppState, ServerConfig, TodoStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    let store = if config.seed {
        TodoStore::seeded().await
    } else {
        TodoStore::new()
    };

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, seeded = config.seed, "listening");
    todo_api::run(listener, AppState::new(store)).await?;
    Ok(())
}
