mod application;
mod domain;
mod infrastructure;
mod presentation;

use infrastructure::AppContainer;
use presentation::http::HttpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let container = AppContainer::new().await?;

    let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok());

    HttpServer::new(
        container.session_handler.clone(),
        container.file_handler.clone(),
        container.chat_handler.clone(),
        port,
    )
    .run()
    .await
}
