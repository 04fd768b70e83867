use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{Level, info};

use server::config::AppConfig;
use server::grader::MockGrader;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = server::database::init_db(&config.database.url).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        db,
        config,
        grader: Arc::new(MockGrader),
    };

    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
