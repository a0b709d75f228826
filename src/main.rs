use dotenvy::dotenv;
use stayvista::logging::init_tracing;
use stayvista::metrics::{init_metrics, metrics_app};
use stayvista::router::init_router;
use stayvista::state::init_app_state;
use stayvista_config::ServerConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics() {
        let metrics_addr = format!("0.0.0.0:{}", server_config.metrics_port);
        let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr).await?;
        info!(addr = %metrics_addr, "Metrics server listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state().await?;
    if state.jwt_config.uses_default_secret() {
        warn!("ACCESS_TOKEN_SECRET is not set; sessions are signed with the development secret");
    }

    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "StayVista server running");
    info!("Scalar UI available at http://localhost:{}/scalar", server_config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
