use techassist::backend::Backends;
use techassist::config::AppConfig;
use techassist::{routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let backends = Backends::from_config(&config).expect("backend init failed");
    let state = state::AppState::new(backends);

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "techassist listening");
    axum::serve(listener, app).await.expect("server failed");
}
