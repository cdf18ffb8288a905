use std::{net::SocketAddr, sync::Arc};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;
use service::{period::SystemClock, repo::SeaOrmRepository, repository::MessRepository};

/// Only `origin` when configured, otherwise permissive.
pub fn build_cors(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    match origin {
        Some(origin) => Ok(CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])),
        None => Ok(CorsLayer::very_permissive()),
    }
}

pub fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Public entry: connect, migrate, build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let repo: Arc<dyn MessRepository> = Arc::new(SeaOrmRepository::new(db));
    let state = ServerState::new(repo, Arc::new(SystemClock));

    let cors = build_cors(cfg.server.cors_origin.as_deref())?;
    let app: Router = routes::build_router(state, cors);

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server is running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use service::period::FixedClock;
    use service::repository::mock::InMemoryRepository;
    use tower::ServiceExt;

    const FRONTEND: &str = "https://mess-management-17ffa.web.app";

    fn app_with_origin(origin: Option<&str>) -> Router {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let state = ServerState::new(Arc::new(InMemoryRepository::default()), Arc::new(FixedClock(today)));
        routes::build_router(state, build_cors(origin).unwrap())
    }

    async fn allow_origin_for(app: Router, origin: &str) -> Option<String> {
        let req = Request::builder().uri("/health").header(header::ORIGIN, origin).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn configured_origin_restricts_cors() {
        let app = app_with_origin(Some(FRONTEND));
        assert_eq!(allow_origin_for(app.clone(), FRONTEND).await.as_deref(), Some(FRONTEND));
        assert_eq!(allow_origin_for(app, "https://elsewhere.example").await, None);
    }

    #[tokio::test]
    async fn unset_origin_is_permissive() {
        let app = app_with_origin(None);
        assert_eq!(allow_origin_for(app, "https://elsewhere.example").await.as_deref(), Some("https://elsewhere.example"));
    }

    #[test]
    fn cors_accepts_configured_origin() {
        assert!(build_cors(Some(FRONTEND)).is_ok());
        assert!(build_cors(None).is_ok());
        assert!(build_cors(Some("bad\norigin")).is_err());
    }

    #[test]
    fn bind_addr_from_server_config() {
        let server = ServerConfig { host: "127.0.0.1".into(), port: 5000, worker_threads: None, cors_origin: None };
        assert_eq!(bind_addr(&server).unwrap().port(), 5000);
    }
}
