//! # WakeSync API
//!
//! HTTP surface of the WakeSync alarm-clock service: authentication
//! endpoints that open and close sessions, and user-scoped alarm CRUD.
//!
//! The crate is split along the request path: `routes` declares the
//! endpoints, `handlers` implements them, `middleware` carries the
//! cross-cutting pieces (sessions, auth guard, error mapping), and `config`
//! reads the environment.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::middleware::session::SessionStore;

/// Shared state handed to every handler: the connection pool and the live
/// session map. No handler keeps state of its own.
pub struct ApiState {
    pub db_pool: PgPool,
    pub sessions: SessionStore,
}

/// Brings the server up: logging, routes, CORS, timeout, then serve.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        db_pool,
        sessions: SessionStore::new(),
    });

    let app = Router::new()
        .merge(routes::health::routes())
        .merge(routes::auth::routes())
        .merge(routes::alarm::routes())
        .with_state(state);

    // CORS only when origins are configured; origins that fail to parse are
    // skipped rather than rejected wholesale
    let app = match &config.cors_origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
                .allow_origin(allowed)
                .allow_credentials(true);
            app.layer(cors)
        }
        None => app,
    };

    // A hung database call must not leave the request pending forever
    let app = app.layer(TimeoutLayer::new(Duration::from_secs(
        config.request_timeout,
    )));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
