//! HTTP surface serving cache snapshots
//!
//! One GET route per live cache, each returning the snapshot bytes verbatim.
//! Staleness is never an HTTP error: callers get real data, the unknown
//! sentinel, or the error sentinel, always with a 200.

use crate::cache::RefreshCache;
use crate::error::{SensordError, SensordResult};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// A (path, live cache) pair exposed by the router.
pub struct Endpoint {
    pub path: String,
    pub cache: Arc<RefreshCache>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, cache: Arc<RefreshCache>) -> Self {
        Self {
            path: path.into(),
            cache,
        }
    }
}

/// Create the application router.
///
/// Only caches that survived bootstrap are passed in; there is no route for
/// a source that cannot run on this host.
pub fn router(endpoints: Vec<Endpoint>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let mut router = Router::new().route("/healthz", get(|| async { "ok" }));

    for endpoint in endpoints {
        let cache = endpoint.cache;
        info!(path = %endpoint.path, cache = %cache.name(), "registering endpoint");
        router = router.route(
            &endpoint.path,
            get(move || {
                let cache = Arc::clone(&cache);
                async move { snapshot_response(&cache) }
            }),
        );
    }

    router.layer(trace_layer)
}

fn snapshot_response(cache: &RefreshCache) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        cache.read(),
    )
}

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(addr: SocketAddr, app: Router) -> SensordResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| SensordError::io(format!("binding {}", addr), e))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SensordError::io("serving http", e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
