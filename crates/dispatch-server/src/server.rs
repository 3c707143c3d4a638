//! [`DispatchServer`] – HTTP server for the move endpoint.
//!
//! Listens on `0.0.0.0:8080` (configurable via [`DispatchServer::with_port`]).
//! Connection handling, chunked bodies, and `Expect: 100-continue` are left to
//! `axum::serve`; this module only builds the [`router`].

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::handler::{HandlerResponse, MoveHandler, METHOD_NOT_ALLOWED_BODY};

/// Default TCP port for the dispatch server.
pub const DEFAULT_PORT: u16 = 8080;

/// The only routed path.
pub const MOVE_PATH: &str = "/v1/move";

/// Largest accepted request body.  Larger bodies get `413`.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Upper bound on handling one request, body read included.  Slower requests
/// get `408`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that stop the server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the router serving `POST /v1/move` with `handler` as shared state.
pub fn router(handler: MoveHandler) -> Router {
    Router::new()
        .route(MOVE_PATH, post(move_robot).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .with_state(handler)
}

async fn move_robot(State(handler): State<MoveHandler>, body: Bytes) -> HandlerResponse {
    let response = handler.handle(&body).await;
    info!(status = response.status.as_u16(), "response");
    response
}

async fn method_not_allowed() -> HandlerResponse {
    HandlerResponse::text(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

// ---------------------------------------------------------------------------
// DispatchServer
// ---------------------------------------------------------------------------

/// HTTP server that routes `POST /v1/move` to a [`MoveHandler`].
pub struct DispatchServer {
    handler: MoveHandler,
    port: u16,
}

impl DispatchServer {
    /// Create a server for `handler` on the [`DEFAULT_PORT`].
    pub fn new(handler: MoveHandler) -> Self {
        Self {
            handler,
            port: DEFAULT_PORT,
        }
    }

    /// Override the listening port (builder-style).  Port `0` picks a free
    /// ephemeral port at bind time.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Return the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Bind the listening socket on all interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the port cannot be bound.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Bind and serve until the task is dropped.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound `listener` until the task is dropped.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        self.serve_with_shutdown(listener, std::future::pending::<()>())
            .await
    }

    /// Serve on `listener` until `shutdown` resolves, then let in-flight
    /// requests finish.
    pub async fn serve_with_shutdown<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match listener.local_addr() {
            Ok(addr) => info!(%addr, path = MOVE_PATH, "dispatch server listening"),
            Err(e) => warn!(error = %e, "dispatch server listening on unknown address"),
        }

        axum::serve(listener, router(self.handler))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)
    }
}
