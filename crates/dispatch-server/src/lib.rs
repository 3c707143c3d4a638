//! `dispatch-server` – the HTTP boundary of the dispatch service.
//!
//! Serves an axum router (default port `8080`) exposing one route:
//!
//! ```text
//! POST /v1/move   {"loadId": "231", "x": 5, "y": 3, "withinDistance": 10}
//! ```
//!
//! | Outcome | Status |
//! |---|---|
//! | Robot selected | `200` with the robot as JSON |
//! | No robot within range | `204` |
//! | Missing `loadId`, `x`, or `y`; malformed JSON | `400` |
//! | Wrong method | `405` with `Allow: POST` |
//! | Unknown path | `404` |
//! | Body over 64 KiB | `413` |
//! | Request not handled within 30 s | `408` |
//! | Source or data failure | `500` |
//!
//! # Modules
//!
//! - [`handler`] – [`MoveHandler`]: transport-independent request validation
//!   and status mapping.
//! - [`server`] – [`router`] and [`DispatchServer`], which binds the port and
//!   runs `axum::serve`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dispatch_runtime::Dispatcher;
//! use dispatch_server::{DispatchServer, MoveHandler};
//! use dispatch_source::StaticRobotSource;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = StaticRobotSource::builtin().expect("fixture");
//!     let handler = MoveHandler::new(Dispatcher::new(Arc::new(source)));
//!     DispatchServer::new(handler)
//!         .run()
//!         .await
//!         .expect("dispatch server failed");
//! }
//! ```

pub mod handler;
pub mod server;

pub use handler::{HandlerResponse, MoveHandler};
pub use server::{
    router, DispatchServer, ServerError, DEFAULT_PORT, MAX_BODY_BYTES, MOVE_PATH, REQUEST_TIMEOUT,
};
