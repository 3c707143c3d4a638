//! [`MoveHandler`] – validates a move request and maps the dispatch outcome to
//! an HTTP status.
//!
//! The handler knows nothing about routing: it takes the raw request body and
//! returns a [`HandlerResponse`], which keeps every status mapping testable
//! without a router.  Method and path checks live in [`crate::server::router`].

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use dispatch_runtime::Dispatcher;
use dispatch_types::{DEFAULT_WITHIN_DISTANCE, EnrichedRobot, Point, SelectionRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const METHOD_NOT_ALLOWED_BODY: &str = "HTTP method not allowed";
pub const MISSING_PARAMETERS_BODY: &str = "Request is missing one or more parameters";
pub const MALFORMED_BODY: &str = "Request body is not a valid move request";
pub const INVALID_THRESHOLD_BODY: &str = "withinDistance must be a non-negative number";
pub const SERVER_ERROR_BODY: &str = "Unexpected error handling request. Please try again.";

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

// ─────────────────────────────────────────────────────────────────────────────
// Response
// ─────────────────────────────────────────────────────────────────────────────

/// Status, content type, and body produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl HandlerResponse {
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT,
            body: body.into(),
        }
    }

    pub fn json(status: StatusCode, body: String) -> Self {
        Self {
            status,
            content_type: JSON,
            body,
        }
    }

    pub fn no_content() -> Self {
        Self::text(StatusCode::NO_CONTENT, "")
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return StatusCode::NO_CONTENT.into_response();
        }
        let mut response = (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response();
        if self.status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ─────────────────────────────────────────────────────────────────────────────

/// `loadId` arrives as either a string or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoadId {
    Text(String),
    Number(serde_json::Number),
}

impl LoadId {
    fn into_string(self) -> Option<String> {
        match self {
            LoadId::Text(s) if s.trim().is_empty() => None,
            LoadId::Text(s) => Some(s),
            LoadId::Number(n) => Some(n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    load_id: Option<LoadId>,
    x: Option<f64>,
    y: Option<f64>,
    within_distance: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveResponse<'a> {
    load_id: &'a str,
    #[serde(flatten)]
    robot: &'a EnrichedRobot,
}

// ─────────────────────────────────────────────────────────────────────────────
// MoveHandler
// ─────────────────────────────────────────────────────────────────────────────

/// Turns `POST /v1/move` requests into dispatch calls.
#[derive(Clone)]
pub struct MoveHandler {
    dispatcher: Dispatcher,
    default_within_distance: f64,
}

impl MoveHandler {
    /// Handler using [`DEFAULT_WITHIN_DISTANCE`] when a request omits
    /// `withinDistance`.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            default_within_distance: DEFAULT_WITHIN_DISTANCE,
        }
    }

    /// Override the threshold applied when a request omits `withinDistance`.
    pub fn with_default_within_distance(mut self, within_distance: f64) -> Self {
        self.default_within_distance = within_distance;
        self
    }

    pub fn default_within_distance(&self) -> f64 {
        self.default_within_distance
    }

    /// Handle the body of one `POST`.
    pub async fn handle(&self, body: &[u8]) -> HandlerResponse {
        let request: MoveRequest = match serde_json::from_slice(body) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, body_len = body.len(), "rejecting malformed move request");
                return HandlerResponse::text(StatusCode::BAD_REQUEST, MALFORMED_BODY);
            }
        };

        let (Some(load_id), Some(x), Some(y)) =
            (request.load_id.and_then(LoadId::into_string), request.x, request.y)
        else {
            return HandlerResponse::text(StatusCode::BAD_REQUEST, MISSING_PARAMETERS_BODY);
        };

        let within_distance = request
            .within_distance
            .unwrap_or(self.default_within_distance);
        if within_distance < 0.0 {
            return HandlerResponse::text(StatusCode::BAD_REQUEST, INVALID_THRESHOLD_BODY);
        }

        info!(load_id = %load_id, x, y, within_distance, "move request");
        let selection = SelectionRequest::new(Point::new(x, y), within_distance);
        match self.dispatcher.find_robot(selection).await {
            Ok(Some(robot)) => {
                let payload = MoveResponse {
                    load_id: &load_id,
                    robot: &robot,
                };
                match serde_json::to_string(&payload) {
                    Ok(json) => HandlerResponse::json(StatusCode::OK, json),
                    Err(e) => {
                        warn!(load_id = %load_id, error = %e, "response serialization failed");
                        HandlerResponse::text(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY)
                    }
                }
            }
            Ok(None) => HandlerResponse::no_content(),
            Err(e) => {
                warn!(load_id = %load_id, error = %e, "dispatch failed");
                HandlerResponse::text(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY)
            }
        }
    }
}
