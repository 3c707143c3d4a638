//! `dispatch-source` – where the list of available robots comes from.
//!
//! The selection policy never talks to the outside world.  It is handed a
//! snapshot fetched through the [`RobotSource`] trait.
//!
//! # Overview
//!
//! - [`RobotSource`] – the trait every source implements.
//! - [`HttpRobotSource`][http::HttpRobotSource] – fetches the listing from a
//!   remote JSON endpoint.
//! - [`StaticRobotSource`][fixture::StaticRobotSource] – serves an in-memory
//!   list, including the built-in 100-robot fixture.  Use it in tests and
//!   when the remote listing is down.

pub mod fixture;
pub mod http;

use std::collections::HashSet;

use async_trait::async_trait;
use dispatch_types::{DispatchError, Robot};

pub use fixture::StaticRobotSource;
pub use http::{HttpRobotSource, SourceError, DEFAULT_ROBOTS_URL, MAX_LISTING_BYTES};

/// Supplier of the current robot snapshot.
///
/// # Contract
///
/// * `fetch_available` returns every available robot, unfiltered and
///   unpaginated, or [`DispatchError::SourceUnavailable`].  Implementations
///   do not retry.
/// * Robot ids are unique within one snapshot.  Callers enforce this with
///   [`check_unique_ids`] rather than trusting the source.
#[async_trait]
pub trait RobotSource: Send + Sync {
    async fn fetch_available(&self) -> Result<Vec<Robot>, DispatchError>;
}

/// Reject a snapshot that lists the same robot id twice.
///
/// # Errors
///
/// Returns [`DispatchError::SourceUnavailable`] naming the first repeated id.
pub fn check_unique_ids(robots: &[Robot]) -> Result<(), DispatchError> {
    let mut seen = HashSet::with_capacity(robots.len());
    for robot in robots {
        if !seen.insert(robot.id.as_str()) {
            return Err(DispatchError::SourceUnavailable(format!(
                "duplicate robot id {:?} in listing",
                robot.id
            )));
        }
    }
    Ok(())
}
