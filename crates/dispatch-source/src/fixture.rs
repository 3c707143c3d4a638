//! [`StaticRobotSource`] – in-process robot listing for tests and offline runs.
//!
//! Each instance owns its own list and hands out a fresh copy on every fetch,
//! so one test's source never leaks into another's.
//!
//! # Example
//!
//! ```rust
//! use dispatch_source::StaticRobotSource;
//!
//! let source = StaticRobotSource::builtin().unwrap();
//! assert_eq!(source.len(), 100);
//! ```

use async_trait::async_trait;
use dispatch_types::{DispatchError, Robot};

use crate::RobotSource;

/// The 100-robot listing the service ships with.
const BUILTIN_ROBOTS: &str = include_str!("fixtures/robots.json");

/// A [`RobotSource`] backed by a fixed, owned list of robots.
#[derive(Debug, Clone, Default)]
pub struct StaticRobotSource {
    robots: Vec<Robot>,
}

impl StaticRobotSource {
    /// Serve exactly `robots`.
    pub fn new(robots: Vec<Robot>) -> Self {
        Self { robots }
    }

    /// A source with no robots at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in 100-robot fixture.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::SourceUnavailable`] if the embedded listing
    /// does not decode.
    pub fn builtin() -> Result<Self, DispatchError> {
        let robots = serde_json::from_str(BUILTIN_ROBOTS).map_err(|e| {
            DispatchError::SourceUnavailable(format!("built-in robot listing is corrupt: {e}"))
        })?;
        Ok(Self::new(robots))
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }
}

#[async_trait]
impl RobotSource for StaticRobotSource {
    async fn fetch_available(&self) -> Result<Vec<Robot>, DispatchError> {
        Ok(self.robots.clone())
    }
}
