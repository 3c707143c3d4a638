//! [`Dispatcher`] – picks a robot for one load request.
//!
//! Each call to [`Dispatcher::find_robot`]:
//!
//! 1. **Fetch** – awaits a fresh snapshot from the [`RobotSource`] and
//!    rejects it if a robot id repeats.
//! 2. **Enrich** – computes every robot's distance to the target point.
//! 3. **Select** – applies the distance gate and battery tie-break.
//!
//! Concurrent calls share nothing but the source handle; every call works on
//! its own snapshot.  Failures are returned unchanged, never retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dispatch_runtime::Dispatcher;
//! use dispatch_source::StaticRobotSource;
//! use dispatch_types::{Point, SelectionRequest};
//!
//! # async fn demo() {
//! let source = StaticRobotSource::builtin().unwrap();
//! let dispatcher = Dispatcher::new(Arc::new(source));
//! let best = dispatcher
//!     .find_robot(SelectionRequest::at(Point::new(5.0, 3.0)))
//!     .await
//!     .unwrap();
//! # }
//! ```

use std::sync::Arc;

use dispatch_selection::{enrich, select};
use dispatch_source::{RobotSource, check_unique_ids};
use dispatch_types::{DispatchError, EnrichedRobot, SelectionRequest};
use tracing::{debug, info, warn};

/// Orchestrates fetch → enrich → select against a shared [`RobotSource`].
#[derive(Clone)]
pub struct Dispatcher {
    source: Arc<dyn RobotSource>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn RobotSource>) -> Self {
        Self { source }
    }

    /// Find the best robot for `request`.
    ///
    /// Returns `Ok(None)` when no robot is within
    /// [`SelectionRequest::within_distance`] of the target.
    ///
    /// # Errors
    ///
    /// * [`DispatchError::SourceUnavailable`] – the robot listing could not be
    ///   fetched or decoded, or it lists a robot id twice.
    /// * [`DispatchError::InvalidInput`] – the target, threshold, or a robot
    ///   record is malformed.
    pub async fn find_robot(
        &self,
        request: SelectionRequest,
    ) -> Result<Option<EnrichedRobot>, DispatchError> {
        let target = request.target;

        let robots = self.source.fetch_available().await.inspect_err(|e| {
            warn!(x = target.x, y = target.y, error = %e, "robot fetch failed");
        })?;
        check_unique_ids(&robots).inspect_err(|e| {
            warn!(robots = robots.len(), error = %e, "robot listing rejected");
        })?;
        debug!(count = robots.len(), "available robots");

        let enriched = enrich(&robots, target).inspect_err(|e| {
            warn!(
                x = target.x,
                y = target.y,
                robots = robots.len(),
                error = %e,
                "robot enrichment failed"
            );
        })?;

        let chosen = select(&enriched, request.within_distance).inspect_err(|e| {
            warn!(
                within_distance = request.within_distance,
                robots = enriched.len(),
                error = %e,
                "robot selection failed"
            );
        })?;

        match &chosen {
            Some(robot) => info!(
                robot_id = %robot.id(),
                battery_level = robot.battery_level(),
                distance = robot.distance,
                "robot selected"
            ),
            None => info!(
                x = target.x,
                y = target.y,
                within_distance = request.within_distance,
                "no robot within range"
            ),
        }
        Ok(chosen)
    }
}
