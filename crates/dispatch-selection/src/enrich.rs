//! Distance computation and robot enrichment.
//!
//! # Example
//!
//! ```rust
//! use dispatch_selection::enrich::enrich;
//! use dispatch_types::{Point, Robot};
//!
//! let robots = vec![Robot::new("A", 50, Point::new(0.0, 3.0))];
//! let enriched = enrich(&robots, Point::new(0.0, 0.0)).unwrap();
//! assert_eq!(enriched[0].distance, 3.0);
//! // The caller's snapshot is untouched and can be reused.
//! assert_eq!(robots[0].id, "A");
//! ```

use dispatch_types::{DispatchError, EnrichedRobot, Point, Robot};

/// Highest battery level a well-formed robot record may report.
const MAX_BATTERY_LEVEL: u8 = 100;

/// Euclidean distance between `a` and `b`.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Copy every robot in `robots` into an [`EnrichedRobot`] carrying its
/// distance to `target`.  Length and order are preserved.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidInput`] when `target` is not finite, or
/// when any robot has a non-finite coordinate or a battery level above 100.
/// Nothing is returned for the other robots in that case.
pub fn enrich(robots: &[Robot], target: Point) -> Result<Vec<EnrichedRobot>, DispatchError> {
    if !target.is_finite() {
        return Err(DispatchError::InvalidInput(format!(
            "target point ({}, {}) is not numeric",
            target.x, target.y
        )));
    }

    robots
        .iter()
        .map(|robot| {
            validate(robot)?;
            Ok(EnrichedRobot {
                robot: robot.clone(),
                distance: distance(target, robot.position),
            })
        })
        .collect()
}

fn validate(robot: &Robot) -> Result<(), DispatchError> {
    if !robot.position.is_finite() {
        return Err(DispatchError::InvalidInput(format!(
            "robot {} has a non-numeric position",
            robot.id
        )));
    }
    if robot.battery_level > MAX_BATTERY_LEVEL {
        return Err(DispatchError::InvalidInput(format!(
            "robot {} reports battery level {} (expected 0-100)",
            robot.id, robot.battery_level
        )));
    }
    Ok(())
}
