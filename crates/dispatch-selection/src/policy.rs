//! Distance gate, then battery maximisation.
//!
//! [`select`] applies the two-stage rule:
//!
//! 1. Keep only robots with `distance <= within_distance` (the candidates).
//! 2. No candidates → `None`.  One candidate → that robot, whatever its
//!    battery.  Several → the highest `battery_level`; equal battery goes to
//!    the closer robot, and equal distance to the one listed first.
//!
//! # Example
//!
//! ```rust
//! use dispatch_selection::{enrich, select};
//! use dispatch_types::{Point, Robot};
//!
//! let robots = vec![
//!     Robot::new("A", 50, Point::new(0.0, 3.0)),
//!     Robot::new("B", 90, Point::new(0.0, 4.0)),
//! ];
//! let enriched = enrich(&robots, Point::new(0.0, 0.0)).unwrap();
//!
//! assert_eq!(select(&enriched, 5.0).unwrap().unwrap().id(), "B");
//! assert_eq!(select(&enriched, 3.5).unwrap().unwrap().id(), "A");
//! assert!(select(&enriched, 1.0).unwrap().is_none());
//! ```

use dispatch_types::{DispatchError, EnrichedRobot};
use tracing::debug;

/// Robots within `within_distance` of the target, in input order.
pub fn filter_by_distance(robots: &[EnrichedRobot], within_distance: f64) -> Vec<EnrichedRobot> {
    robots
        .iter()
        .filter(|r| r.distance <= within_distance)
        .cloned()
        .collect()
}

/// Closest first.  Robots at equal distance keep their input order.
pub fn sort_by_distance(robots: &[EnrichedRobot]) -> Vec<EnrichedRobot> {
    let mut sorted = robots.to_vec();
    sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    sorted
}

/// Highest battery first.  Robots with equal battery keep their input order.
pub fn sort_by_battery(robots: &[EnrichedRobot]) -> Vec<EnrichedRobot> {
    let mut sorted = robots.to_vec();
    sorted.sort_by(|a, b| b.battery_level().cmp(&a.battery_level()));
    sorted
}

/// Pick the best robot for a load.
///
/// Returns `Ok(None)` when no robot is within `within_distance`.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidInput`] when `within_distance` is NaN or
/// negative.
pub fn select(
    robots: &[EnrichedRobot],
    within_distance: f64,
) -> Result<Option<EnrichedRobot>, DispatchError> {
    if within_distance.is_nan() || within_distance < 0.0 {
        return Err(DispatchError::InvalidInput(format!(
            "withinDistance must be a non-negative number, got {within_distance}"
        )));
    }

    let candidates = sort_by_distance(&filter_by_distance(robots, within_distance));
    debug!(
        total = robots.len(),
        candidates = candidates.len(),
        within_distance,
        "distance gate applied"
    );

    let chosen = match candidates.len() {
        0 => None,
        1 => candidates.into_iter().next(),
        // Stable sort keeps the distance order among equal batteries.
        _ => sort_by_battery(&candidates).into_iter().next(),
    };
    Ok(chosen)
}
