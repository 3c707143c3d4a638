use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Proximity threshold applied when a caller does not supply one.
pub const DEFAULT_WITHIN_DISTANCE: f64 = 10.0;

/// A coordinate on the shared 2-D plane robots and loads live on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Identity and status record as reported by the robot-listing service.
///
/// On the wire the position is flattened:
/// `{"robotId": "1", "batteryLevel": 99, "x": 48, "y": 92}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Robot {
    #[serde(rename = "robotId")]
    pub id: String,
    /// Current charge, 0–100 inclusive.
    pub battery_level: u8,
    #[serde(flatten)]
    pub position: Point,
}

impl Robot {
    pub fn new(id: impl Into<String>, battery_level: u8, position: Point) -> Self {
        Self {
            id: id.into(),
            battery_level,
            position,
        }
    }
}

/// A [`Robot`] snapshot plus its distance to a request's target point.
///
/// Created per request and discarded once the response is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRobot {
    #[serde(flatten)]
    pub robot: Robot,
    /// Euclidean distance to the target point; never negative.
    pub distance: f64,
}

impl EnrichedRobot {
    pub fn id(&self) -> &str {
        &self.robot.id
    }

    pub fn battery_level(&self) -> u8 {
        self.robot.battery_level
    }
}

/// Target point and proximity threshold supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub target: Point,
    pub within_distance: f64,
}

impl SelectionRequest {
    pub fn new(target: Point, within_distance: f64) -> Self {
        Self {
            target,
            within_distance,
        }
    }

    /// Request at `target` using [`DEFAULT_WITHIN_DISTANCE`].
    pub fn at(target: Point) -> Self {
        Self::new(target, DEFAULT_WITHIN_DISTANCE)
    }
}

/// Failures surfaced by the robot source, enrichment, or selection.
///
/// "No robot within range" is not an error; it is reported as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Robot source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_decodes_listing_shape() {
        let json = r#"{"robotId":"7","batteryLevel":24,"y":66,"x":13}"#;
        let robot: Robot = serde_json::from_str(json).unwrap();
        assert_eq!(robot.id, "7");
        assert_eq!(robot.battery_level, 24);
        assert_eq!(robot.position, Point::new(13.0, 66.0));
    }

    #[test]
    fn robot_without_coordinates_is_rejected() {
        let json = r#"{"robotId":"7","batteryLevel":24,"x":13}"#;
        assert!(serde_json::from_str::<Robot>(json).is_err());
    }

    #[test]
    fn robot_with_string_coordinate_is_rejected() {
        let json = r#"{"robotId":"7","batteryLevel":24,"x":"13","y":4}"#;
        assert!(serde_json::from_str::<Robot>(json).is_err());
    }

    #[test]
    fn enriched_robot_serializes_flat() {
        let enriched = EnrichedRobot {
            robot: Robot::new("A", 50, Point::new(0.0, 3.0)),
            distance: 3.0,
        };
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["robotId"], "A");
        assert_eq!(value["batteryLevel"], 50);
        assert_eq!(value["x"], 0.0);
        assert_eq!(value["y"], 3.0);
        assert_eq!(value["distance"], 3.0);
    }

    #[test]
    fn point_finiteness() {
        assert!(Point::new(1.0, -2.5).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn selection_request_defaults_threshold() {
        let req = SelectionRequest::at(Point::new(1.0, 1.0));
        assert_eq!(req.within_distance, DEFAULT_WITHIN_DISTANCE);
    }

    #[test]
    fn dispatch_error_display() {
        let err = DispatchError::SourceUnavailable("connection refused".into());
        assert!(err.to_string().contains("unavailable"));
        let err = DispatchError::InvalidInput("robot 3 has a non-finite position".into());
        assert!(err.to_string().contains("robot 3"));
    }
}
