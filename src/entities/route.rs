use serde::{Deserialize, Serialize};

use crate::entities::{BoundingBox, Coordinates, Viewport};
use crate::error::Error;

pub const METERS_PER_MILE: f64 = 1609.34;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteFidelity {
    Preview,
    Full,
}

impl RouteFidelity {
    pub fn overview(&self) -> &'static str {
        match self {
            Self::Preview => "simplified",
            Self::Full => "full",
        }
    }

    pub fn steps(&self) -> bool {
        matches!(self, Self::Full)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrivingRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<Coordinates>,
}

impl DrivingRoute {
    pub fn preview(&self) -> RoutePreview {
        RoutePreview {
            distance_text: distance_text(self.distance_meters),
            duration_text: duration_text(self.duration_seconds),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePreview {
    pub distance_text: String,
    pub duration_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDetail {
    pub distance_text: String,
    pub duration_text: String,
    pub geometry: Vec<Coordinates>,
}

impl RouteDetail {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::covering(self.geometry.iter().copied())
    }
}

impl From<DrivingRoute> for RouteDetail {
    fn from(route: DrivingRoute) -> Self {
        Self {
            distance_text: distance_text(route.distance_meters),
            duration_text: duration_text(route.duration_seconds),
            geometry: route.geometry,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found { route: RouteDetail, viewport: Viewport },
    NoRoute,
    Unavailable { error: Error },
}

/// Meters to miles, one decimal place. Ties round up.
pub fn distance_text(meters: f64) -> String {
    let miles = (meters / METERS_PER_MILE * 10.0).round() / 10.0;

    format!("{:.1} mi", miles)
}

pub fn duration_text(seconds: f64) -> String {
    format!("{} min", (seconds / 60.0).round() as i64)
}

#[test]
fn display_conversion_test() {
    assert_eq!(distance_text(16093.4), "10.0 mi");
    assert_eq!(duration_text(1500.0), "25 min");

    assert_eq!(distance_text(0.0), "0.0 mi");
    assert_eq!(distance_text(2414.01), "1.5 mi");
    assert_eq!(duration_text(89.0), "1 min");
    assert_eq!(duration_text(90.0), "2 min");
    assert_eq!(duration_text(29.0), "0 min");
}

#[test]
fn distance_ties_round_up_test() {
    assert_eq!(distance_text(402.335), "0.3 mi");
    assert_eq!(distance_text(2011.675), "1.3 mi");
    assert_eq!(distance_text(3621.015), "2.3 mi");
}

#[test]
fn route_fidelity_params_test() {
    assert_eq!(RouteFidelity::Full.overview(), "full");
    assert!(RouteFidelity::Full.steps());
    assert_eq!(RouteFidelity::Preview.overview(), "simplified");
    assert!(!RouteFidelity::Preview.steps());
}
