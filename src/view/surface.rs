use serde::Serialize;

use crate::entities::{Coordinates, DestinationCandidate, FuelStation, Theme, Viewport};
use crate::error::Error;

pub const ROUTE_FILL: LinePaint = LinePaint {
    color: "#3b82f6",
    width: 5.0,
    opacity: 0.8,
};

pub const ROUTE_OUTLINE: LinePaint = LinePaint {
    color: "#ffffff",
    width: 7.0,
    opacity: 0.3,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapSurface {
    pub theme: Theme,
    pub map_style: &'static str,
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
    pub route_layer: Option<RouteLayer>,
    pub popup: Option<FuelStation>,
    pub route_info: Option<RouteInfo>,
    pub cheapest_badge: Option<CheapestBadge>,
    pub query: String,
    pub candidates: Vec<DestinationCandidate>,
    pub issue: Option<Error>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub glyph: Glyph,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Glyph {
    User,
    Destination,
    Station { id: u32, cheapest: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteLayer {
    pub geometry: Vec<Coordinates>,
    pub fill: LinePaint,
    pub outline: LinePaint,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinePaint {
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteInfo {
    pub distance: String,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheapestBadge {
    pub name: String,
    pub price_per_gallon: f64,
}
