mod coordinates;
mod place;
mod route;
mod station;
mod theme;
mod viewport;

pub use coordinates::Coordinates;
pub use place::{DestinationCandidate, Place, SearchResults};
pub use route::{
    distance_text, duration_text, DrivingRoute, RouteDetail, RouteFidelity, RouteOutcome,
    RoutePreview,
};
pub use station::{
    approximate_miles, best_value, cheapest, FuelStation, StationCost, DEFAULT_TANK_GALLONS,
};
pub use theme::Theme;
pub use viewport::{BoundingBox, FitOptions, Viewport};
