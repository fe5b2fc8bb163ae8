mod controller;
mod sequence;
mod state;
mod surface;

pub use controller::MapController;
pub use sequence::{Sequence, Ticket};
pub use state::{MapView, DESTINATION_ZOOM, INITIAL_CENTER, INITIAL_ZOOM, LOCATED_ZOOM};
pub use surface::{
    CheapestBadge, Glyph, LinePaint, MapSurface, Marker, RouteInfo, RouteLayer, ROUTE_FILL,
    ROUTE_OUTLINE,
};
