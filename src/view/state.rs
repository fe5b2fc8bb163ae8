use crate::entities::{
    cheapest, Coordinates, DestinationCandidate, FuelStation, RouteDetail, RouteOutcome,
    SearchResults, Theme, Viewport,
};
use crate::error::{invalid_input_error, Error};

use super::sequence::{Sequence, Ticket};
use super::surface::{
    CheapestBadge, Glyph, MapSurface, Marker, RouteInfo, RouteLayer, ROUTE_FILL, ROUTE_OUTLINE,
};

pub const INITIAL_CENTER: Coordinates = Coordinates {
    latitude: 39.8283,
    longitude: -98.5795,
};
pub const INITIAL_ZOOM: f64 = 4.0;
pub const LOCATED_ZOOM: f64 = 12.0;
pub const DESTINATION_ZOOM: f64 = 11.0;

/// State behind one map page. Async work is split into `begin_*`, which
/// hands out a ticket, and `apply_*`, which drops the result unless that
/// ticket is still the latest of its kind.
#[derive(Debug)]
pub struct MapView {
    viewport: Viewport,
    user_location: Option<Coordinates>,
    query: String,
    candidates: Vec<DestinationCandidate>,
    destination: Option<DestinationCandidate>,
    route: Option<RouteDetail>,
    stations: Vec<FuelStation>,
    selected_station: Option<u32>,
    issue: Option<Error>,
    searches: Sequence,
    routes: Sequence,
    station_loads: Sequence,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(INITIAL_CENTER, INITIAL_ZOOM),
            user_location: None,
            query: String::new(),
            candidates: vec![],
            destination: None,
            route: None,
            stations: vec![],
            selected_station: None,
            issue: None,
            searches: Sequence::default(),
            routes: Sequence::default(),
            station_loads: Sequence::default(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    pub fn destination(&self) -> Option<&DestinationCandidate> {
        self.destination.as_ref()
    }

    pub fn route(&self) -> Option<&RouteDetail> {
        self.route.as_ref()
    }

    pub fn stations(&self) -> &[FuelStation] {
        &self.stations
    }

    pub fn candidates(&self) -> &[DestinationCandidate] {
        &self.candidates
    }

    pub fn candidate(&self, id: &str) -> Option<&DestinationCandidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn issue(&self) -> Option<&Error> {
        self.issue.as_ref()
    }

    pub fn cheapest_station(&self) -> Option<&FuelStation> {
        cheapest(&self.stations)
    }

    pub fn apply_location(&mut self, location: Coordinates) {
        self.user_location = Some(location);
        self.viewport = Viewport::new(location, LOCATED_ZOOM);
    }

    pub fn begin_search(&mut self, query: &str) -> Ticket {
        self.query = query.to_string();
        self.searches.issue()
    }

    pub fn apply_search(&mut self, ticket: Ticket, results: SearchResults) -> bool {
        if !self.searches.is_current(ticket) {
            tracing::debug!("discarding results of a superseded search");
            return false;
        }

        self.candidates = results.candidates;
        self.issue = results.error;
        true
    }

    pub fn select_destination(&mut self, candidate: DestinationCandidate) {
        self.viewport = Viewport::new(
            candidate.coordinates,
            self.viewport.zoom.max(DESTINATION_ZOOM),
        );
        self.destination = Some(candidate);
        self.routes.invalidate();
    }

    pub fn begin_stations(&mut self) -> Ticket {
        self.station_loads.issue()
    }

    pub fn apply_stations(&mut self, ticket: Ticket, stations: Vec<FuelStation>) -> bool {
        if !self.station_loads.is_current(ticket) {
            tracing::debug!("discarding stations for a superseded center");
            return false;
        }

        self.stations = stations;
        self.selected_station = None;
        true
    }

    pub fn begin_route(&mut self) -> Option<(Ticket, Coordinates, Coordinates)> {
        let origin = self.user_location?;
        let destination = self.destination.as_ref()?.coordinates;

        Some((self.routes.issue(), origin, destination))
    }

    /// A failed computation leaves the previously drawn route in place.
    pub fn apply_route(&mut self, ticket: Ticket, outcome: RouteOutcome) -> bool {
        if !self.routes.is_current(ticket) {
            tracing::debug!("discarding a superseded route");
            return false;
        }

        match outcome {
            RouteOutcome::Found { route, viewport } => {
                self.route = Some(route);
                self.viewport = viewport;
                self.issue = None;
            }
            RouteOutcome::NoRoute => {
                tracing::warn!("no route found, keeping the previous one");
            }
            RouteOutcome::Unavailable { error } => {
                tracing::warn!("route unavailable, keeping the previous one: {}", error);
                self.issue = Some(error);
            }
        }

        true
    }

    pub fn clear_route(&mut self) {
        self.route = None;
        self.destination = None;
        self.query.clear();
        self.candidates.clear();
        self.routes.invalidate();
        self.searches.invalidate();
    }

    pub fn select_station(&mut self, id: u32) -> Result<(), Error> {
        if !self.stations.iter().any(|station| station.id == id) {
            return Err(invalid_input_error());
        }

        self.selected_station = Some(id);
        Ok(())
    }

    pub fn close_popup(&mut self) {
        self.selected_station = None;
    }

    pub fn snapshot(&self, theme: Theme) -> MapSurface {
        let cheapest_id = self.cheapest_station().map(|station| station.id);

        let mut markers = vec![];

        if let Some(location) = self.user_location {
            markers.push(Marker {
                coordinates: location,
                glyph: Glyph::User,
            });
        }

        if let Some(destination) = &self.destination {
            markers.push(Marker {
                coordinates: destination.coordinates,
                glyph: Glyph::Destination,
            });
        }

        markers.extend(self.stations.iter().map(|station| Marker {
            coordinates: station.coordinates,
            glyph: Glyph::Station {
                id: station.id,
                cheapest: Some(station.id) == cheapest_id,
            },
        }));

        let route_layer = self.route.as_ref().map(|route| RouteLayer {
            geometry: route.geometry.clone(),
            fill: ROUTE_FILL,
            outline: ROUTE_OUTLINE,
        });

        let route_info = self.route.as_ref().map(|route| RouteInfo {
            distance: route.distance_text.clone(),
            duration: route.duration_text.clone(),
        });

        // the badge shares its slot with the route info card
        let cheapest_badge = match route_info {
            Some(_) => None,
            None => self.cheapest_station().map(|station| CheapestBadge {
                name: station.name.clone(),
                price_per_gallon: station.price_per_gallon,
            }),
        };

        let popup = self.selected_station.and_then(|id| {
            self.stations
                .iter()
                .find(|station| station.id == id)
                .cloned()
        });

        MapSurface {
            theme,
            map_style: theme.map_style(),
            viewport: self.viewport,
            markers,
            route_layer,
            popup,
            route_info,
            cheapest_badge,
            query: self.query.clone(),
            candidates: self.candidates.clone(),
            issue: self.issue.clone(),
        }
    }
}

#[cfg(test)]
fn candidate(id: &str, latitude: f64, longitude: f64) -> DestinationCandidate {
    use crate::entities::RoutePreview;

    DestinationCandidate {
        id: id.into(),
        display_name: id.into(),
        address: format!("{} street", id),
        coordinates: Coordinates::new(latitude, longitude).unwrap(),
        route_preview: Some(RoutePreview {
            distance_text: "1.0 mi".into(),
            duration_text: "2 min".into(),
        }),
    }
}

#[cfg(test)]
fn found(geometry: Vec<Coordinates>) -> RouteOutcome {
    use crate::entities::{BoundingBox, FitOptions};

    let bounds = BoundingBox::covering(geometry.clone()).unwrap();

    RouteOutcome::Found {
        route: RouteDetail {
            distance_text: "10.0 mi".into(),
            duration_text: "25 min".into(),
            geometry,
        },
        viewport: Viewport::fit(&bounds, &FitOptions::default()),
    }
}

#[cfg(test)]
fn located_view() -> MapView {
    let mut view = MapView::new();
    view.apply_location(Coordinates::new(34.0, -118.0).unwrap());
    view
}

#[test]
fn initial_view_test() {
    let view = MapView::new();

    assert_eq!(view.viewport().center, INITIAL_CENTER);
    assert_eq!(view.viewport().zoom, INITIAL_ZOOM);
    assert!(view.snapshot(Theme::Light).markers.is_empty());
}

#[test]
fn location_centers_view_test() {
    let view = located_view();

    assert_eq!(view.viewport().zoom, LOCATED_ZOOM);
    assert_eq!(
        view.viewport().center,
        Coordinates::new(34.0, -118.0).unwrap()
    );
}

#[test]
fn later_search_wins_test() {
    let mut view = MapView::new();

    let older = view.begin_search("pari");
    let newer = view.begin_search("paris");

    // the newer search lands first, then the older one straggles in
    assert!(view.apply_search(newer, SearchResults::found(vec![candidate("paris", 48.85, 2.35)])));
    assert!(!view.apply_search(older, SearchResults::found(vec![candidate("parika", 6.8, -58.4)])));

    assert_eq!(view.candidates().len(), 1);
    assert_eq!(view.candidates()[0].id, "paris");
    assert_eq!(view.snapshot(Theme::Light).query, "paris");
}

#[test]
fn search_failure_is_surfaced_test() {
    use crate::error::missing_token_error;

    let mut view = MapView::new();

    let ticket = view.begin_search("paris");
    view.apply_search(ticket, SearchResults::failed(missing_token_error()));

    assert!(view.candidates().is_empty());
    assert!(view.issue().unwrap().is_missing_token());

    let ticket = view.begin_search("paris");
    view.apply_search(ticket, SearchResults::found(vec![]));
    assert!(view.issue().is_none());
}

#[test]
fn destination_zoom_never_zooms_out_test() {
    let mut view = MapView::new();
    view.select_destination(candidate("a", 10.0, 10.0));
    assert_eq!(view.viewport().zoom, DESTINATION_ZOOM);

    let mut view = located_view();
    view.select_destination(candidate("a", 10.0, 10.0));
    assert_eq!(view.viewport().zoom, LOCATED_ZOOM);
    assert_eq!(view.viewport().center, Coordinates::new(10.0, 10.0).unwrap());
}

#[test]
fn route_requires_both_endpoints_test() {
    let mut view = MapView::new();
    view.select_destination(candidate("a", 10.0, 10.0));
    assert!(view.begin_route().is_none());

    let mut view = located_view();
    assert!(view.begin_route().is_none());

    view.select_destination(candidate("a", 10.0, 10.0));
    let (_, origin, destination) = view.begin_route().unwrap();
    assert_eq!(origin, Coordinates::new(34.0, -118.0).unwrap());
    assert_eq!(destination, Coordinates::new(10.0, 10.0).unwrap());
}

#[test]
fn route_applies_and_fits_viewport_test() {
    let mut view = located_view();
    view.select_destination(candidate("a", 34.5, -118.5));

    let (ticket, origin, destination) = view.begin_route().unwrap();
    let outcome = found(vec![origin, destination]);
    let expected_viewport = match &outcome {
        RouteOutcome::Found { viewport, .. } => *viewport,
        _ => unreachable!(),
    };

    assert!(view.apply_route(ticket, outcome));
    assert_eq!(view.viewport(), expected_viewport);

    let surface = view.snapshot(Theme::Light);
    let layer = surface.route_layer.unwrap();
    assert_eq!(layer.geometry, vec![origin, destination]);
    assert_eq!(layer.fill, ROUTE_FILL);
    assert_eq!(layer.outline, ROUTE_OUTLINE);
    assert_eq!(
        surface.route_info,
        Some(RouteInfo {
            distance: "10.0 mi".into(),
            duration: "25 min".into()
        })
    );
}

#[test]
fn failed_route_keeps_previous_route_test() {
    use crate::error::upstream_error;

    let mut view = located_view();
    view.select_destination(candidate("a", 34.5, -118.5));
    let (ticket, origin, destination) = view.begin_route().unwrap();
    view.apply_route(ticket, found(vec![origin, destination]));

    view.select_destination(candidate("b", 35.0, -119.0));
    let (ticket, _, _) = view.begin_route().unwrap();
    assert!(view.apply_route(ticket, RouteOutcome::NoRoute));
    assert_eq!(view.route().unwrap().geometry, vec![origin, destination]);

    let (ticket, _, _) = view.begin_route().unwrap();
    view.apply_route(
        ticket,
        RouteOutcome::Unavailable {
            error: upstream_error(),
        },
    );
    assert_eq!(view.route().unwrap().geometry, vec![origin, destination]);
    assert_eq!(view.issue(), Some(&upstream_error()));
}

#[test]
fn stale_route_is_ignored_test() {
    let mut view = located_view();
    view.select_destination(candidate("a", 34.5, -118.5));
    let (older, origin, _) = view.begin_route().unwrap();

    view.select_destination(candidate("b", 35.0, -119.0));
    let (newer, _, destination) = view.begin_route().unwrap();

    assert!(view.apply_route(newer, found(vec![origin, destination])));
    assert!(!view.apply_route(older, found(vec![origin])));
    assert_eq!(view.route().unwrap().geometry, vec![origin, destination]);
}

#[test]
fn new_destination_drops_in_flight_route_test() {
    let mut view = located_view();
    view.select_destination(candidate("a", 34.5, -118.5));
    let (ticket, origin, destination) = view.begin_route().unwrap();

    view.select_destination(candidate("b", 35.0, -119.0));

    assert!(!view.apply_route(ticket, found(vec![origin, destination])));
    assert!(view.route().is_none());
    assert_eq!(view.viewport().center, Coordinates::new(35.0, -119.0).unwrap());
}

#[test]
fn clear_route_drops_in_flight_results_test() {
    let mut view = located_view();
    let search = view.begin_search("a");
    view.select_destination(candidate("a", 34.5, -118.5));
    let (ticket, origin, destination) = view.begin_route().unwrap();

    view.clear_route();

    assert!(!view.apply_route(ticket, found(vec![origin, destination])));
    assert!(!view.apply_search(search, SearchResults::found(vec![candidate("a", 1.0, 1.0)])));
    assert!(view.route().is_none());
    assert!(view.destination().is_none());
    assert!(view.candidates().is_empty());
    assert_eq!(view.snapshot(Theme::Light).query, "");
}

#[test]
fn stations_replace_wholesale_test() {
    use crate::stations::MockStations;

    let mut view = located_view();
    let center = view.user_location().unwrap();

    let ticket = view.begin_stations();
    assert!(view.apply_stations(ticket, MockStations::generate(center)));
    view.select_station(1).unwrap();
    assert_eq!(view.snapshot(Theme::Light).popup.map(|s| s.name), Some("Shell".into()));

    let elsewhere = Coordinates::new(10.0, 10.0).unwrap();
    let ticket = view.begin_stations();
    assert!(view.apply_stations(ticket, MockStations::generate(elsewhere)));

    assert!(view.snapshot(Theme::Light).popup.is_none());
    assert!(view
        .stations()
        .iter()
        .all(|station| (station.coordinates.latitude - 10.0).abs() < 0.1));
}

#[test]
fn select_unknown_station_test() {
    let mut view = MapView::new();

    assert_eq!(view.select_station(7), Err(invalid_input_error()));
}

#[test]
fn snapshot_markers_and_badge_test() {
    use crate::stations::MockStations;

    let mut view = located_view();
    let center = view.user_location().unwrap();
    let ticket = view.begin_stations();
    view.apply_stations(ticket, MockStations::generate(center));

    let surface = view.snapshot(Theme::Dark);

    assert_eq!(surface.map_style, "mapbox://styles/mapbox/dark-v11");
    assert_eq!(surface.markers.len(), 4);
    assert_eq!(surface.markers[0].glyph, Glyph::User);
    assert_eq!(
        surface.markers[2].glyph,
        Glyph::Station {
            id: 2,
            cheapest: true
        }
    );
    assert_eq!(
        surface.cheapest_badge,
        Some(CheapestBadge {
            name: "BP".into(),
            price_per_gallon: 3.39
        })
    );

    // the route card takes the badge's place
    view.select_destination(candidate("a", 34.5, -118.5));
    let (ticket, origin, destination) = view.begin_route().unwrap();
    view.apply_route(ticket, found(vec![origin, destination]));

    let surface = view.snapshot(Theme::Light);
    assert!(surface.cheapest_badge.is_none());
    assert_eq!(surface.markers[1].glyph, Glyph::Destination);
}
