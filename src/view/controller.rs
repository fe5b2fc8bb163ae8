use tokio::sync::Mutex;

use crate::{
    api::DynAPI,
    entities::Coordinates,
    error::{invalid_input_error, Error},
    theme::ThemeStore,
};

use super::{MapSurface, MapView};

/// Drives a [`MapView`] from async engine calls. The view lock is never
/// held across a network call; results are applied afterwards and only if
/// their ticket is still current.
pub struct MapController {
    api: DynAPI,
    view: Mutex<MapView>,
    theme: ThemeStore,
}

impl MapController {
    pub fn new(api: DynAPI, theme: ThemeStore) -> Self {
        Self {
            api,
            view: Mutex::new(MapView::new()),
            theme,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn locate(&self) -> Option<Coordinates> {
        let location = self.api.locate().await?;

        self.view.lock().await.apply_location(location);
        self.load_stations(location).await;
        self.refresh_route().await;

        Some(location)
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> bool {
        let (ticket, user_location) = {
            let mut view = self.view.lock().await;
            (view.begin_search(query), view.user_location())
        };

        let results = self.api.search(query, user_location).await;

        self.view.lock().await.apply_search(ticket, results)
    }

    #[tracing::instrument(skip(self))]
    pub async fn select_destination(&self, id: &str) -> Result<(), Error> {
        let destination = {
            let mut view = self.view.lock().await;
            let candidate = view
                .candidate(id)
                .cloned()
                .ok_or_else(invalid_input_error)?;
            let destination = candidate.coordinates;

            view.select_destination(candidate);
            destination
        };

        self.load_stations(destination).await;
        self.refresh_route().await;

        Ok(())
    }

    pub async fn refresh_route(&self) -> bool {
        let (ticket, origin, destination) = match self.view.lock().await.begin_route() {
            Some(request) => request,
            None => return false,
        };

        let outcome = self.api.compute_route(origin, destination).await;

        self.view.lock().await.apply_route(ticket, outcome)
    }

    pub async fn clear_route(&self) {
        self.view.lock().await.clear_route();
    }

    pub async fn select_station(&self, id: u32) -> Result<(), Error> {
        self.view.lock().await.select_station(id)
    }

    pub async fn close_popup(&self) {
        self.view.lock().await.close_popup();
    }

    pub async fn snapshot(&self) -> MapSurface {
        let theme = self.theme.current();
        self.view.lock().await.snapshot(theme)
    }

    async fn load_stations(&self, center: Coordinates) -> bool {
        let ticket = self.view.lock().await.begin_stations();

        let stations = match self.api.nearby_stations(center).await {
            Ok(stations) => stations,
            Err(err) => {
                tracing::warn!("station lookup failed: {}", err);
                vec![]
            }
        };

        self.view.lock().await.apply_stations(ticket, stations)
    }
}

#[cfg(test)]
fn home() -> Coordinates {
    Coordinates::new(1.0, 1.0).unwrap()
}

#[cfg(test)]
fn controller(
    geocoder: crate::testing::ScriptedGeocoder,
    directions: crate::testing::FakeDirections,
    location: Option<Coordinates>,
) -> std::sync::Arc<MapController> {
    use std::sync::Arc;

    use crate::engine::Engine;
    use crate::location::StaticLocation;
    use crate::stations::MockStations;

    let engine = Engine::from_parts(
        Arc::new(geocoder),
        Arc::new(directions),
        Arc::new(MockStations),
        Arc::new(StaticLocation(location)),
    );

    Arc::new(MapController::new(Arc::new(engine), ThemeStore::default()))
}

#[tokio::test]
async fn slow_older_search_is_discarded_test() {
    use std::time::Duration;

    use crate::testing::{place, FakeDirections, ScriptedGeocoder};

    let geocoder = ScriptedGeocoder::default()
        .script("pari", Duration::from_millis(100), vec![place("parika", 6.8, -58.4)])
        .script("paris", Duration::ZERO, vec![place("paris", 48.85, 2.35)]);
    let controller = controller(geocoder, FakeDirections::default(), None);

    let older = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.search("pari").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(controller.search("paris").await);
    assert!(!older.await.unwrap());

    let surface = controller.snapshot().await;
    assert_eq!(surface.query, "paris");
    assert_eq!(surface.candidates.len(), 1);
    assert_eq!(surface.candidates[0].id, "paris");
}

#[tokio::test]
async fn locate_loads_stations_test() {
    use crate::testing::{FakeDirections, ScriptedGeocoder};

    let controller = controller(
        ScriptedGeocoder::default(),
        FakeDirections::default(),
        Some(home()),
    );

    assert_eq!(controller.locate().await, Some(home()));

    let surface = controller.snapshot().await;
    assert_eq!(surface.viewport.center, home());
    assert_eq!(surface.markers.len(), 4);
    assert_eq!(surface.cheapest_badge.unwrap().name, "BP");
}

#[tokio::test]
async fn locate_unavailable_keeps_initial_view_test() {
    use crate::testing::{FakeDirections, ScriptedGeocoder};

    let controller = controller(ScriptedGeocoder::default(), FakeDirections::default(), None);

    assert_eq!(controller.locate().await, None);

    let surface = controller.snapshot().await;
    assert_eq!(surface.viewport.center, crate::view::INITIAL_CENTER);
    assert!(surface.markers.is_empty());
}

#[tokio::test]
async fn select_destination_routes_from_user_test() {
    use std::time::Duration;

    use crate::testing::{place, FakeDirections, ScriptedGeocoder};
    use crate::view::Glyph;

    let geocoder = ScriptedGeocoder::default().script(
        "museum",
        Duration::ZERO,
        vec![place("museum", 2.0, 2.0)],
    );
    let controller = controller(geocoder, FakeDirections::default(), Some(home()));

    controller.locate().await;
    assert!(controller.search("museum").await);

    let surface = controller.snapshot().await;
    let preview = surface.candidates[0].route_preview.clone().unwrap();
    assert_eq!(preview.distance_text, "2.0 mi");

    controller.select_destination("museum").await.unwrap();

    let surface = controller.snapshot().await;
    let info = surface.route_info.unwrap();
    assert_eq!(info.distance, "2.0 mi");
    assert_eq!(info.duration, "2 min");
    assert_eq!(surface.route_layer.unwrap().geometry.len(), 3);
    assert!(surface
        .markers
        .iter()
        .any(|marker| marker.glyph == Glyph::Destination));

    // stations now surround the destination
    assert!(surface.markers.iter().any(|marker| matches!(
        marker.glyph,
        Glyph::Station { .. }
    ) && (marker.coordinates.latitude - 2.0).abs() < 0.1));
}

#[tokio::test]
async fn unroutable_destination_keeps_route_test() {
    use std::time::Duration;

    use crate::testing::{place, FakeDirections, ScriptedGeocoder};

    let island = place("island", 3.0, 3.0);
    let geocoder = ScriptedGeocoder::default().script(
        "places",
        Duration::ZERO,
        vec![place("museum", 2.0, 2.0), island.clone()],
    );
    let directions = FakeDirections {
        unroutable: vec![island.coordinates],
        ..Default::default()
    };
    let controller = controller(geocoder, directions, Some(home()));

    controller.locate().await;
    controller.search("places").await;
    controller.select_destination("museum").await.unwrap();
    controller.select_destination("island").await.unwrap();

    let surface = controller.snapshot().await;
    assert_eq!(surface.route_info.unwrap().distance, "2.0 mi");
}

#[tokio::test]
async fn clear_during_route_discards_it_test() {
    use std::time::Duration;

    use crate::testing::{place, FakeDirections, ScriptedGeocoder};

    let museum = place("museum", 2.0, 2.0);
    let geocoder =
        ScriptedGeocoder::default().script("museum", Duration::ZERO, vec![museum.clone()]);
    let directions = FakeDirections {
        slow: vec![(museum.coordinates, Duration::from_millis(100))],
        ..Default::default()
    };
    let controller = controller(geocoder, directions, Some(home()));

    controller.locate().await;
    controller.search("museum").await;

    let selecting = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.select_destination("museum").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    controller.clear_route().await;
    selecting.await.unwrap().unwrap();

    let surface = controller.snapshot().await;
    assert!(surface.route_layer.is_none());
    assert!(surface.candidates.is_empty());
}

#[tokio::test]
async fn unknown_destination_is_rejected_test() {
    use crate::testing::{FakeDirections, ScriptedGeocoder};

    let controller = controller(ScriptedGeocoder::default(), FakeDirections::default(), None);

    assert!(controller.select_destination("nowhere").await.is_err());
}

#[tokio::test]
async fn popup_follows_selection_test() {
    use crate::testing::{FakeDirections, ScriptedGeocoder};

    let controller = controller(
        ScriptedGeocoder::default(),
        FakeDirections::default(),
        Some(home()),
    );
    controller.locate().await;

    controller.select_station(3).await.unwrap();
    assert_eq!(controller.snapshot().await.popup.unwrap().name, "Chevron");

    controller.close_popup().await;
    assert!(controller.snapshot().await.popup.is_none());
}

#[tokio::test]
async fn snapshot_follows_theme_test() {
    use std::sync::Arc;

    use crate::engine::Engine;
    use crate::entities::Theme;
    use crate::location::StaticLocation;
    use crate::stations::MockStations;
    use crate::testing::{FakeDirections, ScriptedGeocoder};

    let theme = ThemeStore::default();
    let engine = Engine::from_parts(
        Arc::new(ScriptedGeocoder::default()),
        Arc::new(FakeDirections::default()),
        Arc::new(MockStations),
        Arc::new(StaticLocation(None)),
    );
    let controller = MapController::new(Arc::new(engine), theme.clone());

    assert_eq!(controller.snapshot().await.theme, Theme::Light);
    theme.toggle();
    assert_eq!(controller.snapshot().await.theme, Theme::Dark);
}
