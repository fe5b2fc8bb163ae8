//! End-to-end checks of the map view driven by a config-built engine.

use std::sync::Arc;

use fuelmap::config::Config;
use fuelmap::engine::Engine;
use fuelmap::entities::Theme;
use fuelmap::theme::ThemeStore;
use fuelmap::view::{Glyph, MapController, LOCATED_ZOOM};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(server: &MockServer, token: Option<&str>) -> MapController {
    let base = server.uri();
    let token = token.map(String::from);

    let config = Config::from_lookup(move |key: &str| match key {
        "MAPBOX_API_BASE" => Some(base.clone()),
        "MAPBOX_ACCESS_TOKEN" => token.clone(),
        "FUELMAP_LOCATION" => Some("34.0522,-118.2437".into()),
        _ => None,
    })
    .expect("config should load");

    let engine = Engine::new(&config).expect("engine should build");

    MapController::new(Arc::new(engine), ThemeStore::default())
}

#[tokio::test]
async fn missing_token_surfaces_as_issue_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let controller = controller(&server, None);

    controller.locate().await.expect("configured location");
    controller.search("coffee").await;

    let surface = controller.snapshot().await;
    assert!(surface.candidates.is_empty());
    assert!(surface.issue.expect("issue is shown").is_missing_token());

    // stations do not need a token
    let stations = surface
        .markers
        .iter()
        .filter(|marker| matches!(marker.glyph, Glyph::Station { .. }))
        .count();
    assert_eq!(stations, 3);
    assert_eq!(surface.viewport.zoom, LOCATED_ZOOM);
    assert_eq!(surface.theme, Theme::Light);
}

#[tokio::test]
async fn search_and_route_through_mapbox() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/griffith.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": [{
                "id": "poi.1",
                "text": "Griffith Observatory",
                "place_name": "Griffith Observatory, 2800 E Observatory Rd, Los Angeles",
                "center": [-118.3004, 34.1184]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/directions/v5/mapbox/driving/-118.2437,34.0522;-118.3004,34.1184",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "Ok",
            "routes": [{
                "distance": 12_874.72,
                "duration": 1_260.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-118.2437, 34.0522], [-118.2700, 34.0900], [-118.3004, 34.1184]]
                }
            }]
        })))
        .mount(&server)
        .await;

    let controller = controller(&server, Some("test-token"));

    controller.locate().await.expect("configured location");
    assert!(controller.search("griffith").await);

    let surface = controller.snapshot().await;
    assert!(surface.issue.is_none());
    assert_eq!(surface.candidates.len(), 1);
    assert_eq!(surface.candidates[0].display_name, "Griffith Observatory");
    let preview = surface.candidates[0]
        .route_preview
        .clone()
        .expect("preview from user location");
    assert_eq!(preview.distance_text, "8.0 mi");
    assert_eq!(preview.duration_text, "21 min");

    controller
        .select_destination("poi.1")
        .await
        .expect("candidate is known");

    let surface = controller.snapshot().await;
    let info = surface.route_info.expect("route is shown");
    assert_eq!(info.distance, "8.0 mi");
    assert_eq!(info.duration, "21 min");
    assert_eq!(surface.route_layer.expect("route layer").geometry.len(), 3);
    assert!(surface.cheapest_badge.is_none());
    assert!(surface
        .markers
        .iter()
        .any(|marker| marker.glyph == Glyph::Destination));
}
