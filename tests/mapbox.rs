//! Integration tests for `MapboxClient` against wiremock HTTP mocks.

use std::time::Duration;

use fuelmap::api::{Directions, Geocoder};
use fuelmap::entities::{Coordinates, RouteFidelity};
use fuelmap::error::{invalid_input_error, rejected_token_error, upstream_error};
use fuelmap::external::MapboxClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MapboxClient {
    MapboxClient::new(base_url, Some("test-token".into()), Duration::from_secs(5))
        .expect("client construction should not fail")
}

fn paris() -> Coordinates {
    Coordinates::new(48.8566, 2.3522).unwrap()
}

fn bordeaux() -> Coordinates {
    Coordinates::new(44.8378, -0.5792).unwrap()
}

fn assert_near(actual: Coordinates, expected: Coordinates) {
    assert!((actual.latitude - expected.latitude).abs() < 1e-9, "{:?}", actual);
    assert!((actual.longitude - expected.longitude).abs() < 1e-9, "{:?}", actual);
}

const DIRECTIONS_PATH: &str = "/directions/v5/mapbox/driving/2.3522,48.8566;-0.5792,44.8378";

#[tokio::test]
async fn geocode_maps_features_to_places() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "id": "place.123",
                "text": "Paris",
                "place_name": "Paris, France",
                "center": [2.3522, 48.8566]
            },
            {
                "id": "place.456",
                "text": "Paris",
                "place_name": "Paris, Texas, United States",
                "center": [-95.5555, 33.6609]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Paris.json"))
        .and(query_param("access_token", "test-token"))
        .and(query_param("limit", "5"))
        .and(query_param("types", "place,address,poi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .geocode("Paris", 5)
        .await
        .expect("should parse features");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].id, "place.123");
    assert_eq!(places[0].place_name, "Paris, France");
    assert_near(places[0].coordinates, paris());
    assert!((places[1].coordinates.longitude + 95.5555).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_without_features_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/zzzzqx.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "features": [] })),
        )
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .geocode("zzzzqx", 5)
        .await
        .expect("empty collection is not an error");

    assert!(places.is_empty());
}

#[tokio::test]
async fn full_route_requests_full_overview_with_steps() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "code": "Ok",
        "routes": [
            {
                "distance": 584_000.0,
                "duration": 19_800.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[2.3522, 48.8566], [0.6848, 47.3941], [-0.5792, 44.8378]]
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .and(query_param("access_token", "test-token"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("overview", "full"))
        .and(query_param("steps", "true"))
        .and(query_param("alternatives", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let route = test_client(&server.uri())
        .route(paris(), bordeaux(), RouteFidelity::Full)
        .await
        .expect("should parse route")
        .expect("one route returned");

    assert_eq!(route.distance_meters, 584_000.0);
    assert_eq!(route.duration_seconds, 19_800.0);
    assert_eq!(route.geometry.len(), 3);
    assert_near(route.geometry[0], paris());
    assert_near(route.geometry[2], bordeaux());

    let preview = route.preview();
    assert_eq!(preview.distance_text, "362.9 mi");
    assert_eq!(preview.duration_text, "330 min");
}

#[tokio::test]
async fn preview_route_requests_simplified_overview() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "code": "Ok",
        "routes": [{ "distance": 1609.34, "duration": 90.0 }]
    });

    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .and(query_param("overview", "simplified"))
        .and(query_param("steps", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let route = test_client(&server.uri())
        .route(paris(), bordeaux(), RouteFidelity::Preview)
        .await
        .expect("should parse route")
        .expect("one route returned");

    assert!(route.geometry.is_empty());
    assert_eq!(route.preview().distance_text, "1.0 mi");
    assert_eq!(route.preview().duration_text, "2 min");
}

#[tokio::test]
async fn no_routes_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "code": "NoRoute", "routes": [] }),
        ))
        .mount(&server)
        .await;

    let route = test_client(&server.uri())
        .route(paris(), bordeaux(), RouteFidelity::Full)
        .await
        .expect("empty route list is not an error");

    assert!(route.is_none());
}

#[tokio::test]
async fn server_error_maps_to_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let err = client.geocode("Paris", 5).await.unwrap_err();
    assert_eq!(err, upstream_error());
    assert!(err.is_transport());

    let err = client
        .route(paris(), bordeaux(), RouteFidelity::Preview)
        .await
        .unwrap_err();
    assert_eq!(err, upstream_error());
}

#[tokio::test]
async fn rejected_request_maps_to_invalid_input() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "message": "Query too long" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("Paris", 5)
        .await
        .unwrap_err();

    assert_eq!(err, invalid_input_error());
    assert!(!err.is_configuration());
}

#[tokio::test]
async fn refused_token_is_a_configuration_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v5/mapbox.places/Paris.json"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Not Authorized - Invalid Token" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let err = client.geocode("Paris", 5).await.unwrap_err();
    assert_eq!(err, rejected_token_error());
    assert!(err.is_configuration());

    let err = client
        .route(paris(), bordeaux(), RouteFidelity::Full)
        .await
        .unwrap_err();
    assert_eq!(err, rejected_token_error());
}

#[tokio::test]
async fn missing_token_never_hits_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = MapboxClient::new(&server.uri(), None, Duration::from_secs(5)).unwrap();

    let err = client.geocode("Paris", 5).await.unwrap_err();
    assert!(err.is_missing_token());

    let err = client
        .route(paris(), bordeaux(), RouteFidelity::Full)
        .await
        .unwrap_err();
    assert!(err.is_missing_token());
}
