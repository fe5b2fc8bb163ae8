mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, post},
    Router,
};

use crate::server::handlers::{routes, search, stations, theme, view};
use crate::{
    api::{DynAPI, API},
    error::{unexpected_error, Error},
    theme::ThemeStore,
    view::MapController,
};

pub fn router(api: DynAPI, theme: ThemeStore) -> Router {
    let controller = Arc::new(MapController::new(api.clone(), theme.clone()));

    Router::new()
        .route("/search", get(search::search))
        .route("/routes", post(routes::create))
        .route("/stations", get(stations::nearby))
        .route("/stations/best", get(stations::best))
        .route("/view", get(view::find))
        .route("/view/locate", post(view::locate))
        .route("/view/search", post(view::search))
        .route("/view/destination", post(view::select_destination))
        .route("/view/route", delete(view::clear_route))
        .route("/view/stations/:id/select", post(view::select_station))
        .route("/view/popup", delete(view::close_popup))
        .route("/theme", get(theme::find))
        .route("/theme/toggle", post(theme::toggle))
        .layer(Extension(api))
        .layer(Extension(controller))
        .layer(Extension(theme))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    theme: ThemeStore,
    addr: SocketAddr,
) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api, theme);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}

#[cfg(test)]
fn app() -> axum::Router {
    use crate::engine::Engine;
    use crate::entities::Coordinates;
    use crate::location::StaticLocation;
    use crate::stations::MockStations;
    use crate::testing::{place, FakeDirections, FakeGeocoder};

    let engine = Engine::from_parts(
        Arc::new(FakeGeocoder::with_places(vec![
            place("museum", 2.0, 2.0),
            place("park", 3.0, 3.0),
        ])),
        Arc::new(FakeDirections::default()),
        Arc::new(MockStations),
        Arc::new(StaticLocation(Some(Coordinates::new(1.0, 1.0).unwrap()))),
    );

    router(Arc::new(engine), ThemeStore::default())
}

#[cfg(test)]
async fn call(
    app: &axum::Router,
    method: axum::http::Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

#[tokio::test]
async fn search_endpoint_test() {
    use axum::http::{Method, StatusCode};

    let app = app();

    let (status, json) = call(&app, Method::GET, "/search?q=museum&lat=1&lng=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["candidates"][0]["id"], "museum");
    assert_eq!(
        json["candidates"][0]["route_preview"]["distance_text"],
        "2.0 mi"
    );
    assert!(json["error"].is_null());

    let (status, json) = call(&app, Method::GET, "/search?q=%20%20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["candidates"].as_array().unwrap().len(), 0);

    let (status, _) = call(&app, Method::GET, "/search?q=museum&lat=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn route_endpoint_test() {
    use axum::http::{Method, StatusCode};

    let app = app();

    let body = serde_json::json!({
        "origin": { "latitude": 1.0, "longitude": 1.0 },
        "destination": { "latitude": 16.0934, "longitude": 1.0 },
    });
    let (status, json) = call(&app, Method::POST, "/routes", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "found");
    assert_eq!(json["route"]["distance_text"], "16.1 mi");
    assert!(json["viewport"]["zoom"].as_f64().is_some());

    let body = serde_json::json!({
        "origin": { "latitude": 100.0, "longitude": 1.0 },
        "destination": { "latitude": 1.0, "longitude": 1.0 },
    });
    let (status, json) = call(&app, Method::POST, "/routes", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 101);
}

#[tokio::test]
async fn stations_endpoint_test() {
    use axum::http::{Method, StatusCode};

    let app = app();

    let (status, json) = call(&app, Method::GET, "/stations?lat=34.05&lng=-118.24", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stations"].as_array().unwrap().len(), 3);
    assert_eq!(json["cheapest"]["name"], "BP");

    let (status, json) = call(
        &app,
        Method::GET,
        "/stations/best?lat=34.05&lng=-118.24&mpg=30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["station"]["name"], "BP");

    let (status, _) = call(
        &app,
        Method::GET,
        "/stations/best?lat=34.05&lng=-118.24&mpg=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn view_flow_test() {
    use axum::http::{Method, StatusCode};

    let app = app();

    let (_, json) = call(&app, Method::GET, "/view", None).await;
    assert_eq!(json["viewport"]["zoom"], 4.0);

    let (_, json) = call(&app, Method::POST, "/view/locate", None).await;
    assert_eq!(json["viewport"]["zoom"], 12.0);
    assert_eq!(json["cheapest_badge"]["name"], "BP");

    let body = serde_json::json!({ "query": "museum" });
    let (_, json) = call(&app, Method::POST, "/view/search", Some(body)).await;
    assert_eq!(json["candidates"].as_array().unwrap().len(), 2);

    let body = serde_json::json!({ "id": "park" });
    let (status, json) = call(&app, Method::POST, "/view/destination", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["route_info"]["distance"], "3.0 mi");
    assert!(json["cheapest_badge"].is_null());

    let (status, json) = call(&app, Method::POST, "/view/stations/1/select", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["popup"]["name"], "Shell");

    let (_, json) = call(&app, Method::DELETE, "/view/popup", None).await;
    assert!(json["popup"].is_null());

    let (status, _) = call(&app, Method::POST, "/view/stations/9/select", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = call(&app, Method::DELETE, "/view/route", None).await;
    assert!(json["route_layer"].is_null());
    assert!(json["route_info"].is_null());
}

#[tokio::test]
async fn theme_endpoint_test() {
    use axum::http::Method;

    let app = app();

    let (_, json) = call(&app, Method::GET, "/theme", None).await;
    assert_eq!(json, "light");

    let (_, json) = call(&app, Method::POST, "/theme/toggle", None).await;
    assert_eq!(json, "dark");

    let (_, json) = call(&app, Method::GET, "/view", None).await;
    assert_eq!(json["map_style"], "mapbox://styles/mapbox/dark-v11");
}
