use super::Engine;

use async_trait::async_trait;
use futures::future::join_all;

use crate::{
    api::SearchAPI,
    entities::{Coordinates, DestinationCandidate, RouteFidelity, RoutePreview, SearchResults},
};

const SEARCH_LIMIT: usize = 5;

#[async_trait]
impl SearchAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str, user_location: Option<Coordinates>) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            return SearchResults::default();
        }

        let places = match self.geocoder.geocode(query, SEARCH_LIMIT).await {
            Ok(places) => places,
            Err(err) => {
                tracing::warn!("geocoding failed: {}", err);
                return SearchResults::failed(err);
            }
        };

        if places.is_empty() {
            tracing::info!("no places matched");
            return SearchResults::default();
        }

        // previews settle together; candidates keep the geocoder's order
        let previews = join_all(
            places
                .iter()
                .map(|place| self.preview(user_location, place.coordinates)),
        )
        .await;

        let candidates = places
            .into_iter()
            .zip(previews)
            .map(|(place, preview)| DestinationCandidate::new(place, preview))
            .collect();

        SearchResults::found(candidates)
    }
}

impl Engine {
    async fn preview(
        &self,
        user_location: Option<Coordinates>,
        destination: Coordinates,
    ) -> Option<RoutePreview> {
        let origin = user_location?;

        match self
            .directions
            .route(origin, destination, RouteFidelity::Preview)
            .await
        {
            Ok(Some(route)) => Some(route.preview()),
            Ok(None) => {
                tracing::debug!("no preview route to {:?}", destination);
                None
            }
            Err(err) => {
                tracing::warn!("preview route to {:?} failed: {}", destination, err);
                None
            }
        }
    }
}

#[cfg(test)]
fn engine(
    geocoder: std::sync::Arc<crate::testing::FakeGeocoder>,
    directions: std::sync::Arc<crate::testing::FakeDirections>,
) -> Engine {
    use std::sync::Arc;

    use crate::location::StaticLocation;
    use crate::stations::MockStations;

    Engine::from_parts(
        geocoder,
        directions,
        Arc::new(MockStations),
        Arc::new(StaticLocation(None)),
    )
}

#[cfg(test)]
fn home() -> Option<Coordinates> {
    Some(Coordinates::new(1.0, 1.0).unwrap())
}

#[tokio::test]
async fn blank_query_skips_geocoding_test() {
    use std::sync::Arc;

    use crate::testing::{place, FakeDirections, FakeGeocoder};

    let geocoder = Arc::new(FakeGeocoder::with_places(vec![place("a", 10.0, 0.0)]));
    let directions = Arc::new(FakeDirections::default());
    let engine = engine(geocoder.clone(), directions.clone());

    for query in ["", "   ", "\t\n"] {
        let results = engine.search(query, home()).await;
        assert!(results.candidates.is_empty());
        assert!(results.error.is_none());
    }

    assert_eq!(geocoder.calls(), 0);
    assert_eq!(directions.calls(), 0);
}

#[tokio::test]
async fn zero_features_is_empty_not_error_test() {
    use std::sync::Arc;

    use crate::testing::{FakeDirections, FakeGeocoder};

    let geocoder = Arc::new(FakeGeocoder::default());
    let directions = Arc::new(FakeDirections::default());
    let engine = engine(geocoder.clone(), directions.clone());

    let results = engine.search("atlantis", home()).await;

    assert!(results.candidates.is_empty());
    assert!(results.error.is_none());
    assert_eq!(geocoder.calls(), 1);
    assert_eq!(directions.calls(), 0);
}

#[tokio::test]
async fn candidates_keep_geocoder_order_test() {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::testing::{place, FakeDirections, FakeGeocoder};

    let first = place("first", 30.0, 0.0);
    let geocoder = Arc::new(FakeGeocoder::with_places(vec![
        first.clone(),
        place("second", 20.0, 0.0),
        place("third", 10.0, 0.0),
    ]));
    // the first preview settles last
    let directions = Arc::new(FakeDirections {
        slow: vec![(first.coordinates, Duration::from_millis(50))],
        ..Default::default()
    });
    let engine = engine(geocoder, directions.clone());

    let results = engine.search("coffee", home()).await;

    let ids: Vec<_> = results.candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);

    let distances: Vec<_> = results
        .candidates
        .iter()
        .map(|c| c.route_preview.as_ref().unwrap().distance_text.as_str())
        .collect();
    assert_eq!(distances, vec!["30.0 mi", "20.0 mi", "10.0 mi"]);

    assert_eq!(directions.calls(), 3);
    assert!(directions
        .fidelities
        .lock()
        .unwrap()
        .iter()
        .all(|f| *f == RouteFidelity::Preview));
}

#[tokio::test]
async fn failed_preview_degrades_one_candidate_test() {
    use std::sync::Arc;

    use crate::testing::{place, FakeDirections, FakeGeocoder};

    let broken = place("broken", 20.0, 0.0);
    let unroutable = place("island", 15.0, 0.0);
    let geocoder = Arc::new(FakeGeocoder::with_places(vec![
        place("ok", 30.0, 0.0),
        broken.clone(),
        unroutable.clone(),
    ]));
    let directions = Arc::new(FakeDirections {
        failing: vec![broken.coordinates],
        unroutable: vec![unroutable.coordinates],
        ..Default::default()
    });
    let engine = engine(geocoder, directions);

    let results = engine.search("coffee", home()).await;

    assert!(results.error.is_none());
    assert_eq!(results.candidates.len(), 3);
    assert!(results.candidates[0].route_preview.is_some());
    assert!(results.candidates[1].route_preview.is_none());
    assert!(results.candidates[2].route_preview.is_none());
}

#[tokio::test]
async fn no_user_location_skips_previews_test() {
    use std::sync::Arc;

    use crate::testing::{place, FakeDirections, FakeGeocoder};

    let geocoder = Arc::new(FakeGeocoder::with_places(vec![
        place("a", 10.0, 0.0),
        place("b", 11.0, 0.0),
    ]));
    let directions = Arc::new(FakeDirections::default());
    let engine = engine(geocoder, directions.clone());

    let results = engine.search("coffee", None).await;

    assert_eq!(results.candidates.len(), 2);
    assert!(results.candidates.iter().all(|c| c.route_preview.is_none()));
    assert_eq!(directions.calls(), 0);
}

#[tokio::test]
async fn geocoding_failure_is_reported_test() {
    use std::sync::Arc;

    use crate::error::{missing_token_error, Error};
    use crate::testing::{FakeDirections, FakeGeocoder};

    let geocoder = Arc::new(FakeGeocoder {
        error: Some(missing_token_error()),
        ..Default::default()
    });
    let engine = engine(geocoder, Arc::new(FakeDirections::default()));

    let results = engine.search("coffee", home()).await;

    assert!(results.candidates.is_empty());
    assert_eq!(results.error.as_ref().map(Error::is_missing_token), Some(true));
}

#[tokio::test]
async fn search_caps_result_count_test() {
    use std::sync::Arc;

    use crate::testing::{place, FakeDirections, FakeGeocoder};

    let places = (0..8).map(|i| place(&format!("p{}", i), i as f64, 0.0)).collect();
    let engine = engine(
        Arc::new(FakeGeocoder::with_places(places)),
        Arc::new(FakeDirections::default()),
    );

    let results = engine.search("coffee", None).await;

    assert_eq!(results.candidates.len(), 5);
}
