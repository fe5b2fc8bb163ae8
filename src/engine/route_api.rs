use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{BoundingBox, Coordinates, RouteDetail, RouteFidelity, RouteOutcome, Viewport},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn compute_route(&self, origin: Coordinates, destination: Coordinates) -> RouteOutcome {
        let route = match self
            .directions
            .route(origin, destination, RouteFidelity::Full)
            .await
        {
            Ok(Some(route)) => route,
            Ok(None) => {
                tracing::warn!("no route between origin and destination");
                return RouteOutcome::NoRoute;
            }
            Err(err) => {
                tracing::warn!("route computation failed: {}", err);
                return RouteOutcome::Unavailable { error: err };
            }
        };

        let route = RouteDetail::from(route);

        // fall back to the endpoints when upstream sent no geometry
        let bounds = route
            .bounding_box()
            .or_else(|| BoundingBox::covering([origin, destination]));

        let viewport = match bounds {
            Some(bounds) => Viewport::fit(&bounds, &self.fit),
            None => Viewport::new(destination, 12.0),
        };

        tracing::info!(
            "route found: {}, {}",
            route.distance_text,
            route.duration_text
        );

        RouteOutcome::Found { route, viewport }
    }
}

#[cfg(test)]
fn engine(directions: std::sync::Arc<crate::testing::FakeDirections>) -> Engine {
    use std::sync::Arc;

    Engine::from_parts(
        Arc::new(crate::testing::FakeGeocoder::default()),
        directions,
        Arc::new(crate::stations::MockStations),
        Arc::new(crate::location::StaticLocation(None)),
    )
}

#[tokio::test]
async fn compute_route_found_test() {
    use crate::testing::FakeDirections;
    use std::sync::Arc;

    let directions = Arc::new(FakeDirections::default());
    let engine = engine(directions.clone());

    let origin = Coordinates::new(0.0, 0.0).unwrap();
    let destination = Coordinates::new(10.0, 20.0).unwrap();

    match engine.compute_route(origin, destination).await {
        RouteOutcome::Found { route, viewport } => {
            assert_eq!(route.distance_text, "10.0 mi");
            assert_eq!(route.duration_text, "10 min");
            assert_eq!(route.geometry.len(), 3);

            let bounds = route.bounding_box().unwrap();
            assert_eq!(bounds.south_west, origin);
            assert_eq!(bounds.north_east, destination);
            assert!((viewport.center.longitude - 10.0).abs() < 1e-6);
        }
        other => panic!("expected a route, got {:?}", other),
    }

    assert_eq!(
        *directions.fidelities.lock().unwrap(),
        vec![RouteFidelity::Full]
    );
}

#[tokio::test]
async fn compute_route_no_route_test() {
    use crate::testing::FakeDirections;
    use std::sync::Arc;

    let destination = Coordinates::new(10.0, 20.0).unwrap();
    let engine = engine(Arc::new(FakeDirections {
        unroutable: vec![destination],
        ..Default::default()
    }));

    let outcome = engine
        .compute_route(Coordinates::new(0.0, 0.0).unwrap(), destination)
        .await;

    assert_eq!(outcome, RouteOutcome::NoRoute);
}

#[tokio::test]
async fn compute_route_failure_test() {
    use crate::error::upstream_error;
    use crate::testing::FakeDirections;
    use std::sync::Arc;

    let destination = Coordinates::new(10.0, 20.0).unwrap();
    let engine = engine(Arc::new(FakeDirections {
        failing: vec![destination],
        ..Default::default()
    }));

    let outcome = engine
        .compute_route(Coordinates::new(0.0, 0.0).unwrap(), destination)
        .await;

    assert_eq!(
        outcome,
        RouteOutcome::Unavailable {
            error: upstream_error()
        }
    );
}
