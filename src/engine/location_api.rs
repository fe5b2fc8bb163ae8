use super::Engine;

use async_trait::async_trait;

use crate::{api::LocationAPI, entities::Coordinates};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn locate(&self) -> Option<Coordinates> {
        match tokio::time::timeout(self.location_timeout, self.locator.current_location()).await {
            Ok(Some(location)) if location.is_valid() => Some(location),
            Ok(Some(location)) => {
                tracing::warn!("discarding out of range location {:?}", location);
                None
            }
            Ok(None) => {
                tracing::info!("location unavailable");
                None
            }
            Err(_) => {
                tracing::warn!("location request timed out after {:?}", self.location_timeout);
                None
            }
        }
    }
}

#[tokio::test]
async fn locate_static_test() {
    use crate::location::StaticLocation;
    use crate::testing::{FakeDirections, FakeGeocoder};
    use std::sync::Arc;

    let here = Coordinates::new(34.0522, -118.2437).unwrap();

    for (configured, expected) in [(Some(here), Some(here)), (None, None)] {
        let engine = Engine::from_parts(
            Arc::new(FakeGeocoder::default()),
            Arc::new(FakeDirections::default()),
            Arc::new(crate::stations::MockStations),
            Arc::new(StaticLocation(configured)),
        );

        assert_eq!(engine.locate().await, expected);
    }
}

#[tokio::test]
async fn locate_times_out_test() {
    use crate::testing::{FakeDirections, FakeGeocoder, SlowLocation};
    use std::sync::Arc;
    use std::time::Duration;

    let here = Coordinates::new(34.0522, -118.2437).unwrap();
    let engine = Engine::from_parts(
        Arc::new(FakeGeocoder::default()),
        Arc::new(FakeDirections::default()),
        Arc::new(crate::stations::MockStations),
        Arc::new(SlowLocation(here, Duration::from_secs(5))),
    )
    .with_location_timeout(Duration::from_millis(20));

    assert_eq!(engine.locate().await, None);
}

#[tokio::test]
async fn locate_rejects_out_of_range_test() {
    use crate::location::StaticLocation;
    use crate::testing::{FakeDirections, FakeGeocoder};
    use std::sync::Arc;

    let bogus = Coordinates {
        latitude: 123.0,
        longitude: 0.0,
    };
    let engine = Engine::from_parts(
        Arc::new(FakeGeocoder::default()),
        Arc::new(FakeDirections::default()),
        Arc::new(crate::stations::MockStations),
        Arc::new(StaticLocation(Some(bogus))),
    );

    assert_eq!(engine.locate().await, None);
}
