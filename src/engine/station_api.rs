use super::Engine;

use async_trait::async_trait;

use crate::{
    api::StationAPI,
    entities::{best_value, Coordinates, FuelStation, StationCost},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl StationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn nearby_stations(&self, center: Coordinates) -> Result<Vec<FuelStation>, Error> {
        if !center.is_valid() {
            return Err(invalid_input_error());
        }

        let stations = self.stations.nearby(center).await?;
        tracing::debug!("found {} stations", stations.len());

        Ok(stations)
    }

    #[tracing::instrument(skip(self))]
    async fn best_value_station(
        &self,
        origin: Coordinates,
        mpg: f64,
        tank_gallons: f64,
    ) -> Result<Option<StationCost>, Error> {
        let stations = self.nearby_stations(origin).await?;

        best_value(&origin, &stations, mpg, tank_gallons)
    }
}

#[tokio::test]
async fn nearby_stations_test() {
    use crate::entities::cheapest;
    use crate::location::StaticLocation;
    use crate::stations::MockStations;
    use crate::testing::{FakeDirections, FakeGeocoder};
    use std::sync::Arc;

    let engine = Engine::from_parts(
        Arc::new(FakeGeocoder::default()),
        Arc::new(FakeDirections::default()),
        Arc::new(MockStations),
        Arc::new(StaticLocation(None)),
    );

    let center = Coordinates::new(40.7128, -74.006).unwrap();
    let stations = engine.nearby_stations(center).await.unwrap();

    assert_eq!(stations, MockStations::generate(center));
    assert_eq!(cheapest(&stations).map(|s| s.id), Some(2));

    let best = engine
        .best_value_station(center, 30.0, 10.0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(best.station.name, "BP");

    assert!(engine
        .nearby_stations(Coordinates {
            latitude: -91.0,
            longitude: 0.0
        })
        .await
        .is_err());
}
