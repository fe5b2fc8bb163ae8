mod location_api;
mod route_api;
mod search_api;
mod station_api;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::{Directions, Geocoder, LocationProvider, StationLookup, API},
    config::Config,
    entities::FitOptions,
    error::Error,
    external::MapboxClient,
    location::StaticLocation,
    stations::MockStations,
};

const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Engine {
    geocoder: Arc<dyn Geocoder + Send + Sync>,
    directions: Arc<dyn Directions + Send + Sync>,
    stations: Arc<dyn StationLookup + Send + Sync>,
    locator: Arc<dyn LocationProvider + Send + Sync>,
    fit: FitOptions,
    location_timeout: Duration,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mapbox = Arc::new(MapboxClient::from_config(config)?);

        let engine = Self::from_parts(
            mapbox.clone(),
            mapbox,
            Arc::new(MockStations),
            Arc::new(StaticLocation(config.location)),
        )
        .with_fit(config.fit)
        .with_location_timeout(config.location_timeout);

        Ok(engine)
    }

    pub fn from_parts(
        geocoder: Arc<dyn Geocoder + Send + Sync>,
        directions: Arc<dyn Directions + Send + Sync>,
        stations: Arc<dyn StationLookup + Send + Sync>,
        locator: Arc<dyn LocationProvider + Send + Sync>,
    ) -> Self {
        Self {
            geocoder,
            directions,
            stations,
            locator,
            fit: FitOptions::default(),
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
        }
    }

    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }
}

impl API for Engine {}
