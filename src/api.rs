use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Coordinates, DrivingRoute, FuelStation, Place, RouteFidelity, RouteOutcome, SearchResults,
    StationCost,
};
use crate::error::Error;

// Seams the engine is built from.

#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<Place>, Error>;
}

#[async_trait]
pub trait Directions {
    /// `Ok(None)` when the provider found no route.
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        fidelity: RouteFidelity,
    ) -> Result<Option<DrivingRoute>, Error>;
}

#[async_trait]
pub trait StationLookup {
    async fn nearby(&self, center: Coordinates) -> Result<Vec<FuelStation>, Error>;
}

#[async_trait]
pub trait LocationProvider {
    async fn current_location(&self) -> Option<Coordinates>;
}

// Capabilities the engine exposes.

#[async_trait]
pub trait SearchAPI {
    async fn search(&self, query: &str, user_location: Option<Coordinates>) -> SearchResults;
}

#[async_trait]
pub trait RouteAPI {
    async fn compute_route(&self, origin: Coordinates, destination: Coordinates) -> RouteOutcome;
}

#[async_trait]
pub trait StationAPI {
    async fn nearby_stations(&self, center: Coordinates) -> Result<Vec<FuelStation>, Error>;

    async fn best_value_station(
        &self,
        origin: Coordinates,
        mpg: f64,
        tank_gallons: f64,
    ) -> Result<Option<StationCost>, Error>;
}

#[async_trait]
pub trait LocationAPI {
    async fn locate(&self) -> Option<Coordinates>;
}

pub trait API: SearchAPI + RouteAPI + StationAPI + LocationAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
