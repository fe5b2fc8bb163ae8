use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{cheapest, Coordinates, FuelStation, StationCost, DEFAULT_TANK_GALLONS};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct NearbyParams {
    lat: f64,
    lng: f64,
}

#[derive(Serialize, Deserialize)]
pub struct BestParams {
    lat: f64,
    lng: f64,
    mpg: f64,
    tank: Option<f64>,
}

#[derive(Serialize)]
pub struct NearbyStations {
    stations: Vec<FuelStation>,
    cheapest: Option<FuelStation>,
}

pub async fn nearby(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyStations>, Error> {
    let center = Coordinates::new(params.lat, params.lng)?;
    let stations = api.nearby_stations(center).await?;
    let cheapest = cheapest(&stations).cloned();

    Ok(NearbyStations { stations, cheapest }.into())
}

pub async fn best(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<BestParams>,
) -> Result<Json<Option<StationCost>>, Error> {
    let origin = Coordinates::new(params.lat, params.lng)?;
    let tank_gallons = params.tank.unwrap_or(DEFAULT_TANK_GALLONS);

    let best = api
        .best_value_station(origin, params.mpg, tank_gallons)
        .await?;

    Ok(best.into())
}
