use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::{invalid_input_error, Error};

// Flat-earth degree lengths; close enough for ranking nearby stations.
const MILES_PER_DEGREE_LATITUDE: f64 = 69.0;
const MILES_PER_DEGREE_LONGITUDE: f64 = 54.6;

pub const DEFAULT_TANK_GALLONS: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: u32,
    pub name: String,
    pub coordinates: Coordinates,
    pub price_per_gallon: f64,
    pub address: String,
    pub distance_miles: f64,
}

pub fn cheapest(stations: &[FuelStation]) -> Option<&FuelStation> {
    stations
        .iter()
        .min_by(|a, b| a.price_per_gallon.total_cmp(&b.price_per_gallon))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StationCost {
    pub station: FuelStation,
    pub distance_miles: f64,
    pub drive_cost: f64,
    pub fill_cost: f64,
    pub total_cost: f64,
}

impl StationCost {
    fn new(origin: &Coordinates, station: &FuelStation, mpg: f64, tank_gallons: f64) -> Self {
        let distance_miles = approximate_miles(origin, &station.coordinates);
        let drive_cost = distance_miles / mpg * station.price_per_gallon;
        let fill_cost = tank_gallons * station.price_per_gallon;

        Self {
            station: station.clone(),
            distance_miles,
            drive_cost,
            fill_cost,
            total_cost: drive_cost + fill_cost,
        }
    }
}

pub fn best_value(
    origin: &Coordinates,
    stations: &[FuelStation],
    mpg: f64,
    tank_gallons: f64,
) -> Result<Option<StationCost>, Error> {
    if !(mpg > 0.0) || !(tank_gallons >= 0.0) {
        return Err(invalid_input_error());
    }

    let mut best: Option<StationCost> = None;

    for station in stations {
        let cost = StationCost::new(origin, station, mpg, tank_gallons);

        tracing::debug!(
            "{}: {:.1} mi, total ${:.2}",
            station.name,
            cost.distance_miles,
            cost.total_cost
        );

        match &best {
            Some(current) if current.total_cost <= cost.total_cost => {}
            _ => best = Some(cost),
        }
    }

    Ok(best)
}

pub fn approximate_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_latitude = (to.latitude - from.latitude) * MILES_PER_DEGREE_LATITUDE;
    let d_longitude = (to.longitude - from.longitude) * MILES_PER_DEGREE_LONGITUDE;

    (d_latitude.powi(2) + d_longitude.powi(2)).sqrt()
}

#[cfg(test)]
fn station(id: u32, latitude: f64, longitude: f64, price_per_gallon: f64) -> FuelStation {
    FuelStation {
        id,
        name: format!("station {}", id),
        coordinates: Coordinates::new(latitude, longitude).unwrap(),
        price_per_gallon,
        address: "".into(),
        distance_miles: 0.0,
    }
}

#[test]
fn cheapest_station_test() {
    let stations = vec![
        station(1, 0.0, 0.0, 3.45),
        station(2, 0.0, 0.0, 3.39),
        station(3, 0.0, 0.0, 3.52),
    ];

    assert_eq!(cheapest(&stations).map(|s| s.id), Some(2));
    assert!(cheapest(&[]).is_none());
}

#[test]
fn cheapest_station_tie_test() {
    let stations = vec![
        station(1, 0.0, 0.0, 3.50),
        station(2, 0.0, 0.0, 3.20),
        station(3, 0.0, 0.0, 3.20),
        station(4, 0.0, 0.0, 3.20),
    ];

    assert_eq!(cheapest(&stations).map(|s| s.id), Some(2));
}

#[test]
fn best_value_accounts_for_drive_test() {
    let origin = Coordinates::new(34.0522, -118.2437).unwrap();
    let stations = vec![
        // on the doorstep, slightly pricier
        station(1, 34.0522, -118.2437, 4.50),
        // a degree away, a cent cheaper: ~69 miles of driving wipes out the saving
        station(2, 35.0522, -118.2437, 4.49),
    ];

    let best = best_value(&origin, &stations, 25.0, DEFAULT_TANK_GALLONS)
        .unwrap()
        .unwrap();

    assert_eq!(best.station.id, 1);
    assert_eq!(best.distance_miles, 0.0);
    assert!((best.total_cost - 45.0).abs() < 1e-9);
}

#[test]
fn best_value_rejects_bad_mpg_test() {
    let origin = Coordinates::new(0.0, 0.0).unwrap();

    assert_eq!(
        best_value(&origin, &[], 0.0, DEFAULT_TANK_GALLONS),
        Err(invalid_input_error())
    );
    assert_eq!(best_value(&origin, &[], 30.0, DEFAULT_TANK_GALLONS), Ok(None));
}

#[test]
fn approximate_miles_test() {
    let a = Coordinates::new(0.0, 0.0).unwrap();
    let b = Coordinates::new(3.0, 0.0).unwrap();

    assert_eq!(approximate_miles(&a, &b), 207.0);
}
