use geo_types::Coord;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        let coordinates = Self {
            latitude,
            longitude,
        };

        match coordinates.is_valid() {
            true => Ok(coordinates),
            false => Err(invalid_input_error()),
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn offset(&self, d_latitude: f64, d_longitude: f64) -> Self {
        let latitude = (self.latitude + d_latitude).clamp(-90.0, 90.0);

        let mut longitude = self.longitude + d_longitude;
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }

        Self {
            latitude,
            longitude,
        }
    }

    pub fn lng_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

/// Mapbox orders positions as `[lng, lat]`.
impl TryFrom<[f64; 2]> for Coordinates {
    type Error = Error;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Error> {
        Coordinates::new(latitude, longitude)
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Coord {
            x: coordinates.longitude,
            y: coordinates.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

#[test]
fn coordinates_range_test() {
    assert!(Coordinates::new(90.0, 180.0).is_ok());
    assert!(Coordinates::new(-90.0, -180.0).is_ok());
    assert_eq!(Coordinates::new(90.5, 0.0), Err(invalid_input_error()));
    assert_eq!(Coordinates::new(0.0, -180.1), Err(invalid_input_error()));
}

#[test]
fn coordinates_lng_lat_order_test() {
    let coordinates = Coordinates::try_from([-118.2437, 34.0522]).unwrap();
    assert_eq!(coordinates.latitude, 34.0522);
    assert_eq!(coordinates.longitude, -118.2437);
    assert_eq!(coordinates.lng_lat(), "-118.2437,34.0522");

    let coord: Coord<f64> = coordinates.into();
    assert_eq!(coord.x, -118.2437);
    assert_eq!(Coordinates::from(coord), coordinates);
}

#[test]
fn coordinates_offset_stays_in_range_test() {
    let near_pole = Coordinates::new(89.995, 179.995).unwrap();
    let shifted = near_pole.offset(0.02, 0.02);

    assert!(shifted.is_valid());
    assert_eq!(shifted.latitude, 90.0);
    assert!(shifted.longitude < -179.9);
}
