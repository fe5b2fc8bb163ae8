use async_trait::async_trait;

use crate::{
    api::StationLookup,
    entities::{Coordinates, FuelStation},
    error::Error,
};

struct Template {
    name: &'static str,
    d_latitude: f64,
    d_longitude: f64,
    price_per_gallon: f64,
    address: &'static str,
    distance_miles: f64,
}

const TEMPLATES: [Template; 3] = [
    Template {
        name: "Shell",
        d_latitude: 0.01,
        d_longitude: 0.01,
        price_per_gallon: 3.45,
        address: "123 Main St",
        distance_miles: 0.5,
    },
    Template {
        name: "BP",
        d_latitude: -0.015,
        d_longitude: 0.02,
        price_per_gallon: 3.39,
        address: "456 Oak Ave",
        distance_miles: 0.8,
    },
    Template {
        name: "Chevron",
        d_latitude: 0.02,
        d_longitude: -0.01,
        price_per_gallon: 3.52,
        address: "789 Pine Rd",
        distance_miles: 1.2,
    },
];

#[derive(Clone, Copy, Debug, Default)]
pub struct MockStations;

impl MockStations {
    pub fn generate(center: Coordinates) -> Vec<FuelStation> {
        TEMPLATES
            .iter()
            .zip(1..)
            .map(|(template, id)| FuelStation {
                id,
                name: template.name.into(),
                coordinates: center.offset(template.d_latitude, template.d_longitude),
                price_per_gallon: template.price_per_gallon,
                address: template.address.into(),
                distance_miles: template.distance_miles,
            })
            .collect()
    }
}

#[async_trait]
impl StationLookup for MockStations {
    async fn nearby(&self, center: Coordinates) -> Result<Vec<FuelStation>, Error> {
        Ok(Self::generate(center))
    }
}

#[test]
fn mock_stations_follow_center_test() {
    let center = Coordinates::new(34.0522, -118.2437).unwrap();
    let stations = MockStations::generate(center);

    assert_eq!(stations.len(), 3);
    assert_eq!(
        stations.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(stations[1].name, "BP");
    assert!((stations[1].coordinates.latitude - 34.0372).abs() < 1e-9);
    assert!((stations[1].coordinates.longitude - -118.2237).abs() < 1e-9);
    assert!(stations.iter().all(|s| s.coordinates.is_valid()));
}

#[test]
fn mock_stations_are_deterministic_test() {
    let center = Coordinates::new(-33.86, 151.2).unwrap();

    assert_eq!(MockStations::generate(center), MockStations::generate(center));
    assert_eq!(
        crate::entities::cheapest(&MockStations::generate(center)).map(|s| s.name.as_str()),
        Some("BP")
    );
}
