use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    api::{Directions, Geocoder, LocationProvider},
    entities::{Coordinates, DrivingRoute, Place, RouteFidelity},
    error::Error,
};

pub fn place(id: &str, latitude: f64, longitude: f64) -> Place {
    Place {
        id: id.into(),
        text: id.into(),
        place_name: format!("{}, somewhere", id),
        coordinates: Coordinates::new(latitude, longitude).unwrap(),
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    pub places: Vec<Place>,
    pub error: Option<Error>,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with_places(places: Vec<Place>) -> Self {
        Self {
            places,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, _query: &str, limit: usize) -> Result<Vec<Place>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.places.iter().take(limit).cloned().collect()),
        }
    }
}

#[derive(Default)]
pub struct FakeDirections {
    pub failing: Vec<Coordinates>,
    pub unroutable: Vec<Coordinates>,
    pub slow: Vec<(Coordinates, Duration)>,
    pub fidelities: Mutex<Vec<RouteFidelity>>,
    pub calls: AtomicUsize,
}

impl FakeDirections {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Directions for FakeDirections {
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        fidelity: RouteFidelity,
    ) -> Result<Option<DrivingRoute>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fidelities.lock().unwrap().push(fidelity);

        if let Some((_, delay)) = self.slow.iter().find(|(c, _)| *c == destination) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(&destination) {
            return Err(crate::error::upstream_error());
        }

        if self.unroutable.contains(&destination) {
            return Ok(None);
        }

        let midpoint = Coordinates {
            latitude: (origin.latitude + destination.latitude) / 2.0,
            longitude: (origin.longitude + destination.longitude) / 2.0,
        };

        Ok(Some(DrivingRoute {
            distance_meters: destination.latitude * 1609.34,
            duration_seconds: destination.latitude * 60.0,
            geometry: vec![origin, midpoint, destination],
        }))
    }
}

pub struct SlowLocation(pub Coordinates, pub Duration);

#[async_trait]
impl LocationProvider for SlowLocation {
    async fn current_location(&self) -> Option<Coordinates> {
        tokio::time::sleep(self.1).await;
        Some(self.0)
    }
}

#[derive(Default)]
pub struct ScriptedGeocoder {
    scripts: Vec<(String, Duration, Vec<Place>)>,
}

impl ScriptedGeocoder {
    pub fn script(mut self, query: &str, delay: Duration, places: Vec<Place>) -> Self {
        self.scripts.push((query.into(), delay, places));
        self
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<Place>, Error> {
        let script = self.scripts.iter().find(|(q, _, _)| q == query);

        match script {
            Some((_, delay, places)) => {
                tokio::time::sleep(*delay).await;
                Ok(places.iter().take(limit).cloned().collect())
            }
            None => Ok(vec![]),
        }
    }
}
