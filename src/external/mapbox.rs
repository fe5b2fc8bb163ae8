use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    api::{Directions, Geocoder},
    config::Config,
    entities::{Coordinates, DrivingRoute, Place, RouteFidelity},
    error::{
        invalid_input_error, missing_token_error, rejected_token_error, unexpected_error,
        upstream_error, Error,
    },
};

const PLACE_TYPES: &str = "place,address,poi";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Feature {
    id: String,
    text: String,
    place_name: String,
    center: [f64; 2],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsResponse {
    code: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    distance: f64,
    duration: f64,
    geometry: Option<Geometry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug)]
pub struct MapboxClient {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl MapboxClient {
    pub fn new(
        base_url: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url).map_err(|_| invalid_input_error())?;

        if base_url.cannot_be_a_base() {
            return Err(invalid_input_error());
        }

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(
            &config.api_base,
            config.access_token.clone(),
            config.http_timeout,
        )
    }

    fn token(&self) -> Result<&str, Error> {
        self.access_token
            .as_deref()
            .ok_or_else(missing_token_error)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| unexpected_error())?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[async_trait]
impl Geocoder for MapboxClient {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<Place>, Error> {
        let key = self.token()?;
        let url = self.endpoint(&[
            "geocoding",
            "v5",
            "mapbox.places",
            &format!("{}.json", query),
        ])?;

        let res = self
            .client
            .get(url)
            .query(&[("access_token", key)])
            .query(&[("limit", limit)])
            .query(&[("types", PLACE_TYPES)])
            .send()
            .await?;

        let data: GeocodingResponse = check_status(res)?.json().await?;

        let places = data
            .features
            .into_iter()
            .filter_map(|feature| match Coordinates::try_from(feature.center) {
                Ok(coordinates) => Some(Place {
                    id: feature.id,
                    text: feature.text,
                    place_name: feature.place_name,
                    coordinates,
                }),
                Err(_) => {
                    tracing::warn!("dropping feature {} with invalid center", feature.id);
                    None
                }
            })
            .collect();

        Ok(places)
    }
}

#[async_trait]
impl Directions for MapboxClient {
    #[tracing::instrument(skip(self))]
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        fidelity: RouteFidelity,
    ) -> Result<Option<DrivingRoute>, Error> {
        let key = self.token()?;
        let waypoints = format!("{};{}", origin.lng_lat(), destination.lng_lat());
        let url = self.endpoint(&["directions", "v5", "mapbox", "driving", &waypoints])?;

        let res = self
            .client
            .get(url)
            .query(&[("access_token", key)])
            .query(&[("geometries", "geojson")])
            .query(&[("overview", fidelity.overview())])
            .query(&[("steps", fidelity.steps())])
            .query(&[("alternatives", false)])
            .send()
            .await?;

        let data: DirectionsResponse = check_status(res)?.json().await?;

        let route = match data.routes.into_iter().next() {
            Some(route) => route,
            None => {
                tracing::info!("no route found, code: {:?}", data.code);
                return Ok(None);
            }
        };

        let geometry = route
            .geometry
            .map(|geometry| geometry.coordinates)
            .unwrap_or_default()
            .into_iter()
            .map(Coordinates::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| upstream_error())?;

        Ok(Some(DrivingRoute {
            distance_meters: route.distance,
            duration_seconds: route.duration,
            geometry,
        }))
    }
}

fn check_status(res: Response) -> Result<Response, Error> {
    let status_code = res.status().as_u16();

    if status_code == 401 || status_code == 403 {
        tracing::warn!("mapbox refused the access token with status {}", status_code);
        return Err(rejected_token_error());
    } else if (400..500).contains(&status_code) {
        tracing::warn!("mapbox rejected request with status {}", status_code);
        return Err(invalid_input_error());
    } else if status_code != 200 {
        tracing::warn!("mapbox responded with status {}", status_code);
        return Err(upstream_error());
    }

    Ok(res)
}

#[test]
fn endpoint_keeps_base_path_test() {
    let client =
        MapboxClient::new("http://localhost:9000/proxy/", None, Duration::from_secs(1)).unwrap();

    let url = client
        .endpoint(&["geocoding", "v5", "mapbox.places", "New York.json"])
        .unwrap();

    assert_eq!(
        url.as_str(),
        "http://localhost:9000/proxy/geocoding/v5/mapbox.places/New%20York.json"
    );
}

#[test]
fn rejects_unusable_base_url_test() {
    assert!(MapboxClient::new("not a url", None, Duration::from_secs(1)).is_err());
    assert!(MapboxClient::new("mailto:someone", None, Duration::from_secs(1)).is_err());
}
