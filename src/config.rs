use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::entities::{Coordinates, FitOptions};
use crate::error::{invalid_input_error, Error};

const DEFAULT_API_BASE: &str = "https://api.mapbox.com";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_LOCATION_TIMEOUT_MS: u64 = 5000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: Option<String>,
    pub api_base: String,
    pub addr: SocketAddr,
    pub location: Option<Coordinates>,
    pub location_timeout: Duration,
    pub http_timeout: Duration,
    pub fit: FitOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let access_token = var("MAPBOX_ACCESS_TOKEN");
        if access_token.is_none() {
            tracing::warn!("MAPBOX_ACCESS_TOKEN is not set, search and routing are disabled");
        }

        let api_base = var("MAPBOX_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into());

        let addr = var("FUELMAP_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.into())
            .parse()
            .map_err(|_| invalid_input_error())?;

        let location = var("FUELMAP_LOCATION")
            .map(|value| parse_location(&value))
            .transpose()?;

        let location_timeout = var("FUELMAP_LOCATION_TIMEOUT_MS")
            .map(|value| value.parse::<u64>().map_err(|_| invalid_input_error()))
            .transpose()?
            .unwrap_or(DEFAULT_LOCATION_TIMEOUT_MS);

        let http_timeout = var("FUELMAP_HTTP_TIMEOUT_SECS")
            .map(|value| value.parse::<u64>().map_err(|_| invalid_input_error()))
            .transpose()?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let mut fit = FitOptions::default();
        if let Some(value) = var("FUELMAP_VIEWPORT") {
            let (width, height) = parse_size(&value)?;
            fit.width = width;
            fit.height = height;
        }

        Ok(Self {
            access_token,
            api_base,
            addr,
            location,
            location_timeout: Duration::from_millis(location_timeout),
            http_timeout: Duration::from_secs(http_timeout),
            fit,
        })
    }
}

fn parse_location(value: &str) -> Result<Coordinates, Error> {
    let (latitude, longitude) = value.split_once(',').ok_or_else(invalid_input_error)?;

    let latitude = latitude.trim().parse().map_err(|_| invalid_input_error())?;
    let longitude = longitude.trim().parse().map_err(|_| invalid_input_error())?;

    Coordinates::new(latitude, longitude)
}

fn parse_size(value: &str) -> Result<(f64, f64), Error> {
    let (width, height) = value.split_once('x').ok_or_else(invalid_input_error)?;

    let width: f64 = width.trim().parse().map_err(|_| invalid_input_error())?;
    let height: f64 = height.trim().parse().map_err(|_| invalid_input_error())?;

    if width <= 0.0 || height <= 0.0 {
        return Err(invalid_input_error());
    }

    Ok((width, height))
}

#[cfg(test)]
fn lookup_from(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn config_defaults_test() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert!(config.access_token.is_none());
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
    assert!(config.location.is_none());
    assert_eq!(config.location_timeout, Duration::from_millis(5000));
    assert_eq!(config.fit, FitOptions::default());
}

#[test]
fn config_overrides_test() {
    let config = Config::from_lookup(lookup_from(&[
        ("MAPBOX_ACCESS_TOKEN", "pk.test"),
        ("MAPBOX_API_BASE", "http://localhost:9000"),
        ("FUELMAP_ADDR", "0.0.0.0:8080"),
        ("FUELMAP_LOCATION", "34.0522, -118.2437"),
        ("FUELMAP_VIEWPORT", "800x600"),
    ]))
    .unwrap();

    assert_eq!(config.access_token.as_deref(), Some("pk.test"));
    assert_eq!(config.api_base, "http://localhost:9000");
    assert_eq!(config.addr.port(), 8080);
    assert_eq!(
        config.location,
        Some(Coordinates::new(34.0522, -118.2437).unwrap())
    );
    assert_eq!(config.fit.width, 800.0);
    assert_eq!(config.fit.height, 600.0);
    assert_eq!(config.fit.padding, 100.0);
}

#[test]
fn config_blank_token_is_missing_test() {
    let config = Config::from_lookup(lookup_from(&[("MAPBOX_ACCESS_TOKEN", "  ")])).unwrap();

    assert!(config.access_token.is_none());
}

#[test]
fn config_rejects_malformed_values_test() {
    assert!(Config::from_lookup(lookup_from(&[("FUELMAP_LOCATION", "34.0")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[("FUELMAP_LOCATION", "95,0")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[("FUELMAP_VIEWPORT", "0x600")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[("FUELMAP_ADDR", "nowhere")])).is_err());
}
