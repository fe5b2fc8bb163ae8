use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, RoutePreview};
use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub text: String,
    pub place_name: String,
    pub coordinates: Coordinates,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DestinationCandidate {
    pub id: String,
    pub display_name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub route_preview: Option<RoutePreview>,
}

impl DestinationCandidate {
    pub fn new(place: Place, route_preview: Option<RoutePreview>) -> Self {
        Self {
            id: place.id,
            display_name: place.text,
            address: place.place_name,
            coordinates: place.coordinates,
            route_preview,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SearchResults {
    pub candidates: Vec<DestinationCandidate>,
    pub error: Option<Error>,
}

impl SearchResults {
    pub fn found(candidates: Vec<DestinationCandidate>) -> Self {
        Self {
            candidates,
            error: None,
        }
    }

    pub fn failed(error: Error) -> Self {
        Self {
            candidates: vec![],
            error: Some(error),
        }
    }
}
