use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Coordinates, SearchResults};
use crate::error::{invalid_input_error, Error};

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    q: String,
    lat: Option<f64>,
    lng: Option<f64>,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, Error> {
    let user_location = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)?),
        (None, None) => None,
        _ => return Err(invalid_input_error()),
    };

    let results = api.search(&params.q, user_location).await;

    Ok(results.into())
}
