use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Coordinates, RouteOutcome};
use crate::error::{invalid_input_error, Error};

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    origin: Coordinates,
    destination: Coordinates,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<RouteOutcome>, Error> {
    if !params.origin.is_valid() || !params.destination.is_valid() {
        return Err(invalid_input_error());
    }

    let outcome = api.compute_route(params.origin, params.destination).await;

    Ok(outcome.into())
}
