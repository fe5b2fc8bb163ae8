use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::view::{MapController, MapSurface};

type Controller = Arc<MapController>;

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    query: String,
}

#[derive(Serialize, Deserialize)]
pub struct DestinationParams {
    id: String,
}

pub async fn find(Extension(controller): Extension<Controller>) -> Json<MapSurface> {
    controller.snapshot().await.into()
}

pub async fn locate(Extension(controller): Extension<Controller>) -> Json<MapSurface> {
    controller.locate().await;

    controller.snapshot().await.into()
}

pub async fn search(
    Extension(controller): Extension<Controller>,
    Json(params): Json<SearchParams>,
) -> Json<MapSurface> {
    controller.search(&params.query).await;

    controller.snapshot().await.into()
}

pub async fn select_destination(
    Extension(controller): Extension<Controller>,
    Json(params): Json<DestinationParams>,
) -> Result<Json<MapSurface>, Error> {
    controller.select_destination(&params.id).await?;

    Ok(controller.snapshot().await.into())
}

pub async fn clear_route(Extension(controller): Extension<Controller>) -> Json<MapSurface> {
    controller.clear_route().await;

    controller.snapshot().await.into()
}

pub async fn select_station(
    Extension(controller): Extension<Controller>,
    Path(id): Path<u32>,
) -> Result<Json<MapSurface>, Error> {
    controller.select_station(id).await?;

    Ok(controller.snapshot().await.into())
}

pub async fn close_popup(Extension(controller): Extension<Controller>) -> Json<MapSurface> {
    controller.close_popup().await;

    controller.snapshot().await.into()
}
