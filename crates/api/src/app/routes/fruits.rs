use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use fruitstand_core::{DomainError, Entity, Fruit, FruitId};

use crate::app::dto::FruitPayload;
use crate::app::errors::{ApiError, StoreFault};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_fruits).post(create_fruit))
        .route("/:id", get(get_fruit).put(update_fruit).delete(delete_fruit))
}

/// Storage faults are not translated here; they surface as a bare 500.
pub async fn list_fruits(
    Extension(services): Extension<AppServices>,
) -> Result<Json<Vec<Fruit>>, StoreFault> {
    let fruits = services.fruits().list().await?;
    Ok(Json(fruits))
}

/// Like `list_fruits`, the lookup itself has no error translation.
pub async fn get_fruit(
    Extension(services): Extension<AppServices>,
    Path(raw_id): Path<String>,
) -> Result<Response, StoreFault> {
    let id = match raw_id.parse::<FruitId>() {
        Ok(id) => id,
        Err(e) => return Ok(ApiError::from(e).into_response()),
    };

    match services.fruits().find(id).await? {
        Some(fruit) => Ok((StatusCode::OK, Json(fruit)).into_response()),
        None => Ok(ApiError::from(DomainError::not_found(id)).into_response()),
    }
}

pub async fn create_fruit(
    Extension(services): Extension<AppServices>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Fruit>), ApiError> {
    let draft = FruitPayload::decode(&headers, &body)?.into_new_fruit()?;
    let fruit = services.create_fruit(draft).await?;

    tracing::info!(fruit_id = %fruit.id(), "fruit created");
    Ok((StatusCode::CREATED, Json(fruit)))
}

pub async fn update_fruit(
    Extension(services): Extension<AppServices>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Fruit>, ApiError> {
    let id: FruitId = raw_id.parse()?;
    let changes = FruitPayload::decode(&headers, &body)?.into_changes()?;
    let fruit = services.update_fruit(id, changes).await?;

    tracing::info!(fruit_id = %id, "fruit updated");
    Ok(Json(fruit))
}

/// The request body (usually `text/plain`) is ignored.
pub async fn delete_fruit(
    Extension(services): Extension<AppServices>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: FruitId = raw_id.parse()?;
    services.delete_fruit(id).await?;

    tracing::info!(fruit_id = %id, "fruit deleted");
    Ok(StatusCode::NO_CONTENT)
}
