//! Resource CRUD handlers, generic over the resource type.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::resources::Resource;
use crate::response::MessageBody;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

fn service<R: Resource>(state: &AppState) -> CrudService<R> {
    CrudService::new(state.store.clone())
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, AppError> {
    let items = service::<R>(&state).list().await?;
    Ok(Json(items))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R>, AppError> {
    let item = service::<R>(&state).get(&id).await?;
    Ok(Json(item))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<R>), AppError> {
    let rules = state.registry.rules(R::PATH);
    let item = service::<R>(&state).create(body, rules).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<R>, AppError> {
    let rules = state.registry.rules(R::PATH);
    let item = service::<R>(&state).update(&id, body, rules).await?;
    Ok(Json(item))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    service::<R>(&state).delete(&id).await?;
    Ok(Json(MessageBody::deleted(R::NAME)))
}
