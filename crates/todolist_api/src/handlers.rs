//! Route handlers for `/api/todoitems`.
//!
//! Handlers validate transport input, run one service operation through
//! `AppState::run`, and pick the status code for the outcome.

use crate::error::{ApiError, DESCRIPTION_REQUIRED};
use crate::state::AppState;
use crate::TODO_ITEMS_PATH;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use todolist_core::{core_version, ping, TodoId, TodoItemDto};

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub ping: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        ping: ping(),
        version: core_version(),
    })
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<TodoItemDto>>, ApiError> {
    let items = state
        .run(ApiError::from_lookup, |service| service.list())
        .await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<TodoItemDto>, ApiError> {
    let id = path_id(id)?;
    let item = state
        .run(ApiError::from_lookup, move |service| service.get_by_id(id))
        .await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<TodoItemDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = validated_body(payload)?;
    let created = state
        .run(ApiError::from_write, move |service| service.create(dto))
        .await?;

    let location = format!("{TODO_ITEMS_PATH}/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

pub async fn update_item(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<TodoItemDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    let dto = validated_body(payload)?;
    state
        .run(ApiError::from_write, move |service| service.update(id, &dto))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_complete(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    state
        .run(ApiError::from_write, move |service| service.mark_complete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn path_id(id: Result<Path<TodoId>, PathRejection>) -> Result<TodoId, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn validated_body(
    payload: Result<Json<TodoItemDto>, JsonRejection>,
) -> Result<TodoItemDto, ApiError> {
    let Json(dto) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if dto.description.trim().is_empty() {
        return Err(ApiError::BadRequest(DESCRIPTION_REQUIRED.to_string()));
    }
    Ok(dto)
}
