use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use inkwell_core::services::media;
use inkwell_types::api::{CreateMediaRequest, UpdateMediaRequest};

use crate::auth::{AppState, AuthUser};
use crate::error::AppError;
use crate::validate;

pub async fn list_media(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let items = media::list_media(&state.db, post_id)?;
    Ok(Json(items))
}

pub async fn add_media(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<CreateMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = validate::create_media(req)?;
    let item = media::add_media(&state.db, post_id, user_id, &input)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_media(
    State(state): State<AppState>,
    Path(media_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = media::get_media_item(&state.db, media_id)?;
    Ok(Json(item))
}

pub async fn update_media(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(media_id): Path<Uuid>,
    Json(req): Json<UpdateMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = validate::update_media(req)?;
    let item = media::update_media(&state.db, media_id, user_id, &input)?;
    Ok(Json(item))
}

pub async fn delete_media(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(media_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = media::delete_media(&state.db, media_id, user_id)?;
    Ok(Json(item))
}
