use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use inkwell_core::services::accounts;
use inkwell_types::api::{MessageResponse, UpdateUserRequest};

use crate::auth::{AppState, AuthUser};
use crate::error::AppError;
use crate::validate;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = accounts::get_user(&state.db, user_id)?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(auth_user): AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = validate::update_user(req)?;
    let user = accounts::update_user(&state.db, &state.hasher, user_id, auth_user, &input)?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(auth_user): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    accounts::delete_user(&state.db, user_id, auth_user)?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".into(),
    }))
}
