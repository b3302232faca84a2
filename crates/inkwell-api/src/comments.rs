use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use inkwell_core::services::comments;
use inkwell_types::api::{CreateCommentRequest, UpdateCommentRequest};

use crate::auth::{AppState, AuthUser};
use crate::error::AppError;
use crate::posts::PageQuery;
use crate::validate;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.parse()?;
    let comments = comments::list_comments(&state.db, post_id, page)?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = validate::create_comment(req)?;
    let comment = comments::create_comment(&state.db, post_id, user_id, &content)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(comment_id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = validate::update_comment(req)?;
    let comment = comments::update_comment(&state.db, comment_id, user_id, content.as_deref())?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comment = comments::delete_comment(&state.db, comment_id, user_id)?;
    Ok(Json(comment))
}
