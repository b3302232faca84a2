use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use inkwell_core::services::posts;
use inkwell_types::Pagination;

use crate::auth::{AppState, AuthUser};
use crate::error::AppError;
use crate::validate;

/// Raw pagination query. Values stay strings until [`Pagination::from_query`]
/// validates them, so `?page=abc` is a 400 rather than a silent default.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn parse(&self) -> Result<Pagination, AppError> {
        Pagination::from_query(self.page.as_deref(), self.page_size.as_deref())
            .map_err(AppError::from)
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.parse()?;
    let posts = posts::list_posts(&state.db, page)?;
    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<inkwell_types::api::CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (title, content) = validate::create_post(req)?;
    let post = posts::create_post(&state.db, user_id, &title, &content)?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let post = posts::get_post(&state.db, post_id)?;
    Ok(Json(post))
}

pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = posts::get_post_by_slug(&state.db, &slug)?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<inkwell_types::api::UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = validate::update_post(req);
    let post = posts::update_post(&state.db, post_id, user_id, &input)?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let post = posts::delete_post(&state.db, post_id, user_id)?;
    Ok(Json(post))
}
