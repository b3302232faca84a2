use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, header, request::Parts},
    response::IntoResponse,
};
use uuid::Uuid;

use inkwell_core::services::accounts;
use inkwell_core::{PasswordHasher, TokenService};
use inkwell_db::Database;
use inkwell_types::Error;
use inkwell_types::api::{LoginRequest, RegisterRequest};

use crate::error::AppError;
use crate::validate;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub hasher: PasswordHasher,
    pub tokens: TokenService,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = validate::register(req)?;
    let user = accounts::register(
        &state.db,
        &state.hasher,
        &input.email,
        &input.username,
        &input.password,
    )?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, password) = validate::login(req)?;
    let resp = accounts::authenticate(&state.db, &state.hasher, &state.tokens, &email, &password)?;
    Ok(Json(resp))
}

// -- Authenticated user extractor --

/// Extracted on routes that require a bearer token. Holds the verified
/// user id claim; whether that user still exists is checked where it
/// matters, not here.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError(Error::Unauthorized("Missing bearer token".into())))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError(Error::Unauthorized("Missing bearer token".into())))?;

        let claims = state.tokens.verify(token)?;
        Ok(AuthUser(claims.sub))
    }
}
