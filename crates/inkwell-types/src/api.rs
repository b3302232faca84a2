use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- JWT Claims --

/// Bearer-token claims: the authenticated user plus expiry. Canonical
/// definition lives here so the token service and the HTTP layer agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

// -- Auth --

/// Wire payload for registration. Fields are optional so that missing ones
/// can be reported individually instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: String,
}

// -- Users --

/// Public user projection. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub profile_image: Option<String>,
}

/// Validated partial update applied by the accounts service.
#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub profile_image: Option<String>,
}

// -- Posts --

#[derive(Debug, Serialize, Deserialize)]
pub struct PostDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author_id: Uuid,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

/// Validated partial update. The slug is immutable and deliberately absent.
#[derive(Debug, Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

// -- Comments --

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

// -- Media --

#[derive(Debug, Serialize, Deserialize)]
pub struct MediaDto {
    pub id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub position: u32,
    pub post_id: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMediaRequest {
    pub url: Option<String>,
    pub caption: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMediaRequest {
    pub url: Option<String>,
    pub caption: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug)]
pub struct CreateMediaInput {
    pub url: String,
    pub caption: Option<String>,
    pub position: u32,
}

#[derive(Debug, Default)]
pub struct UpdateMediaInput {
    pub url: Option<String>,
    pub caption: Option<String>,
    pub position: Option<u32>,
}

// -- Misc --

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
