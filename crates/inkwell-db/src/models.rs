//! Database row types, mapping directly to SQLite rows.
//! Distinct from the inkwell-types API DTOs to keep the DB layer independent;
//! the `TryFrom` impls below are the only place row fields are parsed.

use anyhow::anyhow;
use chrono::{DateTime, NaiveDateTime, Utc};
use inkwell_types::api::{CommentDto, MediaDto, PostDto, UserDto};
use inkwell_types::{Error, Result};
use tracing::warn;
use uuid::Uuid;

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

pub struct PostRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author_id: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

pub struct CommentRow {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub post_id: String,
    pub created_at: String,
}

pub struct MediaRow {
    pub id: String,
    pub url: String,
    pub caption: Option<String>,
    pub position: i64,
    pub post_id: String,
    pub uploaded_at: String,
}

impl TryFrom<UserRow> for UserDto {
    type Error = Error;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(UserDto {
            id: parse_uuid(&row.id, "user id")?,
            email: row.email,
            username: row.username,
            profile_image: row.profile_image,
            created_at: parse_timestamp(&row.created_at),
        })
    }
}

impl TryFrom<PostRow> for PostDto {
    type Error = Error;

    fn try_from(row: PostRow) -> Result<Self> {
        Ok(PostDto {
            id: parse_uuid(&row.id, "post id")?,
            title: row.title,
            slug: row.slug,
            content: row.content,
            author_id: parse_uuid(&row.author_id, "post author_id")?,
            published: row.published,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        })
    }
}

impl TryFrom<CommentRow> for CommentDto {
    type Error = Error;

    fn try_from(row: CommentRow) -> Result<Self> {
        Ok(CommentDto {
            id: parse_uuid(&row.id, "comment id")?,
            content: row.content,
            author_id: parse_uuid(&row.author_id, "comment author_id")?,
            post_id: parse_uuid(&row.post_id, "comment post_id")?,
            created_at: parse_timestamp(&row.created_at),
        })
    }
}

impl TryFrom<MediaRow> for MediaDto {
    type Error = Error;

    fn try_from(row: MediaRow) -> Result<Self> {
        Ok(MediaDto {
            id: parse_uuid(&row.id, "media id")?,
            url: row.url,
            caption: row.caption,
            position: row.position.max(0) as u32,
            post_id: parse_uuid(&row.post_id, "media post_id")?,
            uploaded_at: parse_timestamp(&row.uploaded_at),
        })
    }
}

/// A corrupt stored id is store corruption, not a default; surfacing it
/// keeps two corrupt rows from aliasing each other as the nil UUID.
fn parse_uuid(raw: &str, what: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|e| Error::Internal(anyhow!("corrupt {} '{}': {}", what, raw, e)))
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
            // Parse as naive UTC and convert.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}
