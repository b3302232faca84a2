use anyhow::anyhow;
use inkwell_db::Database;
use inkwell_types::api::{PostDto, UpdatePostInput};
use inkwell_types::{Error, Pagination, Result};
use tracing::info;
use uuid::Uuid;

use crate::ownership::check_owner;
use crate::services::require_user;
use crate::slug;

pub fn create_post(db: &Database, author: Uuid, title: &str, content: &str) -> Result<PostDto> {
    require_user(db, author)?;

    let slug = slug::assign(db, title)?;
    let id = Uuid::new_v4();

    db.create_post(&id.to_string(), title, &slug, content, &author.to_string())
        .map_err(|e| {
            if inkwell_db::is_unique_violation(&e) {
                // Suffixed slug lost the race after all
                Error::Conflict("Post with slug already exists".into())
            } else {
                Error::Internal(e)
            }
        })?;

    info!(post_id = %id, author_id = %author, %slug, "Created post");

    let row = db
        .get_post_by_id(&id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("post missing after insert")))?;
    row.try_into()
}

pub fn get_post(db: &Database, post_id: Uuid) -> Result<PostDto> {
    let row = db
        .get_post_by_id(&post_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Post with id {} not found", post_id)))?;
    row.try_into()
}

pub fn get_post_by_slug(db: &Database, slug: &str) -> Result<PostDto> {
    let row = db
        .get_post_by_slug(slug)?
        .ok_or_else(|| Error::NotFound(format!("Post with slug {} not found", slug)))?;
    row.try_into()
}

/// Newest first.
pub fn list_posts(db: &Database, page: Pagination) -> Result<Vec<PostDto>> {
    let rows = db.list_posts(page.limit(), page.offset())?;
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Owner-only partial update. The slug never changes, even when the title
/// does.
pub fn update_post(
    db: &Database,
    post_id: Uuid,
    auth_user: Uuid,
    input: &UpdatePostInput,
) -> Result<PostDto> {
    let row = db
        .get_post_by_id(&post_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Post with id {} not found", post_id)))?;
    check_owner(&row, auth_user, "update")?;

    db.update_post(
        &post_id.to_string(),
        input.title.as_deref(),
        input.content.as_deref(),
        input.published,
    )?;

    let row = db
        .get_post_by_id(&post_id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("post missing after update")))?;
    row.try_into()
}

/// Owner-only delete; returns the removed projection.
pub fn delete_post(db: &Database, post_id: Uuid, auth_user: Uuid) -> Result<PostDto> {
    let row = db
        .get_post_by_id(&post_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Post with id {} not found", post_id)))?;
    check_owner(&row, auth_user, "delete")?;

    db.delete_post(&post_id.to_string())?;
    info!(post_id = %post_id, deleted_by = %auth_user, "Deleted post");
    row.try_into()
}
