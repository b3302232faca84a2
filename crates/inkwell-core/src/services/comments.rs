use anyhow::anyhow;
use inkwell_db::Database;
use inkwell_types::api::CommentDto;
use inkwell_types::{Error, Pagination, Result};
use uuid::Uuid;

use crate::ownership::check_owner;
use crate::services::require_user;

pub fn create_comment(
    db: &Database,
    post_id: Uuid,
    author: Uuid,
    content: &str,
) -> Result<CommentDto> {
    require_user(db, author)?;

    if db.get_post_by_id(&post_id.to_string())?.is_none() {
        return Err(Error::NotFound(format!(
            "Post with id {} not found, cannot add comment",
            post_id
        )));
    }

    let id = Uuid::new_v4();
    db.create_comment(
        &id.to_string(),
        content,
        &author.to_string(),
        &post_id.to_string(),
    )?;

    let row = db
        .get_comment_by_id(&id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("comment missing after insert")))?;
    row.try_into()
}

pub fn get_comment(db: &Database, comment_id: Uuid) -> Result<CommentDto> {
    let row = db
        .get_comment_by_id(&comment_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Comment with id {} not found", comment_id)))?;
    row.try_into()
}

/// Oldest first, thread order.
pub fn list_comments(db: &Database, post_id: Uuid, page: Pagination) -> Result<Vec<CommentDto>> {
    let rows = db.list_comments_for_post(&post_id.to_string(), page.limit(), page.offset())?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn update_comment(
    db: &Database,
    comment_id: Uuid,
    auth_user: Uuid,
    content: Option<&str>,
) -> Result<CommentDto> {
    let row = db
        .get_comment_by_id(&comment_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Comment with id {} not found", comment_id)))?;
    check_owner(&row, auth_user, "update")?;

    db.update_comment(&comment_id.to_string(), content)?;

    let row = db
        .get_comment_by_id(&comment_id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("comment missing after update")))?;
    row.try_into()
}

pub fn delete_comment(db: &Database, comment_id: Uuid, auth_user: Uuid) -> Result<CommentDto> {
    let row = db
        .get_comment_by_id(&comment_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Comment with id {} not found", comment_id)))?;
    check_owner(&row, auth_user, "delete")?;

    db.delete_comment(&comment_id.to_string())?;
    row.try_into()
}
