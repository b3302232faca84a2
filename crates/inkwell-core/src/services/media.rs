//! Media ownership is indirect: mutation rights belong to the author of the
//! parent post, not to whoever uploaded the row.

use anyhow::anyhow;
use inkwell_db::Database;
use inkwell_types::api::{CreateMediaInput, MediaDto, UpdateMediaInput};
use inkwell_types::{Error, Result};
use uuid::Uuid;

use crate::ownership::ensure_owner;
use crate::services::require_user;

pub fn add_media(
    db: &Database,
    post_id: Uuid,
    auth_user: Uuid,
    input: &CreateMediaInput,
) -> Result<MediaDto> {
    require_user(db, auth_user)?;

    let post = db
        .get_post_by_id(&post_id.to_string())?
        .ok_or_else(|| {
            Error::NotFound(format!("Post with id {} not found, cannot add media", post_id))
        })?;
    ensure_owner(&post.author_id, auth_user, "add media to", "post")?;

    let id = Uuid::new_v4();
    db.create_media(
        &id.to_string(),
        &input.url,
        input.caption.as_deref(),
        input.position,
        &post_id.to_string(),
    )?;

    let row = db
        .get_media_by_id(&id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("media missing after insert")))?;
    row.try_into()
}

pub fn get_media_item(db: &Database, media_id: Uuid) -> Result<MediaDto> {
    let row = db
        .get_media_by_id(&media_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Media with id {} not found", media_id)))?;
    row.try_into()
}

/// All media for a post, ordered by position.
pub fn list_media(db: &Database, post_id: Uuid) -> Result<Vec<MediaDto>> {
    let rows = db.list_media_for_post(&post_id.to_string())?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn update_media(
    db: &Database,
    media_id: Uuid,
    auth_user: Uuid,
    input: &UpdateMediaInput,
) -> Result<MediaDto> {
    let row = db
        .get_media_by_id(&media_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Media with id {} not found", media_id)))?;
    check_parent_owner(db, &row.post_id, auth_user, "update media for")?;

    db.update_media(
        &media_id.to_string(),
        input.url.as_deref(),
        input.caption.as_deref(),
        input.position,
    )?;

    let row = db
        .get_media_by_id(&media_id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("media missing after update")))?;
    row.try_into()
}

pub fn delete_media(db: &Database, media_id: Uuid, auth_user: Uuid) -> Result<MediaDto> {
    let row = db
        .get_media_by_id(&media_id.to_string())?
        .ok_or_else(|| Error::NotFound(format!("Media with id {} not found", media_id)))?;
    check_parent_owner(db, &row.post_id, auth_user, "delete media from")?;

    db.delete_media(&media_id.to_string())?;
    row.try_into()
}

fn check_parent_owner(db: &Database, post_id: &str, auth_user: Uuid, verb: &str) -> Result<()> {
    match db.get_post_by_id(post_id)? {
        Some(post) => ensure_owner(&post.author_id, auth_user, verb, "post"),
        // Orphaned row cannot establish ownership for anyone
        None => Err(Error::Forbidden(format!(
            "User is not authorized to {} this post",
            verb
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PasswordHasher;
    use crate::services::{accounts, posts};

    fn setup() -> (Database, Uuid, Uuid, Uuid) {
        let db = Database::open_in_memory().unwrap();
        let hasher = PasswordHasher::new(4);
        let a = accounts::register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        let b = accounts::register(&db, &hasher, "b@x.com", "bob", "password123").unwrap();
        let post = posts::create_post(&db, a.id, "A Post", "content").unwrap();
        (db, a.id, b.id, post.id)
    }

    fn image(position: u32) -> CreateMediaInput {
        CreateMediaInput {
            url: format!("https://cdn.example.com/img-{}.png", position),
            caption: None,
            position,
        }
    }

    #[test]
    fn only_post_owner_can_attach_media() {
        let (db, alice, bob, post) = setup();
        assert!(matches!(
            add_media(&db, post, bob, &image(0)),
            Err(Error::Forbidden(_))
        ));
        let media = add_media(&db, post, alice, &image(0)).unwrap();
        assert_eq!(media.post_id, post);
    }

    #[test]
    fn listing_orders_by_position() {
        let (db, alice, _, post) = setup();
        add_media(&db, post, alice, &image(2)).unwrap();
        add_media(&db, post, alice, &image(0)).unwrap();
        add_media(&db, post, alice, &image(1)).unwrap();
        let list = list_media(&db, post).unwrap();
        let positions: Vec<u32> = list.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn mutation_is_gated_on_parent_post_owner() {
        let (db, alice, bob, post) = setup();
        let media = add_media(&db, post, alice, &image(0)).unwrap();

        let patch = UpdateMediaInput {
            caption: Some("stolen".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_media(&db, media.id, bob, &patch),
            Err(Error::Forbidden(_))
        ));
        assert!(matches!(
            delete_media(&db, media.id, bob),
            Err(Error::Forbidden(_))
        ));

        let updated = update_media(
            &db,
            media.id,
            alice,
            &UpdateMediaInput {
                caption: Some("sunset".into()),
                position: Some(5),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.caption.as_deref(), Some("sunset"));
        assert_eq!(updated.position, 5);

        delete_media(&db, media.id, alice).unwrap();
        assert!(matches!(
            get_media_item(&db, media.id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn media_on_missing_post_is_not_found() {
        let (db, alice, _, _) = setup();
        let err = add_media(&db, Uuid::new_v4(), alice, &image(0)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
