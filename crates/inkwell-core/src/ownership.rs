use inkwell_db::models::{CommentRow, PostRow};
use inkwell_types::{Error, Result};
use uuid::Uuid;

/// A resource whose mutation is gated on its authoring user. Media has no
/// direct impl; its owner is resolved through the parent post's author.
pub trait Owned {
    fn owner_id(&self) -> &str;
    fn noun() -> &'static str;
}

impl Owned for PostRow {
    fn owner_id(&self) -> &str {
        &self.author_id
    }
    fn noun() -> &'static str {
        "post"
    }
}

impl Owned for CommentRow {
    fn owner_id(&self) -> &str {
        &self.author_id
    }
    fn noun() -> &'static str {
        "comment"
    }
}

/// The one ownership predicate shared by every resource kind.
pub fn check_owner<T: Owned>(resource: &T, user_id: Uuid, verb: &str) -> Result<()> {
    ensure_owner(resource.owner_id(), user_id, verb, T::noun())
}

pub fn ensure_owner(owner_id: &str, user_id: Uuid, verb: &str, noun: &str) -> Result<()> {
    if owner_id == user_id.to_string() {
        Ok(())
    } else {
        Err(Error::Forbidden(format!(
            "User is not authorized to {} this {}",
            verb, noun
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author: &str) -> PostRow {
        PostRow {
            id: "p1".into(),
            title: "t".into(),
            slug: "t".into(),
            content: "c".into(),
            author_id: author.into(),
            published: false,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn owner_passes() {
        let user = Uuid::new_v4();
        assert!(check_owner(&post(&user.to_string()), user, "update").is_ok());
    }

    #[test]
    fn non_owner_is_forbidden_with_verb_and_noun() {
        let err = check_owner(&post(&Uuid::new_v4().to_string()), Uuid::new_v4(), "delete")
            .unwrap_err();
        match err {
            Error::Forbidden(msg) => {
                assert_eq!(msg, "User is not authorized to delete this post")
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}
