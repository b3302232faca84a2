//! Per-resource business logic, composed from the repositories, the
//! credential hasher, and the token service. Services raise typed failures
//! and never construct HTTP responses.

pub mod accounts;
pub mod comments;
pub mod media;
pub mod posts;

use inkwell_db::Database;
use inkwell_db::models::UserRow;
use inkwell_types::{Error, Result};
use uuid::Uuid;

/// A verified token only proves the claim was signed; the subject may have
/// been deleted since. Mutating operations re-check existence here.
pub(crate) fn require_user(db: &Database, user_id: Uuid) -> Result<UserRow> {
    db.get_user_by_id(&user_id.to_string())?
        .ok_or_else(|| Error::Unauthorized("User not found".into()))
}
