use anyhow::anyhow;
use inkwell_db::Database;
use inkwell_types::api::{LoginResponse, UpdateUserInput, UserDto};
use inkwell_types::{Error, Result};
use tracing::{info, warn};
use uuid::Uuid;

use crate::password::PasswordHasher;
use crate::token::TokenService;

/// Register a new user. Format constraints are the boundary's job; this
/// re-checks email uniqueness and stores only the password digest.
pub fn register(
    db: &Database,
    hasher: &PasswordHasher,
    email: &str,
    username: &str,
    password: &str,
) -> Result<UserDto> {
    if db.get_user_by_email(email)?.is_some() {
        return Err(Error::Conflict("User with email already exists".into()));
    }

    let digest = hasher.hash(password)?;
    let id = Uuid::new_v4();

    // The pre-check above is not atomic; a concurrent insert loses the race
    // at the UNIQUE constraint and is reported as the same conflict.
    db.create_user(&id.to_string(), email, username, &digest)
        .map_err(|e| {
            if inkwell_db::is_unique_violation(&e) {
                Error::Conflict("User with email already exists".into())
            } else {
                Error::Internal(e)
            }
        })?;

    info!(user_id = %id, "Registered new user");

    let row = db
        .get_user_by_id(&id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("user missing after insert")))?;
    row.try_into()
}

/// Exchange credentials for a bearer token.
pub fn authenticate(
    db: &Database,
    hasher: &PasswordHasher,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<LoginResponse> {
    let user = db
        .get_user_by_email(email)?
        .ok_or_else(|| Error::NotFound("User with email not found".into()))?;

    if !hasher.verify(password, &user.password)? {
        warn!(email, "Failed login attempt");
        return Err(Error::Unauthorized("Invalid password".into()));
    }

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| Error::Internal(anyhow!("corrupt user id '{}': {}", user.id, e)))?;

    Ok(LoginResponse {
        token: tokens.issue(user_id)?,
        expires_in: tokens.expires_in().to_string(),
    })
}

pub fn get_user(db: &Database, user_id: Uuid) -> Result<UserDto> {
    let row = db
        .get_user_by_id(&user_id.to_string())?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    row.try_into()
}

/// Self-only partial profile update. A new password is re-hashed before it
/// is stored.
pub fn update_user(
    db: &Database,
    hasher: &PasswordHasher,
    target_id: Uuid,
    auth_user: Uuid,
    input: &UpdateUserInput,
) -> Result<UserDto> {
    if target_id != auth_user {
        return Err(Error::Forbidden(
            "You can only update your own profile".into(),
        ));
    }

    if db.get_user_by_id(&target_id.to_string())?.is_none() {
        return Err(Error::NotFound("User not found".into()));
    }

    let digest = match &input.password {
        Some(p) => Some(hasher.hash(p)?),
        None => None,
    };

    db.update_user(
        &target_id.to_string(),
        input.username.as_deref(),
        digest.as_deref(),
        input.profile_image.as_deref(),
    )?;

    let row = db
        .get_user_by_id(&target_id.to_string())?
        .ok_or_else(|| Error::Internal(anyhow!("user missing after update")))?;
    row.try_into()
}

/// Self-only account deletion. Owned posts (and through them comments and
/// media) go with it, via the store's cascading deletes.
pub fn delete_user(db: &Database, target_id: Uuid, auth_user: Uuid) -> Result<UserDto> {
    if target_id != auth_user {
        return Err(Error::Forbidden(
            "You can only delete your own account".into(),
        ));
    }

    let row = db
        .get_user_by_id(&target_id.to_string())?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;

    db.delete_user(&target_id.to_string())?;
    info!(user_id = %target_id, "Deleted user account");
    row.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn setup() -> (Database, PasswordHasher, TokenService) {
        (
            Database::open_in_memory().unwrap(),
            PasswordHasher::new(4),
            TokenService::with_ttl("test-secret", Duration::hours(1), "1h"),
        )
    }

    #[test]
    fn register_then_authenticate() {
        let (db, hasher, tokens) = setup();
        let user = register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        assert_eq!(user.email, "a@x.com");

        let login = authenticate(&db, &hasher, &tokens, "a@x.com", "password123").unwrap();
        assert_eq!(login.expires_in, "1h");
        let claims = tokens.verify(&login.token).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[test]
    fn duplicate_email_conflicts_and_persists_once() {
        let (db, hasher, _) = setup();
        register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        let err = register(&db, &hasher, "a@x.com", "bob", "password456").unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(db.count_users().unwrap(), 1);
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let (db, hasher, tokens) = setup();
        register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        let err = authenticate(&db, &hasher, &tokens, "a@x.com", "wrong-password").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn unknown_email_is_not_found() {
        let (db, hasher, tokens) = setup();
        let err = authenticate(&db, &hasher, &tokens, "ghost@x.com", "password123").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn update_is_self_only() {
        let (db, hasher, _) = setup();
        let alice = register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        let bob = register(&db, &hasher, "b@x.com", "bob", "password123").unwrap();

        let input = UpdateUserInput {
            username: Some("mallory".into()),
            ..Default::default()
        };
        let err = update_user(&db, &hasher, alice.id, bob.id, &input).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert_eq!(get_user(&db, alice.id).unwrap().username, "alice");
    }

    #[test]
    fn password_change_rehashes() {
        let (db, hasher, tokens) = setup();
        let alice = register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        let input = UpdateUserInput {
            password: Some("new-password-9".into()),
            ..Default::default()
        };
        update_user(&db, &hasher, alice.id, alice.id, &input).unwrap();

        assert!(authenticate(&db, &hasher, &tokens, "a@x.com", "new-password-9").is_ok());
        assert!(matches!(
            authenticate(&db, &hasher, &tokens, "a@x.com", "password123"),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn delete_is_self_only_and_removes_user() {
        let (db, hasher, _) = setup();
        let alice = register(&db, &hasher, "a@x.com", "alice", "password123").unwrap();
        let bob = register(&db, &hasher, "b@x.com", "bob", "password123").unwrap();

        assert!(matches!(
            delete_user(&db, alice.id, bob.id),
            Err(Error::Forbidden(_))
        ));
        delete_user(&db, alice.id, alice.id).unwrap();
        assert!(matches!(
            get_user(&db, alice.id),
            Err(Error::NotFound(_))
        ));
    }
}
