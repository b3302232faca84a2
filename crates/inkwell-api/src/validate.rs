//! Request-payload validation. Wire payloads carry `Option` fields so that
//! missing and malformed values are reported together, one entry per field,
//! the way the schema layer upstream of the services expects.

use inkwell_types::api::{
    CreateCommentRequest, CreateMediaRequest, CreatePostRequest, LoginRequest, RegisterRequest,
    UpdateCommentRequest, UpdateMediaInput, UpdateMediaRequest, UpdatePostInput, UpdatePostRequest,
    UpdateUserInput, UpdateUserRequest,
};
use inkwell_types::{Error, FieldError, Result};
use validator::{ValidateEmail, ValidateUrl};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 16;
const PASSWORD_MIN: usize = 8;

#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub fn register(req: RegisterRequest) -> Result<RegisterInput> {
    let mut errors = Vec::new();

    let email = require(req.email, "email", &mut errors);
    if let Some(email) = &email {
        if !email.validate_email() {
            errors.push(FieldError::new("email", "Invalid email"));
        }
    }

    let username = require(req.username, "username", &mut errors);
    if let Some(username) = &username {
        check_username(username, &mut errors);
    }

    let password = require(req.password, "password", &mut errors);
    if let Some(password) = &password {
        check_password(password, &mut errors);
    }

    finish(errors)?;
    // All three are present once `finish` passed
    match (email, username, password) {
        (Some(email), Some(username), Some(password)) => Ok(RegisterInput {
            email,
            username,
            password,
        }),
        _ => Err(Error::Validation(vec![])),
    }
}

pub fn login(req: LoginRequest) -> Result<(String, String)> {
    let mut errors = Vec::new();

    let email = require(req.email, "email", &mut errors);
    if let Some(email) = &email {
        if !email.validate_email() {
            errors.push(FieldError::new("email", "Invalid email"));
        }
    }
    let password = require(req.password, "password", &mut errors);

    finish(errors)?;
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(Error::Validation(vec![])),
    }
}

pub fn update_user(req: UpdateUserRequest) -> Result<UpdateUserInput> {
    let mut errors = Vec::new();

    if let Some(username) = &req.username {
        check_username(username, &mut errors);
    }
    if let Some(password) = &req.password {
        check_password(password, &mut errors);
    }
    if let Some(url) = &req.profile_image {
        if !url.validate_url() {
            errors.push(FieldError::new(
                "profile_image",
                "profile_image must be a valid URL",
            ));
        }
    }

    finish(errors)?;
    Ok(UpdateUserInput {
        username: req.username,
        password: req.password,
        profile_image: req.profile_image,
    })
}

pub fn create_post(req: CreatePostRequest) -> Result<(String, String)> {
    let mut errors = Vec::new();
    let title = require(req.title, "title", &mut errors);
    let content = require(req.content, "content", &mut errors);
    if let Some(title) = &title {
        if title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title cannot be empty"));
        }
    }

    finish(errors)?;
    match (title, content) {
        (Some(title), Some(content)) => Ok((title, content)),
        _ => Err(Error::Validation(vec![])),
    }
}

pub fn update_post(req: UpdatePostRequest) -> UpdatePostInput {
    // Every field is optional and unconstrained; the slug is not updatable.
    UpdatePostInput {
        title: req.title,
        content: req.content,
        published: req.published,
    }
}

pub fn create_comment(req: CreateCommentRequest) -> Result<String> {
    let mut errors = Vec::new();
    let content = require(req.content, "content", &mut errors);
    if let Some(content) = &content {
        check_comment_content(content, &mut errors);
    }

    finish(errors)?;
    content.ok_or_else(|| Error::Validation(vec![]))
}

pub fn update_comment(req: UpdateCommentRequest) -> Result<Option<String>> {
    let mut errors = Vec::new();
    if let Some(content) = &req.content {
        check_comment_content(content, &mut errors);
    }
    finish(errors)?;
    Ok(req.content)
}

pub fn create_media(req: CreateMediaRequest) -> Result<inkwell_types::api::CreateMediaInput> {
    let mut errors = Vec::new();

    let url = require(req.url, "url", &mut errors);
    if let Some(url) = &url {
        if !url.validate_url() {
            errors.push(FieldError::new("url", "Invalid URL format"));
        }
    }
    let position = match req.position {
        None => {
            errors.push(FieldError::new("position", "Required"));
            None
        }
        Some(p) => check_position(p, &mut errors),
    };

    finish(errors)?;
    match (url, position) {
        (Some(url), Some(position)) => Ok(inkwell_types::api::CreateMediaInput {
            url,
            caption: req.caption,
            position,
        }),
        _ => Err(Error::Validation(vec![])),
    }
}

pub fn update_media(req: UpdateMediaRequest) -> Result<UpdateMediaInput> {
    let mut errors = Vec::new();

    if let Some(url) = &req.url {
        if !url.validate_url() {
            errors.push(FieldError::new("url", "Invalid URL format"));
        }
    }
    let position = match req.position {
        None => None,
        Some(p) => check_position(p, &mut errors),
    };

    finish(errors)?;
    Ok(UpdateMediaInput {
        url: req.url,
        caption: req.caption,
        position,
    })
}

// -- Shared checks --

fn require(value: Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    if value.is_none() {
        errors.push(FieldError::new(field, "Required"));
    }
    value
}

fn check_username(username: &str, errors: &mut Vec<FieldError>) {
    let len = username.chars().count();
    if len < USERNAME_MIN {
        errors.push(FieldError::new(
            "username",
            format!("Username must be at least {} characters", USERNAME_MIN),
        ));
    } else if len > USERNAME_MAX {
        errors.push(FieldError::new(
            "username",
            format!("Username must be at most {} characters", USERNAME_MAX),
        ));
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.chars().count() < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN),
        ));
    }
}

fn check_comment_content(content: &str, errors: &mut Vec<FieldError>) {
    if content.is_empty() {
        errors.push(FieldError::new("content", "Comment content cannot be empty"));
    }
}

fn check_position(position: i64, errors: &mut Vec<FieldError>) -> Option<u32> {
    match u32::try_from(position) {
        Ok(p) => Some(p),
        Err(_) => {
            errors.push(FieldError::new(
                "position",
                "Position must be a non-negative integer",
            ));
            None
        }
    }
}

fn finish(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}
