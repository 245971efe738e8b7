//! Identity Seam
//!
//! Resolves the acting user for a request. Token verification happens in the
//! identity layer in front of this service; by the time a request arrives
//! here, the authenticated user id travels in the `x-user-id` header. These
//! helpers are the only place headers are inspected; handlers work with a
//! resolved `User` or nothing.

use axum::http::HeaderMap;

use crate::error::AppError;
use crate::store::Store;
use crate::users::types::{User, UserId};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the acting user if the request carries a known id. A missing
/// header or an id no user matches is simply "anonymous", not an error.
pub async fn identify(store: &Store, headers: &HeaderMap) -> Result<Option<User>, AppError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let Ok(id) = value.to_str() else {
        return Ok(None);
    };

    Ok(store.get_user(&UserId(id.to_string())).await?)
}

/// Like `identify`, but anonymous requests are rejected with 401.
pub async fn require_user(store: &Store, headers: &HeaderMap) -> Result<User, AppError> {
    match identify(store, headers).await? {
        Some(user) => Ok(user),
        None => Err(AppError::Unauthorized),
    }
}

pub fn require_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}
