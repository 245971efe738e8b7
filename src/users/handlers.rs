use axum::extract::Path;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::types::{GenreCount, User, UserId, UserStats};
use crate::auth;
use crate::catalog::query::Order;
use crate::catalog::types::Genre;
use crate::error::AppError;
use crate::ratings::aggregate::rounded_mean;
use crate::reviews::handlers::{sort_reviews, with_details, ReviewSort};
use crate::reviews::types::ReviewView;
use crate::store::{Store, StoreError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user: User,
    pub recent_reviews: Vec<ReviewView>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub favorite_genres: Option<Vec<Genre>>,
}

#[derive(Debug, Serialize)]
pub struct UserMutationResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub stats: UserStats,
}

/// Public profile: the user document plus their five most recent reviews
/// with book summaries.
pub async fn handle_get_user(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
) -> Result<Json<UserProfileResponse>, AppError> {
    let id = UserId(id);
    let Some(user) = store.get_user(&id).await? else {
        return Err(AppError::NotFound("User"));
    };

    let mut reviews = store.reviews_by_user(&id).await?;
    sort_reviews(&mut reviews, ReviewSort::CreatedAt, Order::Desc);
    reviews.truncate(5);

    let recent_reviews = with_details(&store, reviews, true).await?;

    Ok(Json(UserProfileResponse {
        user,
        recent_reviews,
    }))
}

/// Self-service profile update. Username and email stay unique across the
/// user collection.
pub async fn handle_update_user(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserMutationResponse>, AppError> {
    let actor = auth::require_user(&store, &headers).await?;

    let id = UserId(id);
    if actor.id != id {
        return Err(AppError::Forbidden(
            "Not authorized to update this profile".to_string(),
        ));
    }

    let mut user = actor;

    if let Some(username) = req.username {
        validate_username(&username)?;
        if store
            .user_with_username(&username, Some(&user.id))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
        user.username = username;
    }

    if let Some(email) = req.email {
        validate_email(&email)?;
        if store.user_with_email(&email, Some(&user.id)).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        user.email = email;
    }

    if let Some(bio) = req.bio {
        if bio.chars().count() > 500 {
            return Err(AppError::Validation(
                "Bio cannot exceed 500 characters".to_string(),
            ));
        }
        user.bio = bio;
    }

    if let Some(avatar) = req.avatar {
        user.avatar = avatar;
    }

    if let Some(favorite_genres) = req.favorite_genres {
        user.favorite_genres = favorite_genres;
    }

    store.save_user(user.clone()).await?;

    Ok(Json(UserMutationResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

pub async fn handle_user_stats(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
) -> Result<Json<UserStatsResponse>, AppError> {
    let id = UserId(id);
    let Some(user) = store.get_user(&id).await? else {
        return Err(AppError::NotFound("User"));
    };

    let stats = compute_user_stats(&store, &user).await?;
    Ok(Json(UserStatsResponse { stats }))
}

/// Scans the reader's reviews for totals and their top five genres. The
/// mean rating uses the same tenths rounding as the book aggregator.
pub(crate) async fn compute_user_stats(
    store: &Store,
    user: &User,
) -> Result<UserStats, StoreError> {
    let reviews = store.reviews_by_user(&user.id).await?;

    let average_rating = if reviews.is_empty() {
        0.0
    } else {
        let sum: u64 = reviews.iter().map(|review| u64::from(review.rating)).sum();
        rounded_mean(sum, reviews.len())
    };

    let total_helpful = reviews.iter().map(|review| review.helpful).sum();

    let mut counts: HashMap<Genre, u64> = HashMap::new();
    for review in &reviews {
        if let Some(book) = store.get_book(&review.book_id).await? {
            *counts.entry(book.genre).or_insert(0) += 1;
        }
    }

    let mut favorite_genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount { genre, count })
        .collect();
    favorite_genres.sort_by(|a, b| b.count.cmp(&a.count));
    favorite_genres.truncate(5);

    Ok(UserStats {
        total_reviews: reviews.len() as u64,
        average_rating,
        total_helpful,
        favorite_genres,
        member_since: user.member_since,
    })
}

fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Err(AppError::Validation(
            "Username must be between 3 and 30 characters".to_string(),
        ));
    }

    let re = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    if !re.is_match(username) {
        return Err(AppError::Validation(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    if !re.is_match(email) {
        return Err(AppError::Validation(
            "Please provide a valid email".to_string(),
        ));
    }
    Ok(())
}
