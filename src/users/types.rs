use serde::{Deserialize, Serialize};

use crate::catalog::types::Genre;

/// Unique identifier for a user document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    /// Generates a new random UUID v4-based UserId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/100x100?text=Reader";

/// A registered reader.
///
/// Credentials live in the identity layer in front of this service; the
/// profile carries no secret material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub favorite_genres: Vec<Genre>,
    pub is_admin: bool,
    /// Count of this reader's reviews, kept in sync by the review lifecycle.
    pub total_reviews: u64,
    pub member_since: u64,
}

/// Aggregated reading statistics for a profile page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_reviews: u64,
    /// Mean rating this reader has given, one decimal place.
    pub average_rating: f64,
    /// Helpful-vote tally summed across the reader's reviews.
    pub total_helpful: i64,
    pub favorite_genres: Vec<GenreCount>,
    pub member_since: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreCount {
    pub genre: Genre,
    pub count: u64,
}
