use serde::{Deserialize, Serialize};

use crate::users::types::UserId;

/// Unique identifier for a book document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BookId(pub String);

impl BookId {
    /// Generates a new random UUID v4-based BookId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// The ten fixed shelving genres. Serialized with the display names the API
/// has always used ("Non-Fiction", "Sci-Fi", "Self-Help").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Fantasy,
    Biography,
    History,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Other,
}

pub const DEFAULT_COVER_IMAGE: &str = "https://via.placeholder.com/300x400?text=No+Cover";
pub const DEFAULT_LANGUAGE: &str = "English";

/// A catalogued book.
///
/// `average_rating` and `total_reviews` are caches over the book's review
/// set, recomputed by `ratings::aggregate` after every review mutation.
/// Nothing else writes them and no client can author them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image: String,
    pub genre: Genre,
    pub published_year: u32,
    pub isbn: Option<String>,
    pub pages: Option<u32>,
    pub language: String,
    /// Derived: mean review rating, 0.0–5.0, one decimal place.
    pub average_rating: f64,
    /// Derived: count of reviews for this book.
    pub total_reviews: u64,
    pub total_ratings: u64,
    pub featured: bool,
    pub added_by: UserId,
    pub created_at: u64,
}
