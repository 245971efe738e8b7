use serde::{Deserialize, Serialize};

use crate::catalog::types::{Book, BookId, Genre};
use crate::users::types::{User, UserId};

/// Unique identifier for a review document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReviewId(pub String);

impl ReviewId {
    /// Generates a new random UUID v4-based ReviewId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// One ledger entry: a single reader's current helpful/unhelpful verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HelpfulVote {
    pub user_id: UserId,
    pub is_helpful: bool,
}

/// A reader's review of a book.
///
/// Invariants maintained by `ratings::ledger`: `helpful_votes` holds at most
/// one entry per voter, and `helpful` always equals the helpful-true count
/// minus the helpful-false count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    /// Integer star rating, 1–5.
    pub rating: u8,
    pub review: String,
    /// Signed tally over `helpful_votes`.
    pub helpful: i64,
    pub helpful_votes: Vec<HelpfulVote>,
    pub spoiler: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Reviewer identity attached to review listings.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub avatar: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Book identity attached to a reader's review history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub genre: Genre,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            cover_image: book.cover_image.clone(),
            genre: book.genre,
        }
    }
}

/// A review as returned by the list endpoints, with whichever summaries the
/// endpoint populates.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookSummary>,
}
