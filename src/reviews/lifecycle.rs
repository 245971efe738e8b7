//! Review Lifecycle Operations
//!
//! The write paths for reviews. Each one finishes by explicitly invoking the
//! rating aggregator (and, for create/delete, the reviewer's counter) so the
//! derived state is settled before the triggering request completes.

use super::types::{Review, ReviewId};
use crate::error::AppError;
use crate::ratings::aggregate::recompute_book_rating;
use crate::ratings::ledger::apply_helpful_vote;
use crate::catalog::types::BookId;
use crate::store::{now_ms, Store, StoreError};
use crate::users::types::{User, UserId};

/// Fields of a new review, already validated by the HTTP layer.
#[derive(Debug)]
pub struct NewReview {
    pub book_id: BookId,
    pub rating: u8,
    pub review: String,
    pub spoiler: bool,
}

/// Partial update to an existing review.
#[derive(Debug, Default)]
pub struct ReviewPatch {
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub spoiler: Option<bool>,
}

/// Creates a review for `author`, enforcing one review per (book, reader)
/// pair, then re-aggregates the book and bumps the author's counter.
pub async fn create_review(
    store: &Store,
    author: &User,
    input: NewReview,
) -> Result<Review, AppError> {
    if store.get_book(&input.book_id).await?.is_none() {
        return Err(AppError::NotFound("Book"));
    }

    if store
        .review_by_book_and_user(&input.book_id, &author.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You have already reviewed this book".to_string(),
        ));
    }

    let now = now_ms();
    let review = Review {
        id: ReviewId::new(),
        book_id: input.book_id,
        user_id: author.id.clone(),
        rating: input.rating,
        review: input.review,
        helpful: 0,
        helpful_votes: Vec::new(),
        spoiler: input.spoiler,
        created_at: now,
        updated_at: now,
    };

    store.save_review(review.clone()).await?;
    recompute_book_rating(store, &review.book_id).await?;
    bump_review_count(store, &author.id, 1).await?;

    tracing::debug!("Review {} created for book {}", review.id.0, review.book_id.0);
    Ok(review)
}

/// Applies a patch to the actor's own review. The book is re-aggregated only
/// when the patch changed the rating; text and spoiler edits leave the
/// aggregate untouched.
pub async fn update_review(
    store: &Store,
    actor: &User,
    review_id: &ReviewId,
    patch: ReviewPatch,
) -> Result<Review, AppError> {
    let Some(mut review) = store.get_review(review_id).await? else {
        return Err(AppError::NotFound("Review"));
    };

    if review.user_id != actor.id {
        return Err(AppError::Forbidden(
            "Not authorized to update this review".to_string(),
        ));
    }

    let rating_changed = patch.rating.is_some_and(|rating| rating != review.rating);

    if let Some(rating) = patch.rating {
        review.rating = rating;
    }
    if let Some(text) = patch.review {
        review.review = text;
    }
    if let Some(spoiler) = patch.spoiler {
        review.spoiler = spoiler;
    }
    review.updated_at = now_ms();

    store.save_review(review.clone()).await?;

    if rating_changed {
        recompute_book_rating(store, &review.book_id).await?;
    }

    Ok(review)
}

/// Deletes a review (owner or admin), re-aggregates the book, and drops the
/// author's counter.
pub async fn delete_review(
    store: &Store,
    actor: &User,
    review_id: &ReviewId,
) -> Result<(), AppError> {
    let Some(review) = store.get_review(review_id).await? else {
        return Err(AppError::NotFound("Review"));
    };

    if review.user_id != actor.id && !actor.is_admin {
        return Err(AppError::Forbidden(
            "Not authorized to delete this review".to_string(),
        ));
    }

    store.delete_review(review_id).await?;
    recompute_book_rating(store, &review.book_id).await?;
    bump_review_count(store, &review.user_id, -1).await?;

    tracing::debug!("Review {} deleted from book {}", review.id.0, review.book_id.0);
    Ok(())
}

/// Records `voter`'s helpful/unhelpful verdict on a review and returns the
/// updated tally. Authors cannot vote on their own reviews.
pub async fn vote_helpful(
    store: &Store,
    voter: &User,
    review_id: &ReviewId,
    is_helpful: bool,
) -> Result<i64, AppError> {
    let Some(review) = store.get_review(review_id).await? else {
        return Err(AppError::NotFound("Review"));
    };

    if review.user_id == voter.id {
        return Err(AppError::Validation(
            "Cannot vote on your own review".to_string(),
        ));
    }

    Ok(apply_helpful_vote(store, review, &voter.id, is_helpful).await?)
}

/// Adjusts a reader's `total_reviews` counter. A missing user is skipped;
/// the counter is a convenience field, not part of the review's own
/// consistency contract.
pub(crate) async fn bump_review_count(
    store: &Store,
    user_id: &UserId,
    delta: i64,
) -> Result<(), StoreError> {
    if let Some(mut user) = store.get_user(user_id).await? {
        user.total_reviews = if delta < 0 {
            user.total_reviews.saturating_sub(delta.unsigned_abs())
        } else {
            user.total_reviews + delta as u64
        };
        store.save_user(user).await?;
    }
    Ok(())
}
