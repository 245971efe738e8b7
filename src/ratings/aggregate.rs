use crate::catalog::types::BookId;
use crate::store::{Store, StoreError};

/// Recomputes a book's `average_rating` and `total_reviews` from the
/// authoritative review set and persists the book in one write.
///
/// A book with no reviews gets `0.0` / `0`. A missing book is a silent
/// no-op: the triggering review write must not fail because the book was
/// deleted out from under it. Store failures propagate unretried.
pub async fn recompute_book_rating(store: &Store, book_id: &BookId) -> Result<(), StoreError> {
    let Some(mut book) = store.get_book(book_id).await? else {
        return Ok(());
    };

    let reviews = store.reviews_for_book(book_id).await?;

    if reviews.is_empty() {
        book.average_rating = 0.0;
        book.total_reviews = 0;
    } else {
        let sum: u64 = reviews.iter().map(|review| u64::from(review.rating)).sum();
        book.average_rating = rounded_mean(sum, reviews.len());
        book.total_reviews = reviews.len() as u64;
    }

    store.save_book(book).await
}

/// Mean of `sum` over `count`, rounded half-up on the tenths digit.
///
/// The sum is scaled by ten before the division so an exact tenths half
/// (91/20 = 4.55) is representable and rounds up, instead of landing on the
/// nearest double just below the half. Rounding happens only here, never on
/// intermediate values.
pub(crate) fn rounded_mean(sum: u64, count: usize) -> f64 {
    ((sum * 10) as f64 / count as f64).round() / 10.0
}
