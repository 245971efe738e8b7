//! Rating Pipeline Tests
//!
//! Validates the two derived-state operations: book aggregate recomputation
//! and helpful-vote application.
//!
//! ## Test Scopes
//! - **Aggregator**: mean/count correctness, tenths rounding, empty sets,
//!   idempotence, and the missing-book no-op.
//! - **Ledger**: one entry per voter, vote idempotence, vote reversal, and
//!   tally/ledger consistency after every mutation.

#[cfg(test)]
mod tests {
    use crate::catalog::types::{Book, BookId, Genre, DEFAULT_COVER_IMAGE, DEFAULT_LANGUAGE};
    use crate::ratings::aggregate::recompute_book_rating;
    use crate::ratings::ledger::apply_helpful_vote;
    use crate::reviews::types::{Review, ReviewId};
    use crate::store::{now_ms, Store};
    use crate::users::types::UserId;

    fn test_book(added_by: &UserId) -> Book {
        Book {
            id: BookId::new(),
            title: "Test Book".to_string(),
            author: "Test Author".to_string(),
            description: "A book that exists for testing.".to_string(),
            cover_image: DEFAULT_COVER_IMAGE.to_string(),
            genre: Genre::Fiction,
            published_year: 1999,
            isbn: None,
            pages: None,
            language: DEFAULT_LANGUAGE.to_string(),
            average_rating: 0.0,
            total_reviews: 0,
            total_ratings: 0,
            featured: false,
            added_by: added_by.clone(),
            created_at: now_ms(),
        }
    }

    fn test_review(book_id: &BookId, user_id: &UserId, rating: u8) -> Review {
        let now = now_ms();
        Review {
            id: ReviewId::new(),
            book_id: book_id.clone(),
            user_id: user_id.clone(),
            rating,
            review: "Long enough to pass validation elsewhere.".to_string(),
            helpful: 0,
            helpful_votes: Vec::new(),
            spoiler: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Store with one book and one review per entry of `ratings`, each from
    /// a distinct reader.
    async fn store_with_ratings(ratings: &[u8]) -> (Store, BookId) {
        let store = Store::new();
        let book = test_book(&UserId::new());
        let book_id = book.id.clone();
        store.save_book(book).await.unwrap();

        for &rating in ratings {
            let review = test_review(&book_id, &UserId::new(), rating);
            store.save_review(review).await.unwrap();
        }

        (store, book_id)
    }

    // ============================================================
    // AGGREGATOR TESTS
    // ============================================================

    #[tokio::test]
    async fn test_recompute_sets_mean_and_count() {
        // Mean of [5, 4, 5] is 4.666..., which rounds to 4.7
        let (store, book_id) = store_with_ratings(&[5, 4, 5]).await;

        recompute_book_rating(&store, &book_id).await.unwrap();

        let book = store.get_book(&book_id).await.unwrap().unwrap();
        assert_eq!(book.average_rating, 4.7);
        assert_eq!(book.total_reviews, 3);
    }

    #[tokio::test]
    async fn test_recompute_exact_mean() {
        let (store, book_id) = store_with_ratings(&[1, 2]).await;

        recompute_book_rating(&store, &book_id).await.unwrap();

        let book = store.get_book(&book_id).await.unwrap().unwrap();
        assert_eq!(book.average_rating, 1.5);
        assert_eq!(book.total_reviews, 2);
    }

    #[tokio::test]
    async fn test_recompute_rounds_tenths_half_up() {
        // Twenty reviews summing to 91: the mean is exactly 4.55, which must
        // round up to 4.6, not down through the nearest-double trap.
        let mut ratings = vec![5u8; 11];
        ratings.extend(vec![4u8; 9]);
        assert_eq!(ratings.iter().map(|&r| r as u32).sum::<u32>(), 91);

        let (store, book_id) = store_with_ratings(&ratings).await;
        recompute_book_rating(&store, &book_id).await.unwrap();

        let book = store.get_book(&book_id).await.unwrap().unwrap();
        assert_eq!(book.average_rating, 4.6);
        assert_eq!(book.total_reviews, 20);
    }

    #[tokio::test]
    async fn test_recompute_empty_set_zeroes_aggregate() {
        let (store, book_id) = store_with_ratings(&[]).await;

        // Start from a dirty aggregate to prove recompute resets it
        let mut book = store.get_book(&book_id).await.unwrap().unwrap();
        book.average_rating = 3.2;
        book.total_reviews = 7;
        store.save_book(book).await.unwrap();

        recompute_book_rating(&store, &book_id).await.unwrap();

        let book = store.get_book(&book_id).await.unwrap().unwrap();
        assert_eq!(book.average_rating, 0.0);
        assert_eq!(book.total_reviews, 0);
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let (store, book_id) = store_with_ratings(&[3, 4, 2, 5]).await;

        recompute_book_rating(&store, &book_id).await.unwrap();
        let first = store.get_book(&book_id).await.unwrap().unwrap();

        recompute_book_rating(&store, &book_id).await.unwrap();
        let second = store.get_book(&book_id).await.unwrap().unwrap();

        assert_eq!(first.average_rating, second.average_rating);
        assert_eq!(first.total_reviews, second.total_reviews);
    }

    #[tokio::test]
    async fn test_recompute_missing_book_is_silent_noop() {
        let store = Store::new();

        let result = recompute_book_rating(&store, &BookId::new()).await;

        assert!(result.is_ok(), "missing book must not surface an error");
        assert!(store.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recompute_after_last_review_removed() {
        let (store, book_id) = store_with_ratings(&[4]).await;
        recompute_book_rating(&store, &book_id).await.unwrap();

        let review = store
            .reviews_for_book(&book_id)
            .await
            .unwrap()
            .pop()
            .unwrap();
        store.delete_review(&review.id).await.unwrap();
        recompute_book_rating(&store, &book_id).await.unwrap();

        let book = store.get_book(&book_id).await.unwrap().unwrap();
        assert_eq!(book.average_rating, 0.0);
        assert_eq!(book.total_reviews, 0);
    }

    // ============================================================
    // LEDGER TESTS
    // ============================================================

    async fn store_with_review() -> (Store, ReviewId) {
        let (store, book_id) = store_with_ratings(&[4]).await;
        let review_id = store
            .reviews_for_book(&book_id)
            .await
            .unwrap()
            .pop()
            .unwrap()
            .id;
        (store, review_id)
    }

    async fn vote(store: &Store, review_id: &ReviewId, voter: &UserId, is_helpful: bool) -> i64 {
        let review = store.get_review(review_id).await.unwrap().unwrap();
        apply_helpful_vote(store, review, voter, is_helpful)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_vote_appends_entry() {
        let (store, review_id) = store_with_review().await;
        let voter = UserId::new();

        let tally = vote(&store, &review_id, &voter, true).await;
        assert_eq!(tally, 1);

        let review = store.get_review(&review_id).await.unwrap().unwrap();
        assert_eq!(review.helpful, 1);
        assert_eq!(review.helpful_votes.len(), 1);
        assert_eq!(review.helpful_votes[0].user_id, voter);
        assert!(review.helpful_votes[0].is_helpful);
    }

    #[tokio::test]
    async fn test_unhelpful_vote_decrements() {
        let (store, review_id) = store_with_review().await;

        let tally = vote(&store, &review_id, &UserId::new(), false).await;
        assert_eq!(tally, -1);
    }

    #[tokio::test]
    async fn test_repeat_vote_is_idempotent() {
        let (store, review_id) = store_with_review().await;
        let voter = UserId::new();

        vote(&store, &review_id, &voter, true).await;
        let tally = vote(&store, &review_id, &voter, true).await;

        assert_eq!(tally, 1, "second identical vote must not move the tally");
        let review = store.get_review(&review_id).await.unwrap().unwrap();
        assert_eq!(review.helpful_votes.len(), 1, "no duplicate entry");
    }

    #[tokio::test]
    async fn test_vote_reversal_moves_tally_by_two() {
        let (store, review_id) = store_with_review().await;
        let voter = UserId::new();

        let up = vote(&store, &review_id, &voter, true).await;
        assert_eq!(up, 1);

        let down = vote(&store, &review_id, &voter, false).await;
        assert_eq!(down, -1, "helpful -> unhelpful is a -2 swing");

        let back = vote(&store, &review_id, &voter, true).await;
        assert_eq!(back, 1, "unhelpful -> helpful is a +2 swing");
    }

    #[tokio::test]
    async fn test_vote_scenario_same_then_switch() {
        // Voter A: helpful (0 -> 1), helpful again (1), unhelpful (1 -> -1)
        let (store, review_id) = store_with_review().await;
        let voter = UserId::new();

        assert_eq!(vote(&store, &review_id, &voter, true).await, 1);
        assert_eq!(vote(&store, &review_id, &voter, true).await, 1);
        assert_eq!(vote(&store, &review_id, &voter, false).await, -1);
    }

    #[tokio::test]
    async fn test_ledger_one_entry_per_voter() {
        let (store, review_id) = store_with_review().await;
        let voters: Vec<UserId> = (0..3).map(|_| UserId::new()).collect();

        // Each voter votes twice, some switching sides
        for voter in &voters {
            vote(&store, &review_id, voter, true).await;
        }
        vote(&store, &review_id, &voters[0], true).await;
        vote(&store, &review_id, &voters[1], false).await;

        let review = store.get_review(&review_id).await.unwrap().unwrap();
        assert_eq!(
            review.helpful_votes.len(),
            voters.len(),
            "ledger never exceeds the number of distinct voters"
        );
    }

    #[tokio::test]
    async fn test_tally_matches_ledger_after_mutations() {
        let (store, review_id) = store_with_review().await;
        let a = UserId::new();
        let b = UserId::new();
        let c = UserId::new();

        vote(&store, &review_id, &a, true).await;
        vote(&store, &review_id, &b, false).await;
        vote(&store, &review_id, &c, true).await;
        vote(&store, &review_id, &b, true).await;
        vote(&store, &review_id, &a, false).await;

        let review = store.get_review(&review_id).await.unwrap().unwrap();
        let helpful = review.helpful_votes.iter().filter(|v| v.is_helpful).count() as i64;
        let unhelpful = review.helpful_votes.len() as i64 - helpful;
        assert_eq!(review.helpful, helpful - unhelpful);
    }
}
