//! User Module Tests
//!
//! Validates the profile statistics: totals, the shared tenths rounding on
//! the mean rating given, helpful-vote sums, and the genre leaderboard.

#[cfg(test)]
mod tests {
    use crate::catalog::types::{Book, BookId, Genre, DEFAULT_COVER_IMAGE, DEFAULT_LANGUAGE};
    use crate::reviews::types::{Review, ReviewId};
    use crate::store::{now_ms, Store};
    use crate::users::handlers::compute_user_stats;
    use crate::users::types::{User, UserId, DEFAULT_AVATAR};

    fn test_user(username: &str) -> User {
        User {
            id: UserId::new(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            bio: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            favorite_genres: vec![],
            is_admin: false,
            total_reviews: 0,
            member_since: 1_700_000_000_000,
        }
    }

    fn test_book(genre: Genre) -> Book {
        Book {
            id: BookId::new(),
            title: "Stats Fixture".to_string(),
            author: "Fixture Author".to_string(),
            description: "Counted but never actually read.".to_string(),
            cover_image: DEFAULT_COVER_IMAGE.to_string(),
            genre,
            published_year: 1995,
            isbn: None,
            pages: None,
            language: DEFAULT_LANGUAGE.to_string(),
            average_rating: 0.0,
            total_reviews: 0,
            total_ratings: 0,
            featured: false,
            added_by: UserId::new(),
            created_at: now_ms(),
        }
    }

    fn test_review(book_id: &BookId, user_id: &UserId, rating: u8, helpful: i64) -> Review {
        let now = now_ms();
        Review {
            id: ReviewId::new(),
            book_id: book_id.clone(),
            user_id: user_id.clone(),
            rating,
            review: "A review with enough substance.".to_string(),
            helpful,
            helpful_votes: Vec::new(),
            spoiler: false,
            created_at: now,
            updated_at: now,
        }
    }

    async fn add_reviewed_book(
        store: &Store,
        reader: &UserId,
        genre: Genre,
        rating: u8,
        helpful: i64,
    ) {
        let book = test_book(genre);
        let book_id = book.id.clone();
        store.save_book(book).await.unwrap();
        store
            .save_review(test_review(&book_id, reader, rating, helpful))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_stats_totals_and_rounding() {
        let store = Store::new();
        let user = test_user("statsreader");
        store.save_user(user.clone()).await.unwrap();

        // Ratings [5, 4, 4]: mean 4.333... rounds to 4.3
        add_reviewed_book(&store, &user.id, Genre::Fiction, 5, 3).await;
        add_reviewed_book(&store, &user.id, Genre::Fiction, 4, -1).await;
        add_reviewed_book(&store, &user.id, Genre::Mystery, 4, 2).await;

        let stats = compute_user_stats(&store, &user).await.unwrap();

        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.average_rating, 4.3);
        assert_eq!(stats.total_helpful, 4);
        assert_eq!(stats.member_since, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_stats_empty_profile() {
        let store = Store::new();
        let user = test_user("lurker");
        store.save_user(user.clone()).await.unwrap();

        let stats = compute_user_stats(&store, &user).await.unwrap();

        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_helpful, 0);
        assert!(stats.favorite_genres.is_empty());
    }

    #[tokio::test]
    async fn test_stats_genre_leaderboard_ordering() {
        let store = Store::new();
        let user = test_user("genrereader");
        store.save_user(user.clone()).await.unwrap();

        add_reviewed_book(&store, &user.id, Genre::Fantasy, 5, 0).await;
        add_reviewed_book(&store, &user.id, Genre::Fantasy, 4, 0).await;
        add_reviewed_book(&store, &user.id, Genre::Fantasy, 4, 0).await;
        add_reviewed_book(&store, &user.id, Genre::History, 3, 0).await;
        add_reviewed_book(&store, &user.id, Genre::History, 5, 0).await;
        add_reviewed_book(&store, &user.id, Genre::Romance, 2, 0).await;

        let stats = compute_user_stats(&store, &user).await.unwrap();

        assert_eq!(stats.favorite_genres.len(), 3);
        assert_eq!(stats.favorite_genres[0].genre, Genre::Fantasy);
        assert_eq!(stats.favorite_genres[0].count, 3);
        assert_eq!(stats.favorite_genres[1].genre, Genre::History);
        assert_eq!(stats.favorite_genres[2].genre, Genre::Romance);
    }

    #[tokio::test]
    async fn test_stats_skip_reviews_of_vanished_books() {
        let store = Store::new();
        let user = test_user("orphaned");
        store.save_user(user.clone()).await.unwrap();

        add_reviewed_book(&store, &user.id, Genre::Biography, 4, 0).await;
        // A review whose book no longer exists still counts toward totals
        // but cannot contribute a genre
        store
            .save_review(test_review(&BookId::new(), &user.id, 2, 0))
            .await
            .unwrap();

        let stats = compute_user_stats(&store, &user).await.unwrap();

        assert_eq!(stats.total_reviews, 2);
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.favorite_genres.len(), 1);
    }
}
