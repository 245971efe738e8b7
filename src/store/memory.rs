use dashmap::DashMap;

use crate::catalog::types::{Book, BookId};
use crate::reviews::types::{Review, ReviewId};
use crate::users::types::{User, UserId};

use super::StoreError;

/// In-memory document store.
///
/// One concurrent map per collection. Individual document writes are
/// serialized by the map; there is no cross-document transaction, so
/// read-then-write sequences over multiple documents are last-writer-wins
/// under concurrency (see the ratings module for where this matters).
pub struct Store {
    books: DashMap<BookId, Book>,
    reviews: DashMap<ReviewId, Review>,
    users: DashMap<UserId, User>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            reviews: DashMap::new(),
            users: DashMap::new(),
        }
    }

    // --- Books ---

    pub async fn get_book(&self, id: &BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.books.get(id).map(|entry| entry.value().clone()))
    }

    /// Inserts or overwrites the full book document.
    pub async fn save_book(&self, book: Book) -> Result<(), StoreError> {
        self.books.insert(book.id.clone(), book);
        Ok(())
    }

    pub async fn delete_book(&self, id: &BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.books.remove(id).map(|(_, book)| book))
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self
            .books
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    /// Uniqueness probe for the optional ISBN field. `exclude` skips the
    /// book being updated so it does not collide with itself.
    pub async fn book_with_isbn(
        &self,
        isbn: &str,
        exclude: Option<&BookId>,
    ) -> Result<Option<Book>, StoreError> {
        Ok(self
            .books
            .iter()
            .find(|entry| {
                entry.value().isbn.as_deref() == Some(isbn)
                    && Some(entry.key()) != exclude
            })
            .map(|entry| entry.value().clone()))
    }

    // --- Reviews ---

    pub async fn get_review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        Ok(self.reviews.get(id).map(|entry| entry.value().clone()))
    }

    /// Inserts or overwrites the full review document (ledger included), so
    /// a tally and its ledger always land in one write.
    pub async fn save_review(&self, review: Review) -> Result<(), StoreError> {
        self.reviews.insert(review.id.clone(), review);
        Ok(())
    }

    pub async fn delete_review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        Ok(self.reviews.remove(id).map(|(_, review)| review))
    }

    pub async fn reviews_for_book(&self, book_id: &BookId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .reviews
            .iter()
            .filter(|entry| entry.value().book_id == *book_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    pub async fn reviews_by_user(&self, user_id: &UserId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .reviews
            .iter()
            .filter(|entry| entry.value().user_id == *user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    /// The one-review-per-reader probe: at most one review exists per
    /// (book, user) pair.
    pub async fn review_by_book_and_user(
        &self,
        book_id: &BookId,
        user_id: &UserId,
    ) -> Result<Option<Review>, StoreError> {
        Ok(self
            .reviews
            .iter()
            .find(|entry| {
                entry.value().book_id == *book_id && entry.value().user_id == *user_id
            })
            .map(|entry| entry.value().clone()))
    }

    /// Cascade used by book deletion. Returns the removed reviews so the
    /// caller can adjust reviewer counters.
    pub async fn delete_reviews_for_book(
        &self,
        book_id: &BookId,
    ) -> Result<Vec<Review>, StoreError> {
        let ids: Vec<ReviewId> = self
            .reviews
            .iter()
            .filter(|entry| entry.value().book_id == *book_id)
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some((_, review)) = self.reviews.remove(&id) {
                removed.push(review);
            }
        }
        Ok(removed)
    }

    // --- Users ---

    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    pub async fn save_user(&self, user: User) -> Result<(), StoreError> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    pub async fn user_with_username(
        &self,
        username: &str,
        exclude: Option<&UserId>,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().username == username && Some(entry.key()) != exclude)
            .map(|entry| entry.value().clone()))
    }

    pub async fn user_with_email(
        &self,
        email: &str,
        exclude: Option<&UserId>,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email && Some(entry.key()) != exclude)
            .map(|entry| entry.value().clone()))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
