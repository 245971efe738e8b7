use serde::Deserialize;
use std::cmp::Ordering;

use super::search::{matches_query, tokenize_query};
use super::types::{Book, Genre};

/// Sort keys accepted by the book list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BookSort {
    Title,
    Author,
    PublishedYear,
    AverageRating,
    #[default]
    CreatedAt,
}

/// Sort direction shared by the list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    }
}

/// Filter criteria for a catalogue listing.
#[derive(Debug, Default)]
pub struct BookQuery {
    pub search: Option<String>,
    pub genre: Option<Genre>,
    pub sort: BookSort,
    pub order: Order,
}

/// Applies search, genre filter, and ordering to a full catalogue scan.
pub fn filter_and_sort(mut books: Vec<Book>, query: &BookQuery) -> Vec<Book> {
    if let Some(genre) = query.genre {
        books.retain(|book| book.genre == genre);
    }

    if let Some(search) = query.search.as_deref() {
        let tokens = tokenize_query(search);
        books.retain(|book| matches_query(book, &tokens));
    }

    books.sort_by(|a, b| query.order.apply(compare(a, b, query.sort)));
    books
}

/// The featured shelf: featured books, best-rated first, review count as
/// tie-breaker, capped at six.
pub fn featured_shelf(mut books: Vec<Book>) -> Vec<Book> {
    books.retain(|book| book.featured);
    books.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(Ordering::Equal)
            .then(b.total_reviews.cmp(&a.total_reviews))
    });
    books.truncate(6);
    books
}

fn compare(a: &Book, b: &Book, sort: BookSort) -> Ordering {
    match sort {
        BookSort::Title => a.title.cmp(&b.title),
        BookSort::Author => a.author.cmp(&b.author),
        BookSort::PublishedYear => a.published_year.cmp(&b.published_year),
        // Ratings are always finite, so partial_cmp cannot actually fail
        BookSort::AverageRating => a
            .average_rating
            .partial_cmp(&b.average_rating)
            .unwrap_or(Ordering::Equal),
        BookSort::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
