use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::query::{filter_and_sort, featured_shelf, BookQuery, BookSort, Order};
use super::types::{Book, BookId, Genre, DEFAULT_COVER_IMAGE, DEFAULT_LANGUAGE};
use crate::auth;
use crate::error::AppError;
use crate::pagination::{paginate, resolve_page, Pagination};
use crate::reviews::lifecycle::bump_review_count;
use crate::reviews::types::Review;
use crate::store::{now_ms, Store};

const DEFAULT_PAGE_SIZE: usize = 12;
const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ListBooksParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub genre: Option<Genre>,
    pub sort: Option<BookSort>,
    pub order: Option<Order>,
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct FeaturedBooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub book: Book,
    pub user_review: Option<Review>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: Genre,
    pub published_year: u32,
    pub isbn: Option<String>,
    pub pages: Option<u32>,
    pub cover_image: Option<String>,
    pub language: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genre: Option<Genre>,
    pub published_year: Option<u32>,
    pub isbn: Option<String>,
    pub pages: Option<u32>,
    pub cover_image: Option<String>,
    pub language: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BookMutationResponse {
    pub message: String,
    pub book: Book,
}

#[derive(Debug, Serialize)]
pub struct DeleteBookResponse {
    pub message: String,
}

pub async fn handle_list_books(
    Extension(store): Extension<Arc<Store>>,
    Query(params): Query<ListBooksParams>,
) -> Result<Json<BookListResponse>, AppError> {
    let (page, limit) = resolve_page(params.page, params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)?;

    let query = BookQuery {
        search: params.search,
        genre: params.genre,
        sort: params.sort.unwrap_or_default(),
        order: params.order.unwrap_or_default(),
    };

    let books = filter_and_sort(store.list_books().await?, &query);
    let (books, pagination) = paginate(books, page, limit);

    Ok(Json(BookListResponse { books, pagination }))
}

pub async fn handle_featured_books(
    Extension(store): Extension<Arc<Store>>,
) -> Result<Json<FeaturedBooksResponse>, AppError> {
    let books = featured_shelf(store.list_books().await?);
    Ok(Json(FeaturedBooksResponse { books }))
}

pub async fn handle_get_book(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BookDetailResponse>, AppError> {
    let id = BookId(id);
    let Some(book) = store.get_book(&id).await? else {
        return Err(AppError::NotFound("Book"));
    };

    // The detail view also tells a signed-in reader whether they already
    // reviewed this book; anonymous requests just get a null.
    let user_review = match auth::identify(&store, &headers).await? {
        Some(user) => store.review_by_book_and_user(&id, &user.id).await?,
        None => None,
    };

    Ok(Json(BookDetailResponse { book, user_review }))
}

pub async fn handle_create_book(
    Extension(store): Extension<Arc<Store>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookMutationResponse>), AppError> {
    let actor = auth::require_user(&store, &headers).await?;
    auth::require_admin(&actor)?;

    validate_title(&req.title)?;
    validate_author(&req.author)?;
    validate_description(&req.description)?;
    validate_published_year(req.published_year)?;
    validate_pages(req.pages)?;

    if let Some(isbn) = req.isbn.as_deref() {
        if store.book_with_isbn(isbn, None).await?.is_some() {
            return Err(AppError::Conflict(
                "Book with this ISBN already exists".to_string(),
            ));
        }
    }

    let book = Book {
        id: BookId::new(),
        title: req.title,
        author: req.author,
        description: req.description,
        cover_image: req
            .cover_image
            .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string()),
        genre: req.genre,
        published_year: req.published_year,
        isbn: req.isbn,
        pages: req.pages,
        language: req.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        average_rating: 0.0,
        total_reviews: 0,
        total_ratings: 0,
        featured: req.featured.unwrap_or(false),
        added_by: actor.id.clone(),
        created_at: now_ms(),
    };

    store.save_book(book.clone()).await?;
    tracing::info!("Book added: {} ({})", book.title, book.id.0);

    Ok((
        StatusCode::CREATED,
        Json(BookMutationResponse {
            message: "Book added successfully".to_string(),
            book,
        }),
    ))
}

pub async fn handle_update_book(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookMutationResponse>, AppError> {
    let actor = auth::require_user(&store, &headers).await?;
    auth::require_admin(&actor)?;

    let id = BookId(id);
    let Some(mut book) = store.get_book(&id).await? else {
        return Err(AppError::NotFound("Book"));
    };

    if let Some(title) = req.title {
        validate_title(&title)?;
        book.title = title;
    }
    if let Some(author) = req.author {
        validate_author(&author)?;
        book.author = author;
    }
    if let Some(description) = req.description {
        validate_description(&description)?;
        book.description = description;
    }
    if let Some(genre) = req.genre {
        book.genre = genre;
    }
    if let Some(year) = req.published_year {
        validate_published_year(year)?;
        book.published_year = year;
    }
    if let Some(isbn) = req.isbn {
        if store.book_with_isbn(&isbn, Some(&id)).await?.is_some() {
            return Err(AppError::Conflict(
                "Book with this ISBN already exists".to_string(),
            ));
        }
        book.isbn = Some(isbn);
    }
    if let Some(pages) = req.pages {
        validate_pages(Some(pages))?;
        book.pages = Some(pages);
    }
    if let Some(cover_image) = req.cover_image {
        book.cover_image = cover_image;
    }
    if let Some(language) = req.language {
        book.language = language;
    }
    if let Some(featured) = req.featured {
        book.featured = featured;
    }

    store.save_book(book.clone()).await?;

    Ok(Json(BookMutationResponse {
        message: "Book updated successfully".to_string(),
        book,
    }))
}

pub async fn handle_delete_book(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteBookResponse>, AppError> {
    let actor = auth::require_user(&store, &headers).await?;
    auth::require_admin(&actor)?;

    let id = BookId(id);
    let Some(book) = store.delete_book(&id).await? else {
        return Err(AppError::NotFound("Book"));
    };

    // Cascade: a book takes its reviews with it. No aggregate recompute,
    // since the document the aggregate lives on is gone.
    let removed = store.delete_reviews_for_book(&id).await?;
    for review in &removed {
        bump_review_count(&store, &review.user_id, -1).await?;
    }

    tracing::info!(
        "Book deleted: {} ({} reviews removed)",
        book.title,
        removed.len()
    );

    Ok(Json(DeleteBookResponse {
        message: "Book deleted successfully".to_string(),
    }))
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if !length_between(title, 1, 200) {
        return Err(AppError::Validation(
            "Title is required and must be less than 200 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_author(author: &str) -> Result<(), AppError> {
    if !length_between(author, 1, 100) {
        return Err(AppError::Validation(
            "Author is required and must be less than 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if !length_between(description, 10, 2000) {
        return Err(AppError::Validation(
            "Description must be between 10 and 2000 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_published_year(year: u32) -> Result<(), AppError> {
    if year < 1000 || year > current_year() {
        return Err(AppError::Validation(
            "Published year must be valid".to_string(),
        ));
    }
    Ok(())
}

fn validate_pages(pages: Option<u32>) -> Result<(), AppError> {
    if pages == Some(0) {
        return Err(AppError::Validation(
            "Pages must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

const AVG_MS_PER_YEAR: u64 = 31_556_952_000;

// Mean Gregorian year length is close enough for a published-year upper
// bound; this can only drift by hours around New Year.
fn current_year() -> u32 {
    1970 + (now_ms() / AVG_MS_PER_YEAR) as u32
}
