use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::lifecycle::{self, NewReview, ReviewPatch};
use super::types::{BookSummary, Review, ReviewId, ReviewView, UserSummary};
use crate::auth;
use crate::catalog::query::Order;
use crate::catalog::types::BookId;
use crate::error::AppError;
use crate::pagination::{paginate, resolve_page, Pagination};
use crate::store::{Store, StoreError};
use crate::users::types::UserId;

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 20;

/// Sort keys accepted by the review list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReviewSort {
    Helpful,
    Rating,
    #[default]
    CreatedAt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsParams {
    pub book_id: BookId,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<ReviewSort>,
    pub order: Option<Order>,
}

#[derive(Debug, Deserialize)]
pub struct PageOnlyParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewView>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct BookReviewsResponse {
    pub reviews: Vec<ReviewView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub book_id: BookId,
    pub rating: u8,
    pub review: String,
    pub spoiler: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub spoiler: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpfulVoteRequest {
    pub is_helpful: bool,
}

#[derive(Debug, Serialize)]
pub struct ReviewMutationResponse {
    pub message: String,
    pub review: ReviewView,
}

#[derive(Debug, Serialize)]
pub struct DeleteReviewResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HelpfulVoteResponse {
    pub message: String,
    pub helpful: i64,
}

pub async fn handle_list_reviews(
    Extension(store): Extension<Arc<Store>>,
    Query(params): Query<ListReviewsParams>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let (page, limit) = resolve_page(params.page, params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)?;

    let mut reviews = store.reviews_for_book(&params.book_id).await?;
    sort_reviews(
        &mut reviews,
        params.sort.unwrap_or_default(),
        params.order.unwrap_or_default(),
    );

    let (reviews, pagination) = paginate(reviews, page, limit);
    let reviews = with_details(&store, reviews, false).await?;

    Ok(Json(ReviewListResponse { reviews, pagination }))
}

pub async fn handle_create_review(
    Extension(store): Extension<Arc<Store>>,
    headers: HeaderMap,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewMutationResponse>), AppError> {
    let author = auth::require_user(&store, &headers).await?;

    validate_rating(req.rating)?;
    validate_review_text(&req.review)?;

    let review = lifecycle::create_review(
        &store,
        &author,
        NewReview {
            book_id: req.book_id,
            rating: req.rating,
            review: req.review,
            spoiler: req.spoiler.unwrap_or(false),
        },
    )
    .await?;

    let review = ReviewView {
        review,
        user: Some(UserSummary::from(&author)),
        book: None,
    };

    Ok((
        StatusCode::CREATED,
        Json(ReviewMutationResponse {
            message: "Review submitted successfully".to_string(),
            review,
        }),
    ))
}

pub async fn handle_update_review(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewMutationResponse>, AppError> {
    let actor = auth::require_user(&store, &headers).await?;

    if let Some(rating) = req.rating {
        validate_rating(rating)?;
    }
    if let Some(text) = req.review.as_deref() {
        validate_review_text(text)?;
    }

    let review = lifecycle::update_review(
        &store,
        &actor,
        &ReviewId(id),
        ReviewPatch {
            rating: req.rating,
            review: req.review,
            spoiler: req.spoiler,
        },
    )
    .await?;

    let review = ReviewView {
        review,
        user: Some(UserSummary::from(&actor)),
        book: None,
    };

    Ok(Json(ReviewMutationResponse {
        message: "Review updated successfully".to_string(),
        review,
    }))
}

pub async fn handle_delete_review(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteReviewResponse>, AppError> {
    let actor = auth::require_user(&store, &headers).await?;

    lifecycle::delete_review(&store, &actor, &ReviewId(id)).await?;

    Ok(Json(DeleteReviewResponse {
        message: "Review deleted successfully".to_string(),
    }))
}

pub async fn handle_vote_helpful(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<HelpfulVoteRequest>,
) -> Result<Json<HelpfulVoteResponse>, AppError> {
    let voter = auth::require_user(&store, &headers).await?;

    let helpful = lifecycle::vote_helpful(&store, &voter, &ReviewId(id), req.is_helpful).await?;

    Ok(Json(HelpfulVoteResponse {
        message: "Vote recorded successfully".to_string(),
        helpful,
    }))
}

/// A reader's review history, newest first, with book summaries attached.
/// Serves both `/api/reviews/user/:id` and `/api/users/:id/reviews`.
pub async fn handle_reviews_by_user(
    Extension(store): Extension<Arc<Store>>,
    Path(user_id): Path<String>,
    Query(params): Query<PageOnlyParams>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let (page, limit) = resolve_page(params.page, params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)?;

    let mut reviews = store.reviews_by_user(&UserId(user_id)).await?;
    sort_reviews(&mut reviews, ReviewSort::CreatedAt, Order::Desc);

    let (reviews, pagination) = paginate(reviews, page, limit);
    let reviews = with_details(&store, reviews, true).await?;

    Ok(Json(ReviewListResponse { reviews, pagination }))
}

/// Every review of one book, newest first, without pagination.
pub async fn handle_reviews_by_book(
    Extension(store): Extension<Arc<Store>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookReviewsResponse>, AppError> {
    let mut reviews = store.reviews_for_book(&BookId(book_id)).await?;
    sort_reviews(&mut reviews, ReviewSort::CreatedAt, Order::Desc);

    let reviews = with_details(&store, reviews, false).await?;
    Ok(Json(BookReviewsResponse { reviews }))
}

pub(crate) fn sort_reviews(reviews: &mut [Review], sort: ReviewSort, order: Order) {
    reviews.sort_by(|a, b| {
        let ord = match sort {
            ReviewSort::Helpful => a.helpful.cmp(&b.helpful),
            ReviewSort::Rating => a.rating.cmp(&b.rating),
            ReviewSort::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        order.apply(ord)
    });
}

/// Attaches reviewer summaries (and book summaries for history listings) the
/// way the API has always inlined them. Reviews whose reader or book has
/// since vanished keep a bare entry rather than disappearing.
pub(crate) async fn with_details(
    store: &Store,
    reviews: Vec<Review>,
    include_book: bool,
) -> Result<Vec<ReviewView>, StoreError> {
    let mut views = Vec::with_capacity(reviews.len());

    for review in reviews {
        let user = store
            .get_user(&review.user_id)
            .await?
            .map(|user| UserSummary::from(&user));

        let book = if include_book {
            store
                .get_book(&review.book_id)
                .await?
                .map(|book| BookSummary::from(&book))
        } else {
            None
        };

        views.push(ReviewView { review, user, book });
    }

    Ok(views)
}

fn validate_rating(rating: u8) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

fn validate_review_text(text: &str) -> Result<(), AppError> {
    let len = text.chars().count();
    if !(10..=2000).contains(&len) {
        return Err(AppError::Validation(
            "Review must be between 10 and 2000 characters".to_string(),
        ));
    }
    Ok(())
}
