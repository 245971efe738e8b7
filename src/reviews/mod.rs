//! Review Module
//!
//! Reader reviews: one per (book, reader) pair, with a 1–5 rating, the
//! review text, and the helpful-vote ledger maintained by `ratings::ledger`.
//!
//! ## Lifecycle contract
//! Every write path that creates, re-rates, or deletes a review must invoke
//! the rating aggregator before the request completes: the Book's
//! `average_rating`/`total_reviews` are caches over this collection. The
//! call sites live in `lifecycle`, not behind persistence hooks, so the
//! trigger points are explicit and testable.
//!
//! ## Submodules
//! - **`types`**: the Review document, its ledger entries, and the response
//!   views that attach reviewer/book summaries.
//! - **`lifecycle`**: create/update/delete/vote operations plus the reviewer
//!   counter bookkeeping.
//! - **`handlers`**: HTTP request handlers for the review endpoints.

pub mod handlers;
pub mod lifecycle;
pub mod types;
