//! BookWorm Service Library
//!
//! This library crate defines the modules that make up the book catalogue
//! and review service. It serves as the foundation for the binary
//! executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of loosely coupled subsystems:
//!
//! - **`store`**: The document store. Holds Book, Review, and User records in
//!   concurrent in-memory collections and exposes the point lookups and
//!   filtered scans the rest of the system consumes.
//! - **`ratings`**: The rating aggregation pipeline. Recomputes a book's
//!   derived rating statistics from its review set and maintains the
//!   per-review helpful-vote ledger.
//! - **`reviews`**: The review lifecycle. Create/update/delete operations and
//!   helpful voting, each explicitly re-triggering aggregation, plus the HTTP
//!   handlers for the review endpoints.
//! - **`catalog`**: Book management. Admin-gated CRUD, token-based text
//!   search, genre filtering, sorting, and the featured shelf.
//! - **`users`**: Reader profiles. Profile lookup and update, review
//!   listings, and reading statistics.
//! - **`auth`**: The identity seam. Resolves the acting user from request
//!   headers and enforces admin/ownership checks for the handlers.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod pagination;
pub mod ratings;
pub mod reviews;
pub mod seed;
pub mod store;
pub mod users;
