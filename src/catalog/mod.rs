//! Book Catalogue Module
//!
//! Book management for the service: the admin-gated CRUD surface, the public
//! browse/search endpoints, and the featured shelf.
//!
//! ## Responsibilities
//! - **Records**: the Book document, its ten-genre classification, and the
//!   derived rating fields (written only by the `ratings` module).
//! - **Querying**: token-based text search over title/author/description,
//!   genre filtering, sorting, and pagination.
//! - **Lifecycle**: deleting a book cascades to its reviews; the book's
//!   aggregate is not recomputed afterwards since the document is gone.
//!
//! ## Submodules
//! - **`types`**: the Book document and its id/genre types.
//! - **`query`**: the pure filter/sort pipeline behind the list endpoint.
//! - **`search`**: text tokenization and match predicates.
//! - **`handlers`**: HTTP request handlers for the book endpoints.

pub mod handlers;
pub mod query;
pub mod search;
pub mod types;
