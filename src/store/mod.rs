//! Document Store
//!
//! Holds the Book, Review, and User collections behind a small CRUD + scan
//! surface.
//!
//! ## Core Concepts
//! - **Documents**: records are plain serde structs keyed by uuid newtypes;
//!   reads hand out owned clones, never references into the collections.
//! - **Queries**: beyond point lookups, the store only offers the filtered
//!   scans its callers actually need (reviews by book, reviews by user, the
//!   (book, user) pair probe, uniqueness probes for isbn/username/email).
//! - **Fallibility**: every operation returns `Result<_, StoreError>`. The
//!   bundled in-memory backend cannot fail, but callers are written against
//!   the fallible contract a remote document database would have.
//!
//! Aggregate fields on Book (`average_rating`, `total_reviews`) are owned by
//! the `ratings` module; the store treats them as ordinary document data.

pub mod memory;


pub use memory::Store;

use thiserror::Error;

/// Failure surface of the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

/// Current system time in milliseconds, used for document timestamps.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
