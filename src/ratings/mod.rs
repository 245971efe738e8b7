//! Rating Aggregation Pipeline
//!
//! The derived-state core of the service. A book's `average_rating` and
//! `total_reviews` are never authored directly; they are recomputed from the
//! review collection after every review mutation. Each review additionally
//! carries a helpful-vote ledger whose signed tally is maintained here.
//!
//! ## Invariants
//! - After `recompute_book_rating` returns, the book's aggregate fields
//!   exactly reflect the review set read during the call.
//! - A review's ledger holds at most one entry per voter, and its tally
//!   always equals helpful-true entries minus helpful-false entries.
//!
//! Both operations are read-then-write with no cross-document locking;
//! concurrent recomputes of the same book resolve last-writer-wins, matching
//! the per-document update semantics of the store (see `store`).
//!
//! ## Submodules
//! - **`aggregate`**: book rating recomputation.
//! - **`ledger`**: idempotent helpful-vote application.

pub mod aggregate;
pub mod ledger;

#[cfg(test)]
mod tests;
