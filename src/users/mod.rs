//! User Module
//!
//! Reader profiles: lookup with recent activity, self-service profile
//! updates with username/email uniqueness, and reading statistics. The
//! `total_reviews` counter on a profile is maintained by the review
//! lifecycle, not here.
//!
//! ## Submodules
//! - **`types`**: the User document and the statistics DTOs.
//! - **`handlers`**: HTTP request handlers for the user endpoints.

pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
