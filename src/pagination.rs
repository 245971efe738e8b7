//! Pagination Helpers
//!
//! Every list endpoint accepts `page`/`limit` query parameters and returns a
//! pagination envelope next to its items. The arithmetic lives here so the
//! handlers agree on it.

use serde::Serialize;

use crate::error::AppError;

/// Pagination envelope included in list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Validates raw `page`/`limit` parameters against an endpoint's defaults.
pub fn resolve_page(
    page: Option<usize>,
    limit: Option<usize>,
    default_limit: usize,
    max_limit: usize,
) -> Result<(usize, usize), AppError> {
    let page = page.unwrap_or(1);
    if page < 1 {
        return Err(AppError::Validation(
            "Page must be a positive integer".to_string(),
        ));
    }

    let limit = limit.unwrap_or(default_limit);
    if limit < 1 || limit > max_limit {
        return Err(AppError::Validation(format!(
            "Limit must be between 1 and {}",
            max_limit
        )));
    }

    Ok((page, limit))
}

/// Slices one page out of a fully filtered and sorted result set.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let total = items.len();
    let total_pages = (total + limit - 1) / limit;

    let pagination = Pagination {
        current_page: page,
        total_pages,
        total,
        has_next: page * limit < total,
        has_prev: page > 1,
    };

    let page_items = items
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    (page_items, pagination)
}
