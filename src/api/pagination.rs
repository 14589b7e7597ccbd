// src/api/pagination.rs
//! Cursor-driven pagination, drained to completion.

use super::responses::PaginatedResponse;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use std::future::Future;

/// Calls `fetch_page(page_size, cursor)` until the API reports no further
/// results, concatenating every page in order.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(usize, Option<String>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_page(NOTION_API_PAGE_SIZE, cursor).await?;
        pages_fetched += 1;
        items.extend(response.results);

        match response.next_cursor {
            Some(next) if response.has_more => cursor = Some(next),
            _ => break,
        }
    }

    log::debug!("Drained {} item(s) over {} page(s)", items.len(), pages_fetched);
    Ok(items)
}
