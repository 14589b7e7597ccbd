// src/api/parser.rs
//! Turns raw HTTP responses into typed results.
//!
//! Success bodies deserialize into the wire shapes from `responses`; error
//! bodies become `AppError::NotionService` carrying the typed error code.

use super::adapter::{convert_block, convert_data_source, convert_database, convert_page};
use super::client::ApiResponse;
use super::responses::{
    BlockChildrenResponse, DataSourceObject, DatabaseObject, NotionError, PageObject,
    PaginatedResponse, QueryDataSourceResponse,
};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, DataSource, DatabaseContainer, Page};
use serde::de::DeserializeOwned;

/// Parses a response body, or the error envelope for non-2xx statuses.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status.as_u16(), &result.url))
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body starts with: {})", e, preview(body)))
    })
}

fn parse_error_body(body: &str, status: u16, url: &str) -> AppError {
    match serde_json::from_str::<NotionError>(body) {
        Ok(error) => {
            log::debug!(
                "Notion API error from {} (request {}): {}",
                url,
                error.request_id.as_deref().unwrap_or("unknown"),
                error.message
            );
            AppError::NotionService {
                code: NotionErrorCode::from_api_response(&error.code),
                message: error.message,
                status: error.status,
            }
        }
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status),
            message: format!("HTTP {} from {}: {}", status, url, preview(body)),
            status,
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let object: PageObject = parse_api_response(result)?;
    convert_page(object)
}

pub fn parse_database_response(
    result: ApiResponse<String>,
) -> Result<DatabaseContainer, AppError> {
    let object: DatabaseObject = parse_api_response(result)?;
    convert_database(object)
}

pub fn parse_data_source_response(result: ApiResponse<String>) -> Result<DataSource, AppError> {
    let object: DataSourceObject = parse_api_response(result)?;
    convert_data_source(object)
}

/// One page of data-source query results.
pub fn parse_entries_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    let response: QueryDataSourceResponse = parse_api_response(result)?;
    let results = response
        .results
        .into_iter()
        .map(convert_page)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        results,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// One page of block children.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: BlockChildrenResponse = parse_api_response(result)?;

    Ok(PaginatedResponse {
        results: response.results.into_iter().map(convert_block).collect(),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://api.notion.com/v1/pages/x".to_string(),
        }
    }

    #[test]
    fn test_error_envelope_is_typed() {
        let body = r#"{
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: abc123",
            "request_id": "req_123"
        }"#;

        match parse_page_response(response(StatusCode::NOT_FOUND, body)) {
            Err(AppError::NotionService { code, status, .. }) => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(status, 404);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_error_falls_back_to_status() {
        match parse_page_response(response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")) {
            Err(AppError::NotionService { code, .. }) => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502));
                assert!(code.is_retryable());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_success_body() {
        assert!(matches!(
            parse_page_response(response(StatusCode::OK, "not json")),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_blocks_pagination() {
        let body = r#"{
            "object": "list",
            "results": [
                { "object": "block", "id": "550e8400-e29b-41d4-a716-446655440000",
                  "type": "divider", "has_children": false, "divider": {} }
            ],
            "next_cursor": "abc",
            "has_more": true
        }"#;

        let page = parse_blocks_pagination(response(StatusCode::OK, body)).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].kind_name(), "divider");
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert!(page.has_more);
    }
}
