// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! Handles authentication headers, retries of transient failures and
//! cursor pagination. Every failure leaving this module is attributed to
//! the reference being fetched (see [`AppError::tagged`]).

use super::pagination::fetch_all_pages;
use super::parser;
use super::NotionRepository;
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{Block, DataSource, DatabaseContainer, Page};
use crate::types::{ApiKey, DataSourceId, NotionId};
use reqwest::{header, Client, Response};
use serde_json::json;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, retry: RetryPolicy) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, retry })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", NOTION_API_BASE_URL, endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    async fn post(&self, endpoint: &str, body: &serde_json::Value) -> Result<Response, AppError> {
        let url = format!("{}/{}", NOTION_API_BASE_URL, endpoint);
        log::debug!("POST {} {}", url, body);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// GETs an endpoint and parses the body, retrying transient failures.
    async fn get_parsed<T, P>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        parse: P,
    ) -> Result<T, AppError>
    where
        P: Fn(ApiResponse<String>) -> Result<T, AppError>,
    {
        let parse = &parse;
        retry_with_backoff(
            || async move {
                let response = self.get(endpoint, query).await?;
                parse(extract_response_text(response).await?)
            },
            self.retry,
        )
        .await
    }

    /// POSTs to an endpoint and parses the body, retrying transient failures.
    async fn post_parsed<T, P>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
        parse: P,
    ) -> Result<T, AppError>
    where
        P: Fn(ApiResponse<String>) -> Result<T, AppError>,
    {
        let parse = &parse;
        retry_with_backoff(
            || async move {
                let response = self.post(endpoint, body).await?;
                parse(extract_response_text(response).await?)
            },
            self.retry,
        )
        .await
    }
}

#[async_trait::async_trait]
impl NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        let endpoint = format!("pages/{}", id.as_str());
        self.get_parsed(&endpoint, &[], parser::parse_page_response)
            .await
            .map_err(|e| e.tagged(id))
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseContainer, AppError> {
        let endpoint = format!("databases/{}", id.as_str());
        self.get_parsed(&endpoint, &[], parser::parse_database_response)
            .await
            .map_err(|e| e.tagged(id))
    }

    async fn retrieve_data_source(&self, id: &DataSourceId) -> Result<DataSource, AppError> {
        let endpoint = format!("data_sources/{}", id.as_str());
        self.get_parsed(&endpoint, &[], parser::parse_data_source_response)
            .await
            .map_err(|e| e.tagged(id.reference()))
    }

    async fn query_data_source(&self, id: &DataSourceId) -> Result<Vec<Page>, AppError> {
        let endpoint = format!("data_sources/{}/query", id.as_str());
        let entries = fetch_all_pages(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut body = json!({ "page_size": page_size });
                if let Some(cursor) = cursor {
                    body["start_cursor"] = json!(cursor);
                }
                self.post_parsed(&endpoint, &body, parser::parse_entries_pagination)
                    .await
            }
        })
        .await
        .map_err(|e| e.tagged(id.reference()))?;

        log::debug!("Data source {} returned {} entries", id, entries.len());
        Ok(entries)
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.as_str());
        fetch_all_pages(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut query = vec![("page_size", page_size.to_string())];
                if let Some(cursor) = cursor {
                    query.push(("start_cursor", cursor));
                }
                self.get_parsed(&endpoint, &query, parser::parse_blocks_pagination)
                    .await
            }
        })
        .await
        .map_err(|e| e.tagged(parent))
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
