//! Query-parameter types for the REST API.
//!
//! Entity bodies are the domain structs themselves (the API is a thin CRUD
//! surface); only query parameters get dedicated types.

use serde::{Deserialize, Serialize};

use crate::db::page::{PageRequest, DEFAULT_PAGE_SIZE};

/// Standard pagination query parameters (`?page=&size=`), 0-based page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Query parameters for the `/_search/*` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl SearchQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Query parameters for the schedule-operations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OperationsQuery {
    /// Free-text filter over vehicle number and notes.
    pub search: String,
    /// Display language for translated fields (default: english).
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl OperationsQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let request: PageRequest = PageQuery::default().into();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_query_deserializes_from_url_params() {
        let query: PageQuery = serde_json::from_str(r#"{"page": 2, "size": 5}"#).unwrap();
        let request: PageRequest = query.into();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 5);
    }
}
