//! API-specific types for Exa.ai

use serde::{Deserialize, Serialize};

/// Exa.ai search request
#[derive(Debug, Serialize)]
pub struct ExaSearchRequest {
    /// Search query (the topic)
    pub query: String,
    /// Search type: "keyword" for literal topic matching
    #[serde(rename = "type")]
    pub search_type: String,
    /// Region hint for result ranking
    #[serde(rename = "userLocation")]
    pub user_location: String,
    /// Number of results to return
    #[serde(rename = "numResults")]
    pub num_results: usize,
    /// Start date filter (ISO 8601)
    #[serde(rename = "startPublishedDate")]
    pub start_published_date: String,
    /// End date filter (ISO 8601)
    #[serde(rename = "endPublishedDate")]
    pub end_published_date: String,
    /// Content options
    pub contents: ExaContentsOptions,
}

/// Options for content extraction
#[derive(Debug, Serialize)]
pub struct ExaContentsOptions {
    /// Text extraction options
    pub text: ExaTextOptions,
}

/// Text extraction options
#[derive(Debug, Serialize)]
pub struct ExaTextOptions {
    /// Include HTML tags in the extracted text
    #[serde(rename = "includeHtmlTags")]
    pub include_html_tags: bool,
}

/// Exa.ai search response
#[derive(Debug, Deserialize)]
pub struct ExaSearchResponse {
    /// Search results
    pub results: Vec<ExaResult>,
    /// Request ID for debugging
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
}

/// A single Exa.ai search result
#[derive(Debug, Deserialize)]
pub struct ExaResult {
    /// Page URL
    pub url: Option<String>,
    /// Page title
    pub title: Option<String>,
    /// Publication date (ISO 8601)
    #[serde(rename = "publishedDate")]
    pub published_date: Option<String>,
    /// Extracted text content
    pub text: Option<String>,
}
