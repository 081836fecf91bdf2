//! Exa.ai API client for topic news search

use chrono::SecondsFormat;
use reqwest::Client;
use tracing::{info, instrument};

use digest_core::{Article, DateWindow};

use crate::error::NewsError;
use crate::types::{
    ExaContentsOptions, ExaResult, ExaSearchRequest, ExaSearchResponse, ExaTextOptions,
};

/// Fixed result cap per topic query
const RESULTS_PER_TOPIC: usize = 5;
/// Region hint passed with every search
const USER_LOCATION: &str = "IN";

/// Exa.ai API client
pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    /// Create a new Exa.ai client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.exa.ai".to_string(),
        }
    }

    /// Search articles for a single topic within a date window
    ///
    /// Issues one keyword search constrained to the window and returns the
    /// results in API order. Missing fields default to placeholders; the
    /// text may contain stray HTML tags from the source fetch.
    #[instrument(skip(self, window))]
    pub async fn search_topic(
        &self,
        topic: &str,
        window: &DateWindow,
    ) -> Result<Vec<Article>, NewsError> {
        let request = ExaSearchRequest {
            query: topic.to_string(),
            search_type: "keyword".to_string(),
            user_location: USER_LOCATION.to_string(),
            num_results: RESULTS_PER_TOPIC,
            start_published_date: window.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end_published_date: window.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            contents: ExaContentsOptions {
                text: ExaTextOptions {
                    include_html_tags: true,
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let exa_response: ExaSearchResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        info!(
            "Received {} results for topic '{}'",
            exa_response.results.len(),
            topic
        );

        Ok(exa_response
            .results
            .into_iter()
            .map(|result| convert_result(result, topic))
            .collect())
    }
}

/// Convert an Exa result to an Article, defaulting missing fields
fn convert_result(result: ExaResult, topic: &str) -> Article {
    Article {
        title: result.title.unwrap_or_else(|| "No Title".to_string()),
        url: result.url.unwrap_or_else(|| "#".to_string()),
        text: result.text.unwrap_or_default(),
        topic: topic.to_string(),
        summary: String::new(),
    }
}
