use async_trait::async_trait;
use recipe_cache_core::RecipeSummary;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::payload::{ComplexSearchResponse, RawRecipeItem, into_summaries};
use crate::provider::RecipeProvider;

const API_KEY_HEADER: &str = "x-api-key";
const MAX_BODY_IN_ERROR: usize = 200;

/// reqwest-backed client for the Spoonacular recipe API.
pub struct SpoonacularClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl std::fmt::Debug for SpoonacularClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl SpoonacularClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(mut config: UpstreamConfig) -> Result<Self, UpstreamError> {
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::ClientInit(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET `path` and return the success body, retrying transient failures
    /// with exponential backoff.
    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<String, UpstreamError> {
        let max_retries = self.config.max_retries;
        let mut last_error: Option<UpstreamError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                let factor = 1u32 << (attempt - 1).min(6);
                let delay = self.config.retry_base_delay.saturating_mul(factor);
                tracing::warn!(path, attempt, max_retries, ?delay, "upstream retry");
                tokio::time::sleep(delay).await;
            }

            let response_result = self
                .client
                .get(format!("{}{path}", self.config.base_url))
                .header(API_KEY_HEADER, &self.config.api_key)
                .query(query)
                .send()
                .await;

            let response = match response_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(UpstreamError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                match response.text().await {
                    Ok(body) => return Ok(body),
                    Err(e) => {
                        last_error = Some(UpstreamError::HttpRequest(e));
                        continue;
                    },
                }
            }

            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let err = UpstreamError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, MAX_BODY_IN_ERROR).to_owned(),
            };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            tracing::warn!(path, status = status.as_u16(), "upstream rejected request");
            return Err(err);
        }

        let last = last_error.unwrap_or_else(|| UpstreamError::ClientInit("no attempt made".to_owned()));
        tracing::warn!(path, error = %last, "upstream retries exhausted");
        Err(UpstreamError::RetriesExhausted(Box::new(last)))
    }
}

fn parse<T: serde::de::DeserializeOwned>(body: &str, context: &str) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|e| UpstreamError::JsonParse {
        context: format!("{context} (body: {})", truncate(body, MAX_BODY_IN_ERROR)),
        source: e,
    })
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn search_by_title(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<RecipeSummary>, UpstreamError> {
        let body = self
            .get_body(
                "/recipes/complexSearch",
                &[("query", query.to_owned()), ("number", count.to_string())],
            )
            .await?;
        let response: ComplexSearchResponse = parse(&body, "complexSearch response")?;
        let summaries = into_summaries(response.results, "complexSearch.results")?;
        tracing::debug!(title = query, results = summaries.len(), "upstream title search");
        Ok(summaries)
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        count: usize,
    ) -> Result<serde_json::Value, UpstreamError> {
        let body = self
            .get_body(
                "/recipes/findByIngredients",
                &[("ingredients", ingredients.join(",")), ("number", count.to_string())],
            )
            .await?;
        parse(&body, "findByIngredients response")
    }

    async fn similar_to(
        &self,
        external_id: i64,
        count: usize,
    ) -> Result<Vec<RecipeSummary>, UpstreamError> {
        let body = self
            .get_body(
                &format!("/recipes/{external_id}/similar"),
                &[("number", count.to_string())],
            )
            .await?;
        let items: Vec<RawRecipeItem> = parse(&body, "similar response")?;
        let summaries = into_summaries(items, "similar")?;
        tracing::debug!(external_id, results = summaries.len(), "upstream similar lookup");
        Ok(summaries)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
