use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::rest::error::{RestError, RestResult};

/// Client for the PostgREST-style CPIC data API.
pub struct CpicApiClient {
    base_url: String,
    client: Client,
}

impl CpicApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request builder for a view or table path such as `/pair_view`.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(&url)
    }

    /// GET a path with PostgREST query parameters (`select`, `order`, `col=eq.x`).
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> RestResult<T> {
        debug!("GET {}{} {:?}", self.base_url, path, query);
        let response = self.get(path).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Deserialize a success body, or turn the status and text into `ApiError`.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> RestResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| RestError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(RestError::ApiError {
                status,
                message: error_text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_crypto() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        init_crypto();
        let client = CpicApiClient::new("https://api.cpicpgx.org/v1/");
        assert_eq!(client.base_url(), "https://api.cpicpgx.org/v1");
    }

    #[tokio::test]
    async fn test_fetch_connection_error() {
        init_crypto();
        let client = CpicApiClient::new("http://localhost:9999");

        let result: RestResult<serde_json::Value> = client.fetch("/pair_view", &[]).await;

        assert!(
            matches!(result, Err(RestError::ConnectionFailed { .. })),
            "Expected ConnectionFailed, got: {:?}",
            result
        );
    }
}
