use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ServiceError;
use crate::recognition::{PatternRecognizer, RecognizedPattern, RecordedAction};

/// HTTP client for a remote pattern recognition endpoint
#[derive(Debug)]
pub struct HttpRecognizer {
    /// Base URL of the recognition API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Recognition request body
#[derive(Debug, Serialize, Deserialize)]
struct RecognitionRequest {
    /// Recorded actions, in observation order
    actions: Vec<RecordedAction>,
}

/// Recognition response body
#[derive(Debug, Serialize, Deserialize)]
struct RecognitionResponse {
    /// Ranked patterns, best first
    #[serde(default)]
    patterns: Vec<RecognizedPattern>,
}

impl HttpRecognizer {
    /// Create a client for the given endpoint
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ServiceError::ConnectionError(e.to_string()))?;

        Ok(HttpRecognizer {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    // @returns: Full URL for an API route
    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }
}

#[async_trait]
impl PatternRecognizer for HttpRecognizer {
    async fn recognize(
        &self,
        actions: &[RecordedAction],
    ) -> Result<Vec<RecognizedPattern>, ServiceError> {
        let request = RecognitionRequest {
            actions: actions.to_vec(),
        };

        let response = self
            .client
            .post(self.endpoint("recognize"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;

        Ok(body.patterns)
    }

    async fn test_connection(&self) -> Result<(), ServiceError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| ServiceError::ConnectionError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::ApiError {
                status_code: response.status().as_u16(),
                message: "health check failed".to_string(),
            })
        }
    }
}
