/*!
 * Pattern recognition service boundary.
 *
 * The conversion core can hand an ordered list of recorded element
 * interactions to an external service and get back a ranked list of named
 * behavioral patterns. The service is strictly optional: every failure mode
 * collapses to an empty result, and conversion proceeds unchanged.
 *
 * - `http`: HTTP client implementation
 * - `mock`: mock recognizers for testing
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ServiceError;

/// One element interaction observed while translating a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAction {
    /// Interaction kind: click, fill, wait, navigate, ...
    pub action: String,

    /// Element accessor the interaction targeted, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Value carried by the interaction, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RecordedAction {
    /// Create a recorded action
    pub fn new(action: &str, target: Option<String>, value: Option<String>) -> Self {
        RecordedAction {
            action: action.to_string(),
            target,
            value,
        }
    }
}

/// One named behavioral pattern returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedPattern {
    /// Short pattern name, e.g. "login-flow"
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Ranking confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,
}

/// Common trait for pattern recognition backends
///
/// This trait defines the interface that all recognizer implementations must
/// follow, allowing them to be used interchangeably by the pipeline driver.
#[async_trait]
pub trait PatternRecognizer: Send + Sync + Debug {
    /// Recognize behavioral patterns in an ordered action sequence
    ///
    /// # Arguments
    /// * `actions` - The recorded actions, in observation order
    ///
    /// # Returns
    /// * `Result<Vec<RecognizedPattern>, ServiceError>` - Ranked patterns, best first
    async fn recognize(
        &self,
        actions: &[RecordedAction],
    ) -> Result<Vec<RecognizedPattern>, ServiceError>;

    /// Test the connection to the backend
    ///
    /// # Returns
    /// * `Result<(), ServiceError>` - Ok if the backend is reachable
    async fn test_connection(&self) -> Result<(), ServiceError>;
}

/// Call a recognizer, collapsing every failure to an empty result.
///
/// The conversion core must not fail because this collaborator threw or
/// returned nothing, so errors are logged at debug and swallowed here.
pub async fn recognize_or_empty(
    recognizer: &dyn PatternRecognizer,
    actions: &[RecordedAction],
) -> Vec<RecognizedPattern> {
    if actions.is_empty() {
        return Vec::new();
    }
    match recognizer.recognize(actions).await {
        Ok(patterns) => patterns,
        Err(e) => {
            debug!("Pattern recognition unavailable: {}", e);
            Vec::new()
        }
    }
}

pub mod http;
pub mod mock;
