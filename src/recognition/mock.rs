/*!
 * Mock recognizer implementations for testing.
 *
 * This module provides mock recognizers that simulate different behaviors:
 * - `MockRecognizer::working()` - Always returns one ranked pattern
 * - `MockRecognizer::empty()` - Succeeds with no patterns
 * - `MockRecognizer::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ServiceError;
use crate::recognition::{PatternRecognizer, RecognizedPattern, RecordedAction};

/// Behavior mode for the mock recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always returns a single pattern derived from the action sequence
    Working,
    /// Succeeds but returns no patterns
    Empty,
    /// Always fails with an error
    Failing,
}

/// Mock recognizer for testing pipeline behavior
#[derive(Debug)]
pub struct MockRecognizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of recognize calls received
    call_count: Arc<AtomicUsize>,
}

impl MockRecognizer {
    /// Create a mock recognizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        MockRecognizer {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always returns one pattern
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that succeeds with an empty result
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of recognize calls this mock has received
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatternRecognizer for MockRecognizer {
    async fn recognize(
        &self,
        actions: &[RecordedAction],
    ) -> Result<Vec<RecognizedPattern>, ServiceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(vec![RecognizedPattern {
                name: "recorded-flow".to_string(),
                description: format!("{} recorded interactions", actions.len()),
                confidence: 0.9,
            }]),
            MockBehavior::Empty => Ok(Vec::new()),
            MockBehavior::Failing => Err(ServiceError::RequestFailed(
                "mock recognizer configured to fail".to_string(),
            )),
        }
    }

    async fn test_connection(&self) -> Result<(), ServiceError> {
        match self.behavior {
            MockBehavior::Failing => Err(ServiceError::ConnectionError(
                "mock recognizer configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
