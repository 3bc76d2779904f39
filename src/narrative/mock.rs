use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::NarrativeGenerator;
use super::error::{NarrativeError, NarrativeResult};

/// Canned-response generator for tests.
///
/// Records every prompt it receives.
pub struct MockNarrativeGenerator {
    response: Result<String, String>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockNarrativeGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A generator whose every call fails with [`NarrativeError::Unavailable`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl NarrativeGenerator for MockNarrativeGenerator {
    async fn generate(&self, prompt: &str) -> NarrativeResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        self.response
            .clone()
            .map_err(NarrativeError::Unavailable)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
