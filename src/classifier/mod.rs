//! Turns a user message into a health delta and a therapist reply.
//!
//! Two strategies implement [`Classifier`]: [`KeywordClassifier`] scores text
//! against fixed word lists, [`CompletionClassifier`] asks a chat-completion
//! endpoint for a `[score]: reply` answer.

use crate::config::{AppConfig, ClassifierMode};
use crate::error::ClassifyError;
use async_trait::async_trait;
use std::sync::Arc;

pub mod local;
pub mod parse;
pub mod remote;

pub use local::KeywordClassifier;
pub use remote::CompletionClassifier;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub delta: f64,
    pub reply: String,
    /// Raw score reported by the remote strategy, if any.
    pub score: Option<f64>,
}

#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn classify(
        &self,
        text: &str,
        current_health: f64,
    ) -> Result<Classification, ClassifyError>;
}

pub fn from_config(config: &AppConfig) -> Result<Arc<dyn Classifier>, ClassifyError> {
    match config.classifier {
        ClassifierMode::Local => Ok(Arc::new(KeywordClassifier)),
        ClassifierMode::Remote => Ok(Arc::new(CompletionClassifier::new(
            config.completion.clone(),
        )?)),
    }
}
