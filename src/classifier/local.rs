use super::{Classification, Classifier};
use crate::error::ClassifyError;
use async_trait::async_trait;

const NEGATIVE_WORDS: [&str; 7] = [
    "hate", "terrible", "awful", "bad", "never", "worst", "hopeless",
];

const CBT_WORDS: [&str; 10] = [
    "realize",
    "perspective",
    "evidence",
    "thinking",
    "rational",
    "reframe",
    "alternative",
    "practice",
    "learn",
    "growth",
];

const NEGATIVE_DELTA: f64 = -15.0;
const BASE_GROWTH: f64 = 15.0;

pub const ENCOURAGING_REPLY: &str = "That's a great perspective! Keep it up.";
pub const REDIRECTING_REPLY: &str = "Let's try to find a more positive angle.";

/// Keyword heuristic. Matching is by substring, so "badly" counts as "bad".
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn delta(text: &str, current_health: f64) -> f64 {
        let lowered = text.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|word| lowered.contains(word));

        if has_any(&NEGATIVE_WORDS) {
            return NEGATIVE_DELTA;
        }
        if has_any(&CBT_WORDS) {
            let remaining = (100.0 - current_health).max(0.0);
            return BASE_GROWTH * (remaining / 100.0);
        }
        0.0
    }

    pub fn evaluate(text: &str, current_health: f64) -> Classification {
        let delta = Self::delta(text, current_health);
        let reply = if delta > 0.0 {
            ENCOURAGING_REPLY
        } else {
            REDIRECTING_REPLY
        };
        Classification {
            delta,
            reply: reply.to_string(),
            score: None,
        }
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn classify(
        &self,
        text: &str,
        current_health: f64,
    ) -> Result<Classification, ClassifyError> {
        Ok(Self::evaluate(text, current_health))
    }
}
