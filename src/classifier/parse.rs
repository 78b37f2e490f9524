use crate::error::ClassifyError;
use once_cell::sync::Lazy;
use regex::Regex;

static SCORE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([+-]?(?:\d+(?:\.\d*)?|\.\d+))\]:").expect("score pattern is valid")
});

static RESPONSE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[RESPONSE\]:").expect("response label pattern is valid"));

pub const MIN_SCORE: f64 = -10.0;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredReply {
    pub score: f64,
    pub reply: String,
}

/// Splits `[<score>]: [RESPONSE]: text` into the score and the cleaned reply.
///
/// Only the first score token is taken and removed. Scores outside
/// `[-10, 10]` are clamped. The reply may be empty.
pub fn parse_scored_reply(raw: &str) -> Result<ScoredReply, ClassifyError> {
    let parse_error = || ClassifyError::Parse {
        raw: raw.to_string(),
    };

    let captures = SCORE_TOKEN.captures(raw).ok_or_else(parse_error)?;
    let score: f64 = captures[1].parse().map_err(|_| parse_error())?;

    let without_score = SCORE_TOKEN.replace(raw, "");
    let reply = RESPONSE_LABEL.replace_all(&without_score, "").trim().to_string();

    Ok(ScoredReply {
        score: score.clamp(MIN_SCORE, MAX_SCORE),
        reply,
    })
}
