use thiserror::Error;

/// Why a turn could not be classified. Every variant is recovered by the
/// session with the fallback reply and no health change.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("completion text has no `[score]:` token: {raw:?}")]
    Parse { raw: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown classifier `{0}` (expected `local` or `remote`)")]
    UnknownClassifier(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::{ClassifyError, ConfigError};

    #[test]
    fn parse_error_includes_raw_text() {
        let error = ClassifyError::Parse {
            raw: "no score here".to_string(),
        };
        assert!(error.to_string().contains("no score here"));
    }

    #[test]
    fn config_error_names_the_key() {
        let error = ConfigError::InvalidValue {
            key: "SPROUT_MAX_TOKENS",
            value: "lots".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid value for SPROUT_MAX_TOKENS: \"lots\""
        );
    }
}
