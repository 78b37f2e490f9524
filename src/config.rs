use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierMode {
    #[default]
    Local,
    Remote,
}

impl FromStr for ClassifierMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" | "keyword" | "keywords" => Ok(Self::Local),
            "remote" | "completion" | "llm" => Ok(Self::Remote),
            other => Err(ConfigError::UnknownClassifier(other.to_string())),
        }
    }
}

/// Settings for the chat-completion endpoint used by the remote classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 300,
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub classifier: ClassifierMode,
    pub completion: CompletionConfig,
    /// Advance the onboarding script as the user completes each exercise.
    pub guided_onboarding: bool,
}

impl AppConfig {
    /// Reads `SPROUT_*` variables, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CompletionConfig::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let classifier = match get("SPROUT_CLASSIFIER") {
            Some(raw) => raw.parse()?,
            None => ClassifierMode::default(),
        };

        let completion = CompletionConfig {
            base_url: get("SPROUT_COMPLETION_URL").unwrap_or(defaults.base_url),
            api_key: get("SPROUT_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            model: get("SPROUT_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(
                "SPROUT_TEMPERATURE",
                get("SPROUT_TEMPERATURE"),
                defaults.temperature,
            )?,
            max_tokens: parse_or(
                "SPROUT_MAX_TOKENS",
                get("SPROUT_MAX_TOKENS"),
                defaults.max_tokens,
            )?,
            timeout_ms: parse_or(
                "SPROUT_TIMEOUT_MS",
                get("SPROUT_TIMEOUT_MS"),
                defaults.timeout_ms,
            )?,
        };

        let guided_onboarding = match get("SPROUT_GUIDED_ONBOARDING") {
            Some(raw) => parse_flag("SPROUT_GUIDED_ONBOARDING", &raw)?,
            None => false,
        };

        Ok(Self {
            classifier,
            completion,
            guided_onboarding,
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}
