use super::parse::parse_scored_reply;
use super::{Classification, Classifier};
use crate::config::CompletionConfig;
use crate::error::ClassifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Health change applied for a remote turn. Only the sign of the model's score
/// is used.
pub const REMOTE_DELTA: f64 = 10.0;

const SYSTEM_INSTRUCTION: &str = "You are a supportive CBT (Cognitive Behavioral Therapy) companion.

For every user message:
1. Rate how healthy the thinking pattern in the message is on a scale from -10 to 10.
   -10 is a strongly distorted, hopeless or catastrophizing thought.
   0 is neutral.
   10 is a balanced, rational, reframed thought.
2. Write a short, warm therapeutic reply (two to four sentences) that helps the user notice and reframe their thinking.

Always answer in exactly this layout, with nothing before it:
[<score>]: [RESPONSE]: <your reply>

Example:
[-6]: [RESPONSE]: That sounds really heavy. What evidence do you have for and against that thought?";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Classifies through an OpenAI-style `/chat/completions` endpoint.
pub struct CompletionClassifier {
    http_client: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionClassifier {
    pub fn new(config: CompletionConfig) -> Result<Self, ClassifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn complete(&self, text: &str) -> Result<String, ClassifyError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut builder = self.http_client.post(self.endpoint()).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|err| ClassifyError::MalformedResponse(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ClassifyError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}

/// Maps a remote score to a fixed-magnitude delta.
pub fn delta_for_score(score: f64) -> f64 {
    if score > 0.0 {
        REMOTE_DELTA
    } else {
        -REMOTE_DELTA
    }
}

#[async_trait]
impl Classifier for CompletionClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn classify(
        &self,
        text: &str,
        _current_health: f64,
    ) -> Result<Classification, ClassifyError> {
        let raw = self.complete(text).await?;
        debug!(raw = %raw, "completion received");
        let scored = parse_scored_reply(&raw)?;
        Ok(Classification {
            delta: delta_for_score(scored.score),
            reply: scored.reply,
            score: Some(scored.score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{delta_for_score, CompletionClassifier};
    use crate::classifier::Classifier;
    use crate::config::CompletionConfig;
    use crate::error::ClassifyError;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        body: Arc<Mutex<Option<Value>>>,
        authorization: Arc<Mutex<Option<String>>>,
    }

    async fn record_request(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *captured.body.lock().expect("lock") = Some(body);
        *captured.authorization.lock().expect("lock") = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Json(completion("[7]: [RESPONSE]: Great reframe!"))
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock listener should bind");
        let addr = listener.local_addr().expect("mock listener has an address");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock server should run");
        });
        format!("http://{addr}/v1")
    }

    fn classifier_for(base_url: String, api_key: Option<&str>) -> CompletionClassifier {
        CompletionClassifier::new(CompletionConfig {
            base_url,
            api_key: api_key.map(str::to_string),
            timeout_ms: 5_000,
            ..CompletionConfig::default()
        })
        .expect("client should build")
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-test",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[test]
    fn only_the_score_sign_matters() {
        assert_eq!(delta_for_score(7.0), 10.0);
        assert_eq!(delta_for_score(0.5), 10.0);
        assert_eq!(delta_for_score(0.0), -10.0);
        assert_eq!(delta_for_score(-10.0), -10.0);
    }

    #[tokio::test]
    async fn sends_chat_request_and_parses_reply() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/v1/chat/completions", post(record_request))
            .with_state(captured.clone());
        let base_url = serve(router).await;

        let classification = classifier_for(base_url, Some("sk-test"))
            .classify("I realize it wasn't all my fault", 50.0)
            .await
            .expect("classification should succeed");

        assert_eq!(classification.delta, 10.0);
        assert_eq!(classification.score, Some(7.0));
        assert_eq!(classification.reply, "Great reframe!");

        let body = captured.body.lock().expect("lock").clone().expect("request captured");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 300);
        assert!(body["temperature"].is_number());
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(body["messages"][0]["content"]
            .as_str()
            .expect("system content")
            .contains("[RESPONSE]:"));
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "I realize it wasn't all my fault");
        assert_eq!(
            captured.authorization.lock().expect("lock").as_deref(),
            Some("Bearer sk-test")
        );
    }

    #[tokio::test]
    async fn non_positive_score_shrinks_the_plant() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(completion("[-2]: That sounds hard.")) }),
        );
        let classification = classifier_for(serve(router).await, None)
            .classify("everything is my fault", 50.0)
            .await
            .expect("classification should succeed");
        assert_eq!(classification.delta, -10.0);
        assert_eq!(classification.reply, "That sounds hard.");
    }

    #[tokio::test]
    async fn server_error_is_reported_as_status() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        );
        let error = classifier_for(serve(router).await, None)
            .classify("hello", 50.0)
            .await
            .expect_err("500 should fail");
        match error {
            ClassifyError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_reported() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { "not json at all" }),
        );
        let error = classifier_for(serve(router).await, None)
            .classify("hello", 50.0)
            .await
            .expect_err("garbage body should fail");
        assert!(matches!(error, ClassifyError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_choices_are_reported() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let error = classifier_for(serve(router).await, None)
            .classify("hello", 50.0)
            .await
            .expect_err("no choices should fail");
        assert!(matches!(error, ClassifyError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn unscored_completion_is_a_parse_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(completion("I'm not following the format today.")) }),
        );
        let error = classifier_for(serve(router).await, None)
            .classify("hello", 50.0)
            .await
            .expect_err("missing score should fail");
        assert!(matches!(error, ClassifyError::Parse { .. }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind scratch port");
        let addr = listener.local_addr().expect("scratch address");
        drop(listener);

        let error = classifier_for(format!("http://{addr}/v1"), None)
            .classify("hello", 50.0)
            .await
            .expect_err("closed port should fail");
        assert!(matches!(error, ClassifyError::Transport(_)));
    }
}
