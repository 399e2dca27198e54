//! Gemini Backend - 调用 Generative Language API
//!
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: {"contents": [{"role": "user", "parts": [{"text": "..."}]}], "generationConfig": {...}}
//!
//! 响应体到文本的转换只在这里做一次（见 `extract_text`）

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{BackendError, BackendOutput, GenerativeBackendPort, PromptContext};

/// 依次尝试的文本位置，第一个非空字符串胜出
const TEXT_POINTERS: &[&str] = &[
    "/candidates/0/content/parts/0/text",
    "/choices/0/message/content",
    "/output_text",
    "/raw",
    "/result",
    "/output",
    "/text",
    "/content",
];

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiBackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for GeminiBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
            temperature: 0.7,
        }
    }
}

/// Gemini 客户端
pub struct GeminiBackend {
    client: Client,
    config: GeminiBackendConfig,
}

impl GeminiBackend {
    pub fn new(config: GeminiBackendConfig) -> Result<Self, BackendError> {
        if config.api_key.trim().is_empty() {
            return Err(BackendError::NotConfigured("API key is not set".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl GenerativeBackendPort for GeminiBackend {
    async fn generate(&self, context: &PromptContext) -> Result<BackendOutput, BackendError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part {
                    text: &context.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };

        tracing::debug!(
            url = %self.generate_url(),
            stage = context.stage.as_str(),
            prompt_len = context.prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.config.timeout_secs)
                } else if e.is_connect() {
                    BackendError::Network(format!("Cannot connect to backend service: {}", e))
                } else {
                    BackendError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.to_string(),
                body: text,
            });
        }

        let output = extract_text(&text)?;
        tracing::debug!(
            stage = context.stage.as_str(),
            model = %self.config.model,
            output_len = output.len(),
            "generateContent succeeded"
        );
        Ok(BackendOutput::new(output, &self.config.model))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// 把响应体转换为文本
///
/// - 多个 part 时按顺序拼接
/// - 被安全策略拦截时返回错误
/// - 都不匹配时返回原始响应体
pub fn extract_text(body: &str) -> Result<String, BackendError> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Ok(body.to_string());
    };

    if let Some(parts) = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
    {
        let joined: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();
        if !joined.is_empty() {
            return Ok(joined);
        }
    }

    if let Some(reason) = value
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(BackendError::InvalidResponse(format!("prompt blocked: {}", reason)));
    }

    let text = TEXT_POINTERS
        .iter()
        .filter_map(|p| value.pointer(p))
        .filter_map(Value::as_str)
        .find(|s| !s.trim().is_empty());

    Ok(text.map(str::to_string).unwrap_or_else(|| body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::is_overload;
    use crate::domain::project::Stage;
    use axum::{http::StatusCode, routing::post, Json, Router};

    #[test]
    fn test_extract_text_accessor_order() {
        let gemini = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(extract_text(gemini).unwrap(), "{\"a\":1}");

        let openai = r#"{"choices":[{"message":{"content":"hello"}}]}"#;
        assert_eq!(extract_text(openai).unwrap(), "hello");

        let raw = r#"{"raw":"","result":"from result"}"#;
        assert_eq!(extract_text(raw).unwrap(), "from result");

        assert_eq!(extract_text("plain text").unwrap(), "plain text");
        assert_eq!(extract_text(r#"{"other":1}"#).unwrap(), r#"{"other":1}"#);
    }

    #[test]
    fn test_blocked_prompt_is_an_error() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = extract_text(body).unwrap_err();
        assert!(!is_overload(&err));
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let err = GeminiBackend::new(GeminiBackendConfig::default()).err().unwrap();
        assert!(matches!(err, BackendError::NotConfigured(_)));
        assert!(!is_overload(&err));
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String) -> GeminiBackend {
        GeminiBackend::new(GeminiBackendConfig {
            base_url,
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_overloaded_status_is_classified() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "The model is overloaded") }),
        );
        let backend = client(serve(app).await);

        let err = backend
            .generate(&PromptContext::new(Stage::Planning, "plan"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("503 Service Unavailable"));
        assert!(is_overload(&err));
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|Json(body): Json<serde_json::Value>| async move {
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                Json(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": format!("echo: {prompt}")}]}}]
                }))
            }),
        );
        let backend = client(serve(app).await);

        let output = backend
            .generate(&PromptContext::new(Stage::Design, "hello"))
            .await
            .unwrap();

        assert_eq!(output.text(), "echo: hello");
        assert_eq!(output.model(), "gemini-2.5-flash");
    }
}
