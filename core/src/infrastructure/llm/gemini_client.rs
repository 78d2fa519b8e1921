use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    capture::entities::EncodedImage,
    common::{LLMConfig, entities::app_errors::CoreError},
    meal_analysis::ports::LLMClient,
};

#[derive(Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

impl fmt::Debug for GeminiLLMClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiLLMClient")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    /// Fails with [`CoreError::MissingApiKey`] when no key is configured.
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CoreError::MissingApiKey)?
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: image.data,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            }),
        };

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path, query_param},
    };

    use super::*;

    fn config(base_url: &str) -> LLMConfig {
        LLMConfig {
            gemini_api_key: Some("test-key".to_string()),
            gemini_model: "gemini-test".to_string(),
            gemini_base_url: base_url.to_string(),
            ..LLMConfig::default()
        }
    }

    fn image() -> EncodedImage {
        EncodedImage::from_bytes("image/png", b"plate")
    }

    #[test]
    fn test_requires_api_key() {
        let missing = LLMConfig::default();
        assert_eq!(
            GeminiLLMClient::new(&missing).unwrap_err(),
            CoreError::MissingApiKey
        );

        let blank = LLMConfig::new("   ");
        assert_eq!(
            GeminiLLMClient::new(&blank).unwrap_err(),
            CoreError::MissingApiKey
        );
    }

    #[tokio::test]
    async fn test_sends_inline_image_and_returns_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-test:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{
                    "parts": [
                        { "inline_data": { "mime_type": "image/png", "data": "cGxhdGU=" } },
                        { "text": "describe" }
                    ]
                }],
                "generation_config": { "response_mime_type": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "{\"mealName\":\"Toast\"}" }] }
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiLLMClient::new(&config(&mock_server.uri())).unwrap();
        let text = client
            .generate_with_image("describe".to_string(), image(), json!({"type": "object"}))
            .await
            .unwrap();

        assert_eq!(text, "{\"mealName\":\"Toast\"}");
    }

    #[tokio::test]
    async fn test_error_status_is_external_service_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let client = GeminiLLMClient::new(&config(&mock_server.uri())).unwrap();
        let err = client
            .generate_with_image("describe".to_string(), image(), json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&mock_server)
            .await;

        let client = GeminiLLMClient::new(&config(&mock_server.uri())).unwrap();
        let result = client
            .generate_with_image("describe".to_string(), image(), json!({}))
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }
}
