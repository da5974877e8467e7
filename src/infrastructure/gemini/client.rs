use super::payload::{GenerateContentResponse, build_request, parse_object};
use crate::config::LlmEnvConfig;
use crate::domain::errors::ExtractionError;
use crate::domain::extraction::{ExtractedFeatures, ExtractionMode, FeatureExtractor};
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, join_url};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

/// Feature extractor backed by Gemini `generateContent`.
pub struct GeminiFeatureExtractor {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiFeatureExtractor {
    pub fn new(config: &LlmEnvConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(config.timeout),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }

    fn endpoint(&self) -> String {
        join_url(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )
    }
}

#[async_trait]
impl FeatureExtractor for GeminiFeatureExtractor {
    async fn extract_features(
        &self,
        text: &str,
        mode: ExtractionMode,
    ) -> Result<ExtractedFeatures, ExtractionError> {
        let api_key = self.api_key.as_deref().ok_or(ExtractionError::MissingApiKey)?;

        info!("Requesting {} features from Gemini ({})", mode, self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&build_request(text, mode))
            .send()
            .await
            .map_err(|e| ExtractionError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Request(e.without_url().to_string()))?;

        let reply = body.combined_text();
        debug!("Gemini reply: {} chars", reply.len());

        let parsed = parse_object(&reply).ok_or(ExtractionError::MalformedResponse)?;
        let extracted = ExtractedFeatures::from_parsed(&parsed, mode);

        info!(
            "Gemini extracted {} features, missing: {:?}",
            extracted.features.len() - extracted.missing_fields.len(),
            extracted.missing_fields
        );
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let config = LlmEnvConfig {
            base_url: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            ..LlmEnvConfig::default()
        };
        let extractor = GeminiFeatureExtractor::new(&config);
        assert_eq!(
            extractor.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let extractor = GeminiFeatureExtractor::new(&LlmEnvConfig::default());
        let result = extractor
            .extract_features("anything", ExtractionMode::Day)
            .await;
        assert!(matches!(result, Err(ExtractionError::MissingApiKey)));
    }
}
