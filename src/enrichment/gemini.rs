//! Gemini REST implementation of [`EnrichmentBackend`].
//!
//! Weather and analysis go through `models/{text_model}:generateContent`
//! (weather with the Google Search tool, analysis with a JSON response schema
//! derived from [`AnalysisPayload`]). Images go through
//! `models/{image_model}:predict`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{prompts, AnalysisPayload, EnrichmentBackend, EnrichmentError, GeneratedImage};
use crate::config::GeminiConfig;
use crate::memory::types::GeoPosition;

const API_KEY_HEADER: &str = "x-goog-api-key";
const IMAGE_ASPECT_RATIO: &str = "4:3";
const IMAGE_MIME_TYPE: &str = "image/jpeg";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_json_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl GenerateContentRequest {
    fn prompt(text: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(text) }],
            }],
            tools: Vec::new(),
            generation_config: None,
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        if config.api_key.is_empty() {
            tracing::warn!("no Gemini API key configured; enrichment will use fallback values");
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn post<Req: Serialize + Sync, Resp: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        body: &Req,
    ) -> Result<Resp, EnrichmentError> {
        let url = format!("{}/models/{}:{}", self.base_url, model, method);
        tracing::debug!(%url, "gemini request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn generate_text(&self, request: GenerateContentRequest) -> Result<String, EnrichmentError> {
        let response: GenerateContentResponse = self
            .post(&self.text_model, "generateContent", &request)
            .await?;
        response.text().ok_or(EnrichmentError::EmptyResponse)
    }
}

/// JSON schema for [`AnalysisPayload`] without the meta keys the API rejects.
fn analysis_schema() -> Result<serde_json::Value, EnrichmentError> {
    let mut schema = serde_json::to_value(schemars::schema_for!(AnalysisPayload))?;
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    Ok(schema)
}

#[async_trait]
impl EnrichmentBackend for GeminiClient {
    async fn fetch_weather(&self, position: GeoPosition) -> Result<String, EnrichmentError> {
        let nonce = chrono::Utc::now().timestamp_millis();
        let mut request =
            GenerateContentRequest::prompt(prompts::weather_prompt(position.lat, position.lng, nonce));
        request.tools.push(Tool {
            google_search: GoogleSearch {},
        });

        let text = self.generate_text(request).await?;
        tracing::info!(chars = text.chars().count(), "weather context received");
        Ok(text)
    }

    async fn analyze(
        &self,
        text: &str,
        weather: &str,
        captured_at: &str,
    ) -> Result<AnalysisPayload, EnrichmentError> {
        let mut request =
            GenerateContentRequest::prompt(prompts::analysis_prompt(text, weather, captured_at));
        request.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json",
            response_json_schema: analysis_schema()?,
        });

        let raw = self.generate_text(request).await?;
        let payload: AnalysisPayload = serde_json::from_str(raw.trim())?;
        tracing::info!(mood = %payload.mood, tags = payload.tags.len(), "memory analyzed");
        Ok(payload)
    }

    async fn generate_image(
        &self,
        text: &str,
        mood: &str,
        weather: &str,
    ) -> Result<Option<GeneratedImage>, EnrichmentError> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompts::image_prompt(text, mood, weather),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE,
                },
            },
        };

        let response: PredictResponse = self.post(&self.image_model, "predict", &request).await?;

        let image = response.predictions.into_iter().find_map(|p| {
            let data = p.bytes_base64_encoded.filter(|d| !d.is_empty())?;
            Some(GeneratedImage {
                mime_type: p.mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_string()),
                base64_data: data,
            })
        });

        tracing::info!(generated = image.is_some(), "image generation finished");
        Ok(image)
    }
}
