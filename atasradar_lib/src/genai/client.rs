//! Gemini REST client implementation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::error::GenAiError;
use super::image::InlineImage;
use super::poll::{poll_until, PollPolicy};
use super::types::{
    ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, GoogleSearch,
    Operation, Part, PredictVideoRequest, Tool, VideoImage, VideoInstance, VideoParameters,
};

pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_VERSION: &str = "v1beta";

/// Model used for each capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelNames {
    pub text: String,
    pub image: String,
    pub video: String,
}

impl Default for ModelNames {
    fn default() -> Self {
        Self {
            text: "gemini-3-flash-preview".to_string(),
            image: "gemini-2.5-flash-image".to_string(),
            video: "veo-3.1-fast-generate-preview".to_string(),
        }
    }
}

/// Everything the client needs, including the credential. Nothing is read
/// from the environment by the client itself.
#[derive(Clone, Debug)]
pub struct GenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub models: ModelNames,
    pub poll: PollPolicy,
}

impl GenAiConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_GENAI_BASE_URL.to_string(),
            models: ModelNames::default(),
            poll: PollPolicy::default(),
        }
    }
}

/// A web page the answer was grounded on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceCitation {
    pub uri: String,
    pub title: Option<String>,
}

impl SourceCitation {
    /// Title when the service supplied one, otherwise the URI.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.uri)
    }
}

/// Answer to a market question plus the pages it cites.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketAnswer {
    pub text: String,
    pub sources: Vec<SourceCitation>,
}

/// A finished video, fetchable with [`GenAiClient::download_video`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    pub uri: String,
    /// Operation that produced the video.
    pub operation: String,
}

/// Gemini REST API client.
pub struct GenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: ModelNames,
    poll: PollPolicy,
}

impl GenAiClient {
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        if config.api_key.trim().is_empty() {
            return Err(GenAiError::MissingApiKey);
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            models: config.models,
            poll: config.poll,
        })
    }

    /// Create a client against a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: &str, config: GenAiConfig) -> Result<Self, GenAiError> {
        Self::new(GenAiConfig {
            base_url: base_url.to_string(),
            ..config
        })
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/{}/models/{}:{}", self.base_url, API_VERSION, model, method)
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, GenAiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, GenAiError> {
        let response = self
            .client
            .get(url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;
        read_json(response).await
    }

    /// Answers a question using web search, returning the text and the web
    /// sources it was grounded on.
    pub async fn ask_market_intelligence(&self, prompt: &str) -> Result<MarketAnswer, GenAiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            tools: vec![Tool {
                google_search: Some(GoogleSearch {}),
            }],
        };
        let response: GenerateContentResponse = self
            .post(&self.model_url(&self.models.text, "generateContent"), &request)
            .await?;

        let sources = response
            .grounding_chunks()
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| {
                web.uri.as_ref().map(|uri| SourceCitation {
                    uri: uri.clone(),
                    title: web.title.clone().filter(|t| !t.is_empty()),
                })
            })
            .collect();

        Ok(MarketAnswer {
            text: response.text(),
            sources,
        })
    }

    /// Applies `prompt` to `image` and returns the edited image as a data URL.
    pub async fn edit_image(&self, image: &InlineImage, prompt: &str) -> Result<String, GenAiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline(&image.mime_type, &image.data),
                Part::text(prompt),
            ])],
            tools: Vec::new(),
        };
        let response: GenerateContentResponse = self
            .post(&self.model_url(&self.models.image, "generateContent"), &request)
            .await?;

        let blob = response
            .first_inline_data()
            .ok_or(GenAiError::NoImageProduced)?;
        Ok(format!("data:{};base64,{}", blob.mime_type, blob.data))
    }

    /// Submits an image-to-video job and polls it until it finishes, the
    /// poll policy deadline passes, or `cancel` fires.
    pub async fn generate_video(
        &self,
        image: &InlineImage,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<GeneratedVideo, GenAiError> {
        let request = PredictVideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
                image: VideoImage {
                    bytes_base64_encoded: image.data.clone(),
                    mime_type: image.mime_type.clone(),
                },
            }],
            parameters: VideoParameters::default(),
        };
        let submit_url = self.model_url(&self.models.video, "predictLongRunning");
        let submit = self.post::<_, Operation>(&submit_url, &request);
        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GenAiError::Cancelled),
            op = submit => op?,
        };
        tracing::info!(operation = %submitted.name, "video generation submitted");

        let finished = if submitted.done {
            submitted
        } else {
            let url = format!("{}/{}/{}", self.base_url, API_VERSION, submitted.name);
            let url = url.as_str();
            let this = self;
            poll_until(&self.poll, cancel, move || async move {
                let op: Operation = this.get(url).await?;
                Ok::<_, GenAiError>(if op.done { Some(op) } else { None })
            })
            .await?
        };

        if let Some(status) = &finished.error {
            return Err(GenAiError::OperationFailed(status.message.clone()));
        }
        let uri = finished.video_uri().ok_or(GenAiError::NoVideoProduced)?;
        Ok(GeneratedVideo {
            uri: uri.to_string(),
            operation: finished.name.clone(),
        })
    }

    /// Downloads the media bytes of a generated video.
    pub async fn download_video(&self, video: &GeneratedVideo) -> Result<Vec<u8>, GenAiError> {
        let response = self
            .client
            .get(&video.uri)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GenAiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = error_message(&body);
        tracing::error!("AI request failed with status {}: {}", status, message);
        return Err(GenAiError::HttpStatus {
            status: status.as_u16(),
            message,
        });
    }
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to parse AI response: {}", e);
        GenAiError::ParseFailed(e.to_string())
    })
}

/// Extracts `error.message` from an API error body, falling back to a
/// snippet of the raw body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(status) = parsed.error {
            if !status.message.is_empty() {
                return status.message;
            }
        }
    }
    let snippet: String = body.chars().take(200).collect();
    if snippet.len() < body.len() {
        format!("{}...", snippet)
    } else {
        snippet
    }
}
