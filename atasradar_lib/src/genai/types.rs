//! Wire types for the Gemini REST API. Only the fields this crate reads or
//! writes are modelled; everything else in a response is ignored.

use serde::{Deserialize, Serialize};

// -- generateContent --

#[derive(Serialize, Debug, Clone)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    /// Set on reasoning parts, which are not part of the answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn inline(mime_type: &str, data: &str) -> Self {
        Self {
            inline_data: Some(Blob {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct GoogleSearch {}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated answer text of the first candidate.
    pub fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// First inline blob of the first candidate.
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }

    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|g| g.grounding_chunks.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

// -- predictLongRunning (video) --

#[derive(Serialize, Debug, Clone)]
pub struct PredictVideoRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Serialize, Debug, Clone)]
pub struct VideoInstance {
    pub prompt: String,
    pub image: VideoImage,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VideoImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub sample_count: u32,
    pub resolution: String,
    pub aspect_ratio: String,
}

impl Default for VideoParameters {
    fn default() -> Self {
        Self {
            sample_count: 1,
            resolution: "720p".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }
}

/// Long-running operation handle, as returned on submit and on every poll.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationStatus>,
    #[serde(default)]
    pub response: Option<VideoOperationResponse>,
}

impl Operation {
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneratedSample {
    #[serde(default)]
    pub video: Option<VideoFile>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct VideoFile {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Error body returned by the API on non-success statuses.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<OperationStatus>,
}
