//! Client for the Gemini REST API: grounded question answering, image editing
//! and image-to-video generation.

pub mod client;
pub mod error;
pub mod image;
pub mod poll;
pub mod types;

pub use client::{
    GenAiClient, GenAiConfig, GeneratedVideo, MarketAnswer, ModelNames, SourceCitation,
    DEFAULT_GENAI_BASE_URL,
};
pub use error::GenAiError;
pub use image::InlineImage;
pub use poll::PollPolicy;
