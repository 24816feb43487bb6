//! Runtime settings read from the environment.
//!
//! Every value has a default except the AI credential, which only the AI
//! commands need. The CLI loads a `.env` file first, so the same names work
//! there.

use std::time::Duration;

use comprasgov_api::{ClientConfig, DEFAULT_BASE_URL};

use crate::genai::{GenAiConfig, ModelNames, PollPolicy, DEFAULT_GENAI_BASE_URL};

/// Settings for both remote services.
#[derive(Clone, Debug)]
pub struct Settings {
    pub compras: ClientConfig,
    /// `None` when `GEMINI_API_KEY` is unset or blank.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub models: ModelNames,
    pub video_poll: PollPolicy,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let secs = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let timeout = match secs("ATASRADAR_HTTP_TIMEOUT_SECS", 0) {
            0 => None,
            n => Some(Duration::from_secs(n)),
        };
        let default_poll = PollPolicy::default();
        let poll_secs = secs("ATASRADAR_VIDEO_POLL_SECS", default_poll.interval.as_secs()).max(1);
        let max_wait = match secs(
            "ATASRADAR_VIDEO_MAX_WAIT_SECS",
            default_poll.max_wait.map(|d| d.as_secs()).unwrap_or(0),
        ) {
            0 => None,
            n => Some(Duration::from_secs(n)),
        };
        let default_models = ModelNames::default();

        Self {
            compras: ClientConfig {
                base_url: text("COMPRAS_API_BASE_URL", DEFAULT_BASE_URL),
                timeout,
            },
            gemini_api_key: lookup("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            gemini_base_url: text("GEMINI_BASE_URL", DEFAULT_GENAI_BASE_URL),
            models: ModelNames {
                text: text("GEMINI_TEXT_MODEL", &default_models.text),
                image: text("GEMINI_IMAGE_MODEL", &default_models.image),
                video: text("GEMINI_VIDEO_MODEL", &default_models.video),
            },
            video_poll: PollPolicy {
                interval: Duration::from_secs(poll_secs),
                max_wait,
            },
        }
    }

    /// Configuration for the AI client, or `None` without a credential.
    pub fn genai_config(&self) -> Option<GenAiConfig> {
        let api_key = self.gemini_api_key.clone()?;
        Some(GenAiConfig {
            api_key,
            base_url: self.gemini_base_url.clone(),
            models: self.models.clone(),
            poll: self.video_poll.clone(),
        })
    }
}
