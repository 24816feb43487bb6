use crate::error::AtasRadarError;
use crate::genai::{GenAiClient, GeneratedVideo, InlineImage, MarketAnswer};
use crate::resource::Resource;
use crate::validation;

/// An image-driven panel: the selected source image and the last result.
struct ImagePanel<T> {
    source: Option<InlineImage>,
    result: Resource<Option<T>>,
}

impl<T> ImagePanel<T> {
    fn new(label: &'static str) -> Self {
        Self {
            source: None,
            result: Resource::new(label, None),
        }
    }

    /// A new source invalidates whatever the previous one produced.
    fn select(&mut self, image: InlineImage) {
        self.source = Some(image);
        self.result.reset(None);
    }

    fn can_submit(&self, prompt: &str) -> bool {
        self.source.is_some() && !self.result.is_loading() && !prompt.trim().is_empty()
    }

    fn require_source(&self) -> Result<InlineImage, AtasRadarError> {
        self.source
            .clone()
            .ok_or_else(|| AtasRadarError::InvalidInput("select an image first".to_string()))
    }
}

/// The AI assistant's three tools: market questions, image editing and
/// image-to-video generation. Each tool keeps its own loading state.
///
/// Blank prompts and missing images are refused before any request is sent.
pub struct AiAssistant<'a> {
    client: &'a GenAiClient,
    market: Resource<Option<MarketAnswer>>,
    image: ImagePanel<String>,
    video: ImagePanel<GeneratedVideo>,
}

impl<'a> AiAssistant<'a> {
    pub fn new(client: &'a GenAiClient) -> Self {
        Self {
            client,
            market: Resource::new("market_intelligence", None),
            image: ImagePanel::new("image_editor"),
            video: ImagePanel::new("video_generator"),
        }
    }

    /// Whether the market form may be submitted.
    pub fn can_ask(&self, prompt: &str) -> bool {
        !self.market.is_loading() && !prompt.trim().is_empty()
    }

    pub fn can_edit_image(&self, prompt: &str) -> bool {
        self.image.can_submit(prompt)
    }

    pub fn can_generate_video(&self, prompt: &str) -> bool {
        self.video.can_submit(prompt)
    }

    pub async fn ask(&mut self, prompt: &str) -> Result<(), AtasRadarError> {
        let prompt = validation::validate_prompt(prompt)?;
        let client = self.client;
        self.market
            .load(async move { client.ask_market_intelligence(&prompt).await.map(Some) })
            .await?;
        Ok(())
    }

    pub fn market_answer(&self) -> Option<&MarketAnswer> {
        self.market.value().as_ref()
    }

    pub fn market(&self) -> &Resource<Option<MarketAnswer>> {
        &self.market
    }

    /// Sets the image to edit and clears the previous edit.
    pub fn select_image(&mut self, image: InlineImage) {
        self.image.select(image);
    }

    pub fn selected_image(&self) -> Option<&InlineImage> {
        self.image.source.as_ref()
    }

    pub async fn edit_image(&mut self, prompt: &str) -> Result<(), AtasRadarError> {
        let prompt = validation::validate_prompt(prompt)?;
        let source = self.image.require_source()?;
        let client = self.client;
        self.image
            .result
            .load(async move { client.edit_image(&source, &prompt).await.map(Some) })
            .await?;
        Ok(())
    }

    /// Edited image as a data URL.
    pub fn edited_image(&self) -> Option<&str> {
        self.image.result.value().as_deref()
    }

    pub fn image_editor(&self) -> &Resource<Option<String>> {
        &self.image.result
    }

    /// Sets the starting frame for video generation and clears the previous
    /// video.
    pub fn select_video_image(&mut self, image: InlineImage) {
        self.video.select(image);
    }

    pub fn selected_video_image(&self) -> Option<&InlineImage> {
        self.video.source.as_ref()
    }

    /// Runs the whole submit-and-poll cycle. Tearing down the video panel
    /// (see [`AiAssistant::video_generator`]) stops the polling.
    pub async fn generate_video(&mut self, prompt: &str) -> Result<(), AtasRadarError> {
        let prompt = validation::validate_prompt(prompt)?;
        let source = self.video.require_source()?;
        let client = self.client;
        let cancel = self.video.result.cancellation_token();
        self.video
            .result
            .load(async move {
                client
                    .generate_video(&source, &prompt, &cancel)
                    .await
                    .map(Some)
            })
            .await?;
        Ok(())
    }

    pub fn generated_video(&self) -> Option<&GeneratedVideo> {
        self.video.result.value().as_ref()
    }

    pub fn video_generator(&self) -> &Resource<Option<GeneratedVideo>> {
        &self.video.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genai::GenAiConfig;

    fn offline_client() -> GenAiClient {
        // Port 9 (discard) is never served; any request would fail.
        GenAiClient::with_base_url("http://127.0.0.1:9", GenAiConfig::new("test-key")).unwrap()
    }

    #[tokio::test]
    async fn blank_prompt_is_refused() {
        let client = offline_client();
        let mut assistant = AiAssistant::new(&client);
        let err = assistant.ask("   ").await.unwrap_err();
        assert!(matches!(err, AtasRadarError::InvalidInput(_)));
        assert!(assistant.market_answer().is_none());
        assert!(assistant.market().error().is_none());
    }

    #[tokio::test]
    async fn edit_without_image_is_refused() {
        let client = offline_client();
        let mut assistant = AiAssistant::new(&client);
        let err = assistant.edit_image("remove background").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: select an image first");
    }

    #[tokio::test]
    async fn video_without_image_is_refused() {
        let client = offline_client();
        let mut assistant = AiAssistant::new(&client);
        let err = assistant.generate_video("pan slowly").await.unwrap_err();
        assert!(matches!(err, AtasRadarError::InvalidInput(_)));
        assert!(!assistant.video_generator().is_loading());
    }

    #[test]
    fn selecting_image_keeps_panels_apart() {
        let client = offline_client();
        let mut assistant = AiAssistant::new(&client);
        assert!(!assistant.can_edit_image("crop"));
        assistant.select_image(InlineImage::from_bytes(b"png", "image/png"));
        assert!(assistant.can_edit_image("crop"));
        assert!(!assistant.can_edit_image(" "));
        assert!(!assistant.can_generate_video("crop"));
        assert!(assistant.selected_image().is_some());
        assert!(assistant.selected_video_image().is_none());
    }
}
