use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use atasradar_lib::genai::image::extension_for_mime;
use atasradar_lib::{AiAssistant, GenAiClient, InlineImage};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use super::{bail_on_cancel, cancel_on_shutdown};
use crate::output::{print_json, print_market_answer, OutputFormat};

#[derive(Args)]
pub struct AskArgs {
    /// Question about prices, suppliers or market trends
    pub prompt: String,
}

#[derive(Args)]
pub struct EditImageArgs {
    /// Image to edit (png, jpg, jpeg, webp, heic, heif)
    #[arg(long)]
    pub image: PathBuf,

    /// Editing instruction
    #[arg(long)]
    pub prompt: String,

    /// Where to write the result. Defaults to edited.<ext> next to the input
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateVideoArgs {
    /// Starting frame (png, jpg, jpeg, webp, heic, heif)
    #[arg(long)]
    pub image: PathBuf,

    /// Description of the motion
    #[arg(long)]
    pub prompt: String,

    /// Where to write the video
    #[arg(long, default_value = "video.mp4")]
    pub out: PathBuf,
}

pub async fn ask(
    args: &AskArgs,
    client: &GenAiClient,
    format: &OutputFormat,
    shutdown: &CancellationToken,
) -> Result<()> {
    let mut assistant = AiAssistant::new(client);
    cancel_on_shutdown(shutdown, assistant.market().cancellation_token());

    if let Err(e) = assistant.ask(&args.prompt).await {
        return bail_on_cancel(e);
    }
    let Some(answer) = assistant.market_answer() else {
        bail!("no answer received");
    };

    match format {
        OutputFormat::Json => print_json(answer),
        _ => print_market_answer(answer),
    }
    Ok(())
}

pub async fn edit_image(
    args: &EditImageArgs,
    client: &GenAiClient,
    shutdown: &CancellationToken,
) -> Result<()> {
    let mut assistant = AiAssistant::new(client);
    cancel_on_shutdown(shutdown, assistant.image_editor().cancellation_token());

    let source = InlineImage::from_path(&args.image).await?;
    assistant.select_image(source);

    if let Err(e) = assistant.edit_image(&args.prompt).await {
        if e.is_no_result() {
            bail!("the model did not return an image. Try rephrasing the instruction");
        }
        return bail_on_cancel(e);
    }

    let edited = assistant
        .edited_image()
        .and_then(InlineImage::from_data_url)
        .context("edited image is not a valid data URL")?;
    let out = match &args.out {
        Some(path) => path.clone(),
        None => default_edit_path(&args.image, &edited.mime_type),
    };
    write_output(&out, &edited.decode()?).await?;
    eprintln!("Edited image written to {}", out.display());
    Ok(())
}

pub async fn generate_video(
    args: &GenerateVideoArgs,
    client: &GenAiClient,
    shutdown: &CancellationToken,
) -> Result<()> {
    let mut assistant = AiAssistant::new(client);
    cancel_on_shutdown(shutdown, assistant.video_generator().cancellation_token());

    let source = InlineImage::from_path(&args.image).await?;
    assistant.select_video_image(source);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {msg}",
    )?);
    spinner.set_message("Generating video, this can take a few minutes...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = assistant.generate_video(&args.prompt).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        if e.is_no_result() {
            bail!("the operation finished without a video");
        }
        return bail_on_cancel(e);
    }
    let Some(video) = assistant.generated_video() else {
        bail!("no video received");
    };

    let bytes = client.download_video(video).await?;
    write_output(&args.out, &bytes).await?;
    eprintln!("Video written to {}", args.out.display());
    Ok(())
}

fn default_edit_path(input: &Path, mime_type: &str) -> PathBuf {
    input.with_file_name(format!("edited.{}", extension_for_mime(mime_type)))
}

async fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_path_sits_next_to_input() {
        assert_eq!(
            default_edit_path(Path::new("/tmp/photos/item.jpg"), "image/png"),
            PathBuf::from("/tmp/photos/edited.png")
        );
    }
}
