mod commands;
mod output;
mod xml_output;

use anyhow::{bail, Result};
use atasradar_lib::{Client, GenAiClient, Settings};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "atasradar")]
#[command(about = "Browse Brazilian price-registration records (ARPs) from compras.gov.br")]
struct Cli {
    /// Output format: table, json, csv, md, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Number of atas whose validity started in the last year
    Dashboard,
    /// List price-registration records
    Atas(commands::atas::AtasArgs),
    /// Search ata items, 12 per page
    Items(commands::items::ItemsArgs),
    /// List adhesion requests for one ata item
    Adhesions(commands::adhesions::AdhesionsArgs),
    /// Recent items with their registered value
    Supplier(commands::supplier::SupplierArgs),
    /// Ask a market question answered with web search
    Ask(commands::assistant::AskArgs),
    /// Edit an image with a text instruction
    EditImage(commands::assistant::EditImageArgs),
    /// Generate a short video from an image
    GenerateVideo(commands::assistant::GenerateVideoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("atasradar=info".parse()?)
                .add_directive("comprasgov_api=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "md" | "markdown" => OutputFormat::Markdown,
        "xml" => OutputFormat::Xml,
        "table" => OutputFormat::Table,
        other => bail!(
            "unknown output format '{}'. Use table, json, csv, md or xml",
            other
        ),
    };

    let settings = Settings::from_env();

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            ctrl_c.cancel();
        }
    });

    match &cli.command {
        Commands::Dashboard => {
            let client = Client::with_config(settings.compras.clone())?;
            commands::dashboard::run(&client, &format, &shutdown).await?
        }
        Commands::Atas(args) => {
            let client = Client::with_config(settings.compras.clone())?;
            commands::atas::run(args, &client, &format, &shutdown).await?
        }
        Commands::Items(args) => {
            let client = Client::with_config(settings.compras.clone())?;
            commands::items::run(args, &client, &format, &shutdown).await?
        }
        Commands::Adhesions(args) => {
            let client = Client::with_config(settings.compras.clone())?;
            commands::adhesions::run(args, &client, &format, &shutdown).await?
        }
        Commands::Supplier(args) => {
            let client = Client::with_config(settings.compras.clone())?;
            commands::supplier::run(args, &client, &format, &shutdown).await?
        }
        Commands::Ask(args) => {
            let client = genai_client(&settings)?;
            commands::assistant::ask(args, &client, &format, &shutdown).await?
        }
        Commands::EditImage(args) => {
            let client = genai_client(&settings)?;
            commands::assistant::edit_image(args, &client, &shutdown).await?
        }
        Commands::GenerateVideo(args) => {
            let client = genai_client(&settings)?;
            commands::assistant::generate_video(args, &client, &shutdown).await?
        }
    }

    Ok(())
}

fn genai_client(settings: &Settings) -> Result<GenAiClient> {
    let Some(config) = settings.genai_config() else {
        bail!("GEMINI_API_KEY is not set. Export it or add it to a .env file");
    };
    Ok(GenAiClient::new(config)?)
}
