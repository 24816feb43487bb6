use anyhow::{bail, Result};
use atasradar_lib::validation;
use atasradar_lib::{AdhesionQuery, Client};
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::output::{print_adhesions, OutputFormat};

#[derive(Args)]
pub struct AdhesionsArgs {
    /// Ata number, e.g. 00012/2024
    #[arg(long)]
    pub ata: String,

    /// Managing unit code (UASG)
    #[arg(long)]
    pub uasg: String,

    /// Item number within the ata
    #[arg(long)]
    pub item: String,
}

pub async fn run(
    args: &AdhesionsArgs,
    client: &Client,
    format: &OutputFormat,
    shutdown: &CancellationToken,
) -> Result<()> {
    if args.ata.trim().is_empty() || args.item.trim().is_empty() {
        bail!("--ata and --item must not be empty");
    }
    let uasg = validation::validate_uasg(&args.uasg)?;
    let query = AdhesionQuery::new(args.ata.trim(), &uasg, args.item.trim());

    let resp = tokio::select! {
        _ = shutdown.cancelled() => bail!("cancelled"),
        resp = client.get_item_adhesions(&query) => resp?,
    };

    eprintln!("{} adhesion requests", resp.total_count);

    print_adhesions(&resp.results, format)
}
