use anyhow::{bail, Result};
use atasradar_lib::validation;
use atasradar_lib::{ArpQuery, Client, Query};
use clap::Args;
use tokio_util::sync::CancellationToken;

use super::parse_window;
use crate::output::{print_arps, OutputFormat};

#[derive(Args)]
pub struct AtasArgs {
    /// Earliest validity start date (YYYY-MM-DD). Defaults to one year ago
    #[arg(long)]
    pub from: Option<String>,

    /// Latest validity start date (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    pub to: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page (1-500)
    #[arg(long, default_value = "20")]
    pub page_size: i64,

    /// Managing unit code (UASG)
    #[arg(long)]
    pub uasg: Option<String>,

    /// Purchase modality code
    #[arg(long)]
    pub modality: Option<i64>,
}

pub async fn run(
    args: &AtasArgs,
    client: &Client,
    format: &OutputFormat,
    shutdown: &CancellationToken,
) -> Result<()> {
    let (from, to) = parse_window(args.from.as_deref(), args.to.as_deref())?;
    let mut query = ArpQuery::default()
        .with_validity_window(from, to)
        .with_page(validation::validate_page(args.page)?)
        .with_page_size(validation::validate_page_size(args.page_size)?);

    if let Some(ref uasg) = args.uasg {
        query = query.with_managing_unit(&validation::validate_uasg(uasg)?);
    }
    if let Some(modality) = args.modality {
        query = query.with_modality(modality);
    }

    let resp = tokio::select! {
        _ = shutdown.cancelled() => bail!("cancelled"),
        resp = client.get_arps(&query) => resp?,
    };

    eprintln!(
        "Page {}/{} ({} total atas)",
        args.page, resp.total_pages, resp.total_count
    );

    print_arps(&resp.results, format)
}
