use anyhow::Result;
use atasradar_lib::validation;
use atasradar_lib::{Client, ItemSearch, SearchFilters};
use clap::Args;
use tokio_util::sync::CancellationToken;

use super::{cancel_on_shutdown, parse_window, settle_view_load, today};
use crate::output::{print_items, OutputFormat};

#[derive(Args)]
pub struct ItemsArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page (1-500)
    #[arg(long, default_value_t = atasradar_lib::views::SEARCH_PAGE_SIZE)]
    pub page_size: i64,

    /// CATMAT/CATSER item code
    #[arg(long)]
    pub catmat: Option<String>,

    /// Managing unit code (UASG)
    #[arg(long)]
    pub uasg: Option<String>,

    /// Earliest validity start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest validity start date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

pub async fn run(
    args: &ItemsArgs,
    client: &Client,
    format: &OutputFormat,
    shutdown: &CancellationToken,
) -> Result<()> {
    let (from, to) = parse_window(args.from.as_deref(), args.to.as_deref())?;
    let filters = SearchFilters {
        item_code: args
            .catmat
            .as_deref()
            .map(validation::validate_catalog_code)
            .transpose()?,
        managing_unit: args
            .uasg
            .as_deref()
            .map(validation::validate_uasg)
            .transpose()?,
    };
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut search = ItemSearch::new(client, today())
        .with_window(from, to)
        .with_filters(filters)
        .with_page_size(page_size);
    cancel_on_shutdown(shutdown, search.resource().cancellation_token());

    settle_view_load(search.go_to_page(args.page).await)?;

    let shown = search.shown();
    eprintln!(
        "Page {}/{} ({} total items)",
        shown.page, shown.total_pages, shown.total
    );

    print_items(&shown.items, format)
}
