use anyhow::{bail, Result};
use atasradar_lib::{Client, SupplierDashboard};
use clap::Args;
use tokio_util::sync::CancellationToken;

use super::{cancel_on_shutdown, settle_view_load, today};
use crate::output::{format_brl, print_items, OutputFormat};

#[derive(Args)]
pub struct SupplierArgs {
    /// Supplier CNPJ/CPF, digits only
    #[arg(long)]
    pub tax_id: Option<String>,
}

pub async fn run(
    args: &SupplierArgs,
    client: &Client,
    format: &OutputFormat,
    shutdown: &CancellationToken,
) -> Result<()> {
    let mut dashboard = SupplierDashboard::new(client);
    if let Some(ref tax_id) = args.tax_id {
        let tax_id = tax_id.trim();
        if tax_id.is_empty() || !tax_id.chars().all(|c| c.is_ascii_digit()) {
            bail!("invalid CNPJ/CPF '{}'. Expected digits only", tax_id);
        }
        dashboard = dashboard.for_supplier(tax_id);
    }
    cancel_on_shutdown(shutdown, dashboard.resource().cancellation_token());

    settle_view_load(dashboard.load(today()).await)?;

    eprintln!(
        "{} items, total registered value {}",
        dashboard.items().len(),
        format_brl(dashboard.total_value())
    );

    print_items(dashboard.items(), format)
}
