use chrono::NaiveDate;
use comprasgov_api::types::ArpItem;
use comprasgov_api::{ArpItemQuery, Client, Query};

use super::last_year_window;
use crate::error::AtasRadarError;
use crate::resource::Resource;

/// Items shown in the supplier's "my atas" table.
pub const SUPPLIER_PAGE_SIZE: i64 = 5;

/// Supplier dashboard: a short list of recent items with their registered
/// value.
pub struct SupplierDashboard<'a> {
    client: &'a Client,
    supplier_tax_id: Option<String>,
    items: Resource<Vec<ArpItem>>,
}

impl<'a> SupplierDashboard<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            supplier_tax_id: None,
            items: Resource::new("supplier_dashboard", Vec::new()),
        }
    }

    /// Restricts the list to one supplier (CNPJ/CPF).
    pub fn for_supplier(mut self, tax_id: &str) -> Self {
        self.supplier_tax_id = Some(tax_id.to_string());
        self
    }

    pub fn query(&self, today: NaiveDate) -> ArpItemQuery {
        let (from, to) = last_year_window(today);
        let query = ArpItemQuery::default()
            .with_validity_window(from, to)
            .with_page_size(SUPPLIER_PAGE_SIZE);
        match &self.supplier_tax_id {
            Some(tax_id) => query.with_supplier_tax_id(tax_id),
            None => query,
        }
    }

    pub async fn load(&mut self, today: NaiveDate) -> Result<(), AtasRadarError> {
        let query = self.query(today);
        let client = self.client;
        self.items
            .load(async move {
                let page = client.get_arp_items(&query).await?;
                Ok::<_, AtasRadarError>(page.results)
            })
            .await?;
        Ok(())
    }

    pub fn items(&self) -> &[ArpItem] {
        self.items.value()
    }

    /// Sum of unit price times registered quantity over the listed items.
    pub fn total_value(&self) -> f64 {
        self.items.value().iter().map(ArpItem::total_value).sum()
    }

    pub fn resource(&self) -> &Resource<Vec<ArpItem>> {
        &self.items
    }
}
