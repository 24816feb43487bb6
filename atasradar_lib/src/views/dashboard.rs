use chrono::NaiveDate;
use comprasgov_api::{ArpQuery, Client, Query};

use super::last_year_window;
use crate::error::AtasRadarError;
use crate::resource::Resource;

/// Headline numbers for the general dashboard: how many atas started their
/// validity during the last year.
pub struct GeneralDashboard<'a> {
    client: &'a Client,
    total_atas: Resource<Option<i64>>,
}

impl<'a> GeneralDashboard<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            total_atas: Resource::new("general_dashboard", None),
        }
    }

    /// Only the total is needed, so a single-record page is requested.
    pub fn query(today: NaiveDate) -> ArpQuery {
        let (from, to) = last_year_window(today);
        ArpQuery::default()
            .with_validity_window(from, to)
            .with_page_size(1)
    }

    pub async fn load(&mut self, today: NaiveDate) -> Result<(), AtasRadarError> {
        let query = Self::query(today);
        let client = self.client;
        self.total_atas
            .load(async move {
                let page = client.get_arps(&query).await?;
                Ok::<_, AtasRadarError>(Some(page.total_count))
            })
            .await?;
        Ok(())
    }

    /// `None` until a load succeeds.
    pub fn total_atas(&self) -> Option<i64> {
        *self.total_atas.value()
    }

    pub fn resource(&self) -> &Resource<Option<i64>> {
        &self.total_atas
    }
}
