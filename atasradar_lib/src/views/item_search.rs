use chrono::NaiveDate;
use comprasgov_api::types::ArpItem;
use comprasgov_api::{ArpItemQuery, Client, Query};

use super::last_year_window;
use crate::error::AtasRadarError;
use crate::resource::{LoadState, Resource};
use crate::validation;

/// Items per page in the search view.
pub const SEARCH_PAGE_SIZE: i64 = 12;

/// Optional filters of the search form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilters {
    /// CATMAT/CATSER code.
    pub item_code: Option<i64>,
    /// UASG code of the managing unit.
    pub managing_unit: Option<String>,
}

/// One page of search results, tagged with the page it came from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPage {
    pub page: i64,
    pub items: Vec<ArpItem>,
    pub total: i64,
    /// `totalPaginas` as reported by the API.
    pub total_pages: i64,
}

/// Paginated item search.
///
/// Moving forward is unbounded: the view does not clamp against the total
/// the API reports. Moving back stops at page 1.
pub struct ItemSearch<'a> {
    client: &'a Client,
    window: (NaiveDate, NaiveDate),
    filters: SearchFilters,
    page_size: i64,
    page: i64,
    results: Resource<ItemPage>,
}

impl<'a> ItemSearch<'a> {
    pub fn new(client: &'a Client, today: NaiveDate) -> Self {
        Self {
            client,
            window: last_year_window(today),
            filters: SearchFilters::default(),
            page_size: SEARCH_PAGE_SIZE,
            page: 1,
            results: Resource::new("item_search", ItemPage::default()),
        }
    }

    pub fn with_window(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.window = (from, to);
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Query for page `page` with the current window and filters.
    pub fn query_for(&self, page: i64) -> ArpItemQuery {
        let mut query = ArpItemQuery::default()
            .with_validity_window(self.window.0, self.window.1)
            .with_page(page)
            .with_page_size(self.page_size);
        if let Some(code) = self.filters.item_code {
            query = query.with_item_code(code);
        }
        if let Some(uasg) = &self.filters.managing_unit {
            query = query.with_managing_unit(uasg);
        }
        query
    }

    /// Fetches the current page.
    pub async fn load(&mut self) -> Result<(), AtasRadarError> {
        let page = self.page;
        let query = self.query_for(page);
        let client = self.client;
        self.results
            .load(async move {
                let resp = client.get_arp_items(&query).await?;
                Ok::<_, AtasRadarError>(ItemPage {
                    page,
                    items: resp.results,
                    total: resp.total_count,
                    total_pages: resp.total_pages,
                })
            })
            .await?;
        Ok(())
    }

    pub async fn next_page(&mut self) -> Result<(), AtasRadarError> {
        self.page += 1;
        self.load().await
    }

    /// Returns `Ok(false)` without fetching when already on page 1.
    pub async fn previous_page(&mut self) -> Result<bool, AtasRadarError> {
        if self.page <= 1 {
            return Ok(false);
        }
        self.page -= 1;
        self.load().await?;
        Ok(true)
    }

    pub async fn go_to_page(&mut self, page: i64) -> Result<(), AtasRadarError> {
        self.page = validation::validate_page(page)?;
        self.load().await
    }

    /// Page the next load will request.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Results currently shown. After a failed load these are still the
    /// results of the last successful page; check `shown.page`.
    pub fn shown(&self) -> &ItemPage {
        self.results.value()
    }

    pub fn items(&self) -> &[ArpItem] {
        &self.results.value().items
    }

    pub fn total(&self) -> i64 {
        self.results.value().total
    }

    pub fn state(&self) -> LoadState {
        self.results.state()
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_loading()
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1 && !self.is_loading()
    }

    pub fn resource(&self) -> &Resource<ItemPage> {
        &self.results
    }
}
