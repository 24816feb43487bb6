//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use chrono::NaiveDate;
use url::Url;

use super::params::{ParamValue, QueryParams};

/// Date format the API expects for every date parameter.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination, the validity window, and extra
/// parameters.
pub trait Query {
    /// Returns the parameters this query sends, in order.
    fn to_params(&self) -> QueryParams;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        self.to_params().add_to_url(url)
    }

    /// Sets the page number (`pagina`, 1-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Sets the number of results per page (`tamanhoPagina`).
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }

    /// Earliest validity start date (`dataVigenciaInicialMin`).
    fn with_validity_start_min(mut self, date: NaiveDate) -> Self
    where
        Self: Sized,
    {
        self.get_common().validity_start_min = Some(date);
        self
    }

    /// Latest validity start date (`dataVigenciaInicialMax`).
    fn with_validity_start_max(mut self, date: NaiveDate) -> Self
    where
        Self: Sized,
    {
        self.get_common().validity_start_max = Some(date);
        self
    }

    /// Sets both ends of the validity start window.
    fn with_validity_window(self, from: NaiveDate, to: NaiveDate) -> Self
    where
        Self: Sized,
    {
        self.with_validity_start_min(from).with_validity_start_max(to)
    }

    /// Adds an arbitrary parameter. Empty text values are dropped when the
    /// URL is built.
    fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self
    where
        Self: Sized,
    {
        self.get_common().extra.set(key, value);
        self
    }
}

/// Fields shared by all query types: validity window, pagination, and any
/// extra parameters set by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryCommon {
    /// Page number (1-indexed). `None` uses the API default.
    pub page: Option<i64>,
    /// Results per page. `None` uses the API default.
    pub page_size: Option<i64>,
    pub validity_start_min: Option<NaiveDate>,
    pub validity_start_max: Option<NaiveDate>,
    /// Parameters set through [`Query::with_param`]. Applied last, so they
    /// override typed fields with the same name.
    pub extra: QueryParams,
}

impl QueryCommon {
    /// Writes the validity window parameters, which the API expects first.
    pub fn write_window(&self, params: &mut QueryParams) {
        params.set_opt(
            "dataVigenciaInicialMin",
            self.validity_start_min
                .map(|d| d.format(DATE_FORMAT).to_string()),
        );
        params.set_opt(
            "dataVigenciaInicialMax",
            self.validity_start_max
                .map(|d| d.format(DATE_FORMAT).to_string()),
        );
    }

    /// Writes pagination and the extra parameters.
    pub fn write_paging(&self, params: &mut QueryParams) {
        params.set_opt("pagina", self.page);
        params.set_opt("tamanhoPagina", self.page_size);
        params.extend(&self.extra);
    }
}
