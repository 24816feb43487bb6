use serde::{Deserialize, Serialize};

/// Page envelope returned by every open-data endpoint.
///
/// An empty page is a valid answer and is what the client returns when the
/// API reports "not found".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    #[serde(rename = "resultado", default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(rename = "totalRegistros", default)]
    pub total_count: i64,
    #[serde(rename = "totalPaginas", default)]
    pub total_pages: i64,
    #[serde(rename = "paginasRestantes", default)]
    pub pages_remaining: i64,
}

impl<T> Page<T> {
    /// A page with no results and all counters at zero.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_count: 0,
            total_pages: 0,
            pages_remaining: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether more pages follow this one.
    pub fn has_more(&self) -> bool {
        self.pages_remaining > 0
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
