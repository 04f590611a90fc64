//! Page selection for the trivia listings.

use serde::Deserialize;
use utoipa::IntoParams;

/// `?page=N`, 1-based; defaults to the first page.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

fn default_page() -> i64 {
    1
}
