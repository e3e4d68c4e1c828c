//! Query parameters shared by paged listings.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, Page};
use crate::inbound::http::validation::parse_page;

/// `?limit=&offset=` parameters. Omitting both returns the full listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Rows to return, 1 to 100. Defaults to 20 when only `offset` is given.
    pub limit: Option<u32>,
    /// Rows to skip.
    pub offset: Option<u32>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> Result<Option<Page>, Error> {
        parse_page(self.limit, self.offset)
    }
}
