//! Limit/offset pagination for listing endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Page size used when only an offset is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Validation errors for paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageValidationError {
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange { max: u32 },
}

/// A window over a listing ordered newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    /// Build a page from optional query parameters.
    ///
    /// Returns `Ok(None)` when neither parameter is present, meaning the caller
    /// asked for an unpaged listing.
    ///
    /// # Errors
    /// Returns [`PageValidationError::LimitOutOfRange`] when `limit` is zero or
    /// exceeds [`MAX_PAGE_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::Page;
    ///
    /// assert!(Page::from_params(None, None).expect("valid").is_none());
    /// let page = Page::from_params(None, Some(40)).expect("valid").expect("paged");
    /// assert_eq!((page.limit(), page.offset()), (20, 40));
    /// assert!(Page::from_params(Some(0), None).is_err());
    /// ```
    pub fn from_params(
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Option<Self>, PageValidationError> {
        if limit.is_none() && offset.is_none() {
            return Ok(None);
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(PageValidationError::LimitOutOfRange { max: MAX_PAGE_SIZE });
        }
        Ok(Some(Self {
            limit,
            offset: offset.unwrap_or(0),
        }))
    }

    /// Maximum number of rows to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1), None, 1, 0)]
    #[case(Some(100), Some(5), 100, 5)]
    #[case(None, Some(7), DEFAULT_PAGE_SIZE, 7)]
    fn builds_pages(
        #[case] limit: Option<u32>,
        #[case] offset: Option<u32>,
        #[case] expected_limit: u32,
        #[case] expected_offset: u32,
    ) {
        let page = Page::from_params(limit, offset)
            .expect("valid params")
            .expect("paged");
        assert_eq!(page.limit(), expected_limit);
        assert_eq!(page.offset(), expected_offset);
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(101))]
    fn rejects_out_of_range_limits(#[case] limit: Option<u32>) {
        assert_eq!(
            Page::from_params(limit, None),
            Err(PageValidationError::LimitOutOfRange { max: MAX_PAGE_SIZE })
        );
    }
}
