//! API models for request and response payloads

use serde::Deserialize;

pub mod comment;
pub mod like;
pub mod post;

/// Largest number of items a single page may return
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Default number of items per page
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Query parameters for paginated list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of items per page
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolve the query into a clamped `(page, limit, offset)` triple
    pub fn resolve(&self) -> (u32, u32, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        let offset = (page - 1) as i64 * limit as i64;
        (page, limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let (page, limit, offset) = PageQuery::default().resolve();
        assert_eq!(page, 1);
        assert_eq!(limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let query = PageQuery {
            page: Some(2),
            limit: Some(1000),
        };
        let (page, limit, offset) = query.resolve();
        assert_eq!(page, 2);
        assert_eq!(limit, MAX_PAGE_LIMIT);
        assert_eq!(offset, 100);
    }

    #[test]
    fn test_zero_values_are_normalized() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(0),
        };
        let (page, limit, offset) = query.resolve();
        assert_eq!(page, 1);
        assert_eq!(limit, 1);
        assert_eq!(offset, 0);
    }
}
