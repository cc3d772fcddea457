//! Page-window arithmetic for bounded listing queries.
//!
//! The actual row count comes from the repository, which must issue
//! `SELECT COUNT(*)` as its own statement so the count is never composed
//! with the page query's LIMIT/OFFSET/ORDER clauses.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// Hard ceiling for the `limit` query parameter.
pub const MAX_LIMIT: i64 = 50;
/// Applied when the client sends no `limit` (or a non-positive one).
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw pagination controls as they arrive on the query string.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Rows per page, capped at 50.
    pub limit: Option<i64>,
    /// 1-based page number.
    pub page: Option<i64>,
}

impl PageQuery {
    /// Resolves the raw controls into a usable `(limit, page)` pair.
    ///
    /// Non-positive values fall back to defaults; a limit above
    /// [`MAX_LIMIT`] is a client error and must be rejected before any
    /// persistence query runs.
    pub fn resolve(self) -> AppResult<(i64, i64)> {
        let limit = match self.limit {
            Some(l) if l > MAX_LIMIT => {
                return Err(AppError::bad_request(format!("limit cannot exceed {}", MAX_LIMIT)));
            }
            Some(l) if l >= 1 => l,
            _ => DEFAULT_LIMIT,
        };
        let page = match self.page {
            Some(p) if p >= 1 => p,
            _ => 1,
        };
        Ok((limit, page))
    }
}

/// Computed pagination descriptor for one listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub page: i64,
    /// Offset the page query runs with. Deliberately not clamped when
    /// `page` exceeds `total_pages`: the query returns an empty set and
    /// callers compare `page > total_pages` to detect the overrun.
    pub offset: i64,
    pub total_rows: i64,
    /// `ceil(total_rows / limit)`; 0 when the table is empty. Always the
    /// true value, even for overrun pages.
    pub total_pages: i64,
}

impl PageWindow {
    /// Pure computation; preconditions `limit >= 1` and `page >= 1` are
    /// guaranteed by [`PageQuery::resolve`].
    ///
    /// The offset saturates instead of overflowing: `page` comes straight
    /// from the query string, and an absurdly large value must stay an
    /// ordinary overrun (empty result set), not a panic or a wrapped
    /// negative offset that would silently serve page 1.
    pub fn compute(limit: i64, page: i64, total_rows: i64) -> Self {
        debug_assert!(limit >= 1);
        debug_assert!(page >= 1);
        let offset = (page - 1).saturating_mul(limit);
        let total_pages = (total_rows + limit - 1) / limit;
        Self { limit, page, offset, total_rows, total_pages }
    }
}
