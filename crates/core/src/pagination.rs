//! Page/limit arithmetic for record tables.

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Page sizes offered by the limit selector.
pub const LIMIT_CHOICES: &[u64] = &[100, 500, 1000, 5000];

/// Default number of records per page.
pub const DEFAULT_LIMIT: u64 = 500;

/// Largest page the server will return.
pub const MAX_LIMIT: u64 = 50_000;

/// Clamp a user-provided limit to `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Zero-based page position within a filtered container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: u64, limit: Option<u64>) -> Self {
        Self {
            page,
            limit: clamp_limit(limit),
        }
    }

    /// `page * limit`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }

    /// The previous page, staying at page 0.
    pub fn previous(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..*self
        }
    }

    /// The next page. Not clamped against the total; an out-of-range page
    /// yields an empty record list from the server.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..*self
        }
    }

    /// Whether a page exists after this one for `count` total records.
    pub fn has_next(&self, count: u64) -> bool {
        self.offset().saturating_add(self.limit) < count
    }

    /// The 1-based record range this page shows out of `count`.
    pub fn range(&self, count: u64) -> DisplayRange {
        let offset = self.offset();
        if offset >= count {
            return DisplayRange {
                first: 0,
                last: 0,
                total: count,
            };
        }
        DisplayRange {
            first: offset + 1,
            last: offset.saturating_add(self.limit).min(count),
            total: count,
        }
    }
}

/// Inclusive 1-based range of displayed records. `first == 0` means the page
/// is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub first: u64,
    pub last: u64,
    pub total: u64,
}

impl DisplayRange {
    pub fn is_empty(&self) -> bool {
        self.first == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_limit() {
        assert_eq!(Pagination::new(3, Some(500)).offset(), 1500);
        assert_eq!(Pagination::new(0, Some(100)).offset(), 0);
    }

    #[test]
    fn previous_stays_at_zero() {
        let p = Pagination::new(0, Some(100));
        assert_eq!(p.previous().page, 0);
        assert_eq!(Pagination::new(2, Some(100)).previous().page, 1);
    }

    #[test]
    fn next_is_unclamped() {
        let p = Pagination::new(9, Some(100));
        assert!(!p.has_next(1000));
        assert_eq!(p.next().page, 10);
        assert!(p.next().range(1000).is_empty());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(1_000_000)), MAX_LIMIT);
    }

    #[test]
    fn range_of_partial_last_page() {
        let r = Pagination::new(2, Some(500)).range(1234);
        assert_eq!(r, DisplayRange { first: 1001, last: 1234, total: 1234 });
    }

    #[test]
    fn range_of_empty_container() {
        assert!(Pagination::default().range(0).is_empty());
    }
}
