//! Page slicing for question listings
//!
//! Pages are 1-indexed. Out-of-range pages produce an empty slice; callers
//! decide whether that is an error.

use serde::Deserialize;

/// Default questions per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed, not clamped)
    pub page: i64,
    /// Items per page
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: i64, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Index of the first record on this page, or `None` when the page
    /// cannot hold any records.
    pub fn offset(&self) -> Option<usize> {
        if self.page < 1 || self.per_page == 0 {
            return None;
        }
        usize::try_from(self.page - 1)
            .ok()
            .and_then(|p| p.checked_mul(self.per_page))
    }

    /// Slice `records` down to this page.
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        match self.offset() {
            Some(start) if start < records.len() => {
                let end = start.saturating_add(self.per_page).min(records.len());
                &records[start..end]
            }
            _ => &[],
        }
    }
}

/// Return records `[(page-1)*page_size, page*page_size)`.
pub fn paginate<T>(records: &[T], page: i64, page_size: usize) -> &[T] {
    Pagination::new(page, page_size).slice(records)
}

/// Query parameters for paginated routes.
///
/// `page` is kept as raw text so that a non-integer value falls back to
/// page 1 instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_and_last_pages() {
        let records: Vec<u32> = (1..=23).collect();

        assert_eq!(paginate(&records, 1, 10), &records[0..10]);
        assert_eq!(paginate(&records, 2, 10), &records[10..20]);
        assert_eq!(paginate(&records, 3, 10), &[21, 22, 23]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let records: Vec<u32> = (1..=23).collect();

        assert!(paginate(&records, 4, 10).is_empty());
        assert!(paginate(&records, 1000, 10).is_empty());
        assert!(paginate(&records, 0, 10).is_empty());
        assert!(paginate(&records, -3, 10).is_empty());
        assert!(paginate(&records, i64::MAX, 10).is_empty());
    }

    #[test]
    fn zero_page_size_is_empty() {
        let records = [1, 2, 3];
        assert!(paginate(&records, 1, 0).is_empty());
    }

    #[test]
    fn empty_input() {
        let records: [u8; 0] = [];
        assert!(paginate(&records, 1, 10).is_empty());
    }

    #[test]
    fn page_param_defaults() {
        let params = PageParams { page: None };
        assert_eq!(params.page(), 1);

        let params = PageParams {
            page: Some("abc".into()),
        };
        assert_eq!(params.page(), 1);

        let params = PageParams {
            page: Some(" 3 ".into()),
        };
        assert_eq!(params.page(), 3);

        let params = PageParams {
            page: Some("-2".into()),
        };
        assert_eq!(params.page(), -2);
    }

    proptest! {
        #[test]
        fn pages_never_exceed_page_size(len in 0usize..200, page in -5i64..40, size in 1usize..30) {
            let records: Vec<usize> = (0..len).collect();
            prop_assert!(paginate(&records, page, size).len() <= size);
        }

        #[test]
        fn pages_concatenate_to_input(len in 0usize..200, size in 1usize..30) {
            let records: Vec<usize> = (0..len).collect();
            let mut rebuilt = Vec::new();
            let mut page = 1;
            loop {
                let chunk = paginate(&records, page, size);
                if chunk.is_empty() {
                    break;
                }
                rebuilt.extend_from_slice(chunk);
                page += 1;
            }
            prop_assert_eq!(rebuilt, records);
        }
    }
}
