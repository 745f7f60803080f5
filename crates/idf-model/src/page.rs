//! Pagination window handed to backends.

use serde::{Deserialize, Serialize};

/// A validated pagination window.
///
/// `limit == None` means the caller asked for every entry from `offset` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Number of entries to skip.
    pub offset: usize,
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}

impl Page {
    /// Creates a bounded page.
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }

    /// Creates a page without an upper bound.
    #[must_use]
    pub const fn unbounded(offset: usize) -> Self {
        Self {
            offset,
            limit: None,
        }
    }

    /// Applies the window to an iterator.
    pub fn apply<I: IntoIterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
    }
}
