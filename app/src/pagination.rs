//! FILENAME: app/src/pagination.rs
//! PURPOSE: Page slicing of the display list.
//! CONTEXT: Group header rows count as rows, so a page may start in the
//! middle of a group.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Page sizes offered by the grid footer.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 20;

pub fn is_valid_page_size(size: usize) -> bool {
    PAGE_SIZES.contains(&size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Footer summary for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when there are no rows.
    pub start_item: usize,
    pub end_item: usize,
    pub total_items: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Pagination { page: 1, page_size }
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        total_items.div_ceil(self.page_size).max(1)
    }

    /// Page info and the slice range for `total_items` rows.
    ///
    /// Pages past the end clamp to the last page; page 0 is treated as 1.
    pub fn paginate(&self, total_items: usize) -> (PageInfo, Range<usize>) {
        let total_pages = self.total_pages(total_items);
        let page = self.page.clamp(1, total_pages);
        let start = ((page - 1) * self.page_size).min(total_items);
        let end = (start + self.page_size).min(total_items);

        let info = PageInfo {
            page,
            page_size: self.page_size,
            total_pages,
            start_item: if start < end { start + 1 } else { 0 },
            end_item: end,
            total_items,
            can_go_previous: page > 1,
            can_go_next: page < total_pages,
        };
        (info, start..end)
    }
}
