use serde::Serialize;

/// Number of table pages needed for `total_rows`. Zero when there is nothing
/// to show or no rows fit on a page.
pub fn total_pages(total_rows: u64, rows_per_page: u32) -> u32 {
    if rows_per_page == 0 {
        return 0;
    }
    u32::try_from(total_rows.div_ceil(u64::from(rows_per_page))).unwrap_or(u32::MAX)
}

/// Offset and size of the rows backing one page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub skip: u64,
    pub first: u32,
}

impl PageWindow {
    pub fn for_page(page: u32, rows_per_page: u32) -> Self {
        Self {
            skip: u64::from(page.saturating_sub(1)) * u64::from(rows_per_page),
            first: rows_per_page,
        }
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.skip).map_or(rows.len(), |skip| skip.min(rows.len()));
        let end = start.saturating_add(self.first as usize).min(rows.len());
        &rows[start..end]
    }
}
