use serde::{Serialize, Serializer};

/// Pages shown on each side of the current page.
pub const SIBLING_COUNT: u32 = 1;

/// Up to this many pages every page gets its own button.
const FULL_RANGE_MAX_PAGES: u32 = SIBLING_COUNT + 5;

/// Buttons shown at either end next to a single ellipsis: first/last page,
/// current page and its siblings, and the pages bridging to the ellipsis.
const EDGE_ITEM_COUNT: u32 = 3 + 2 * SIBLING_COUNT;

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// Inert gap marker, never a real page.
    Ellipsis,
}

impl PageItem {
    /// Wire value of [`PageItem::Ellipsis`].
    pub const ELLIPSIS_SENTINEL: i64 = -1;

    pub const fn page(&self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(*page),
            Self::Ellipsis => None,
        }
    }

    pub const fn is_clickable(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

impl Serialize for PageItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Page(page) => serializer.serialize_u32(*page),
            Self::Ellipsis => serializer.serialize_i64(Self::ELLIPSIS_SENTINEL),
        }
    }
}

/// Shape of the pagination control, decided before any item is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeLayout {
    /// `1 2 3 .. total`
    Full { total_pages: u32 },
    /// `1 2 3 4 5 … total`
    RightEllipsis { total_pages: u32 },
    /// `1 … total-4 .. total`
    LeftEllipsis { total_pages: u32 },
    /// `1 … left current right … total`
    BothEllipses {
        left_sibling: u32,
        right_sibling: u32,
        total_pages: u32,
    },
    /// Neither ellipsis applies while the range is too long to show whole.
    /// Not reachable with one sibling per side; renders nothing.
    Degenerate,
}

impl RangeLayout {
    pub fn compute(current_page: u32, total_pages: u32) -> Self {
        if total_pages <= FULL_RANGE_MAX_PAGES {
            return Self::Full { total_pages };
        }

        let left_sibling = current_page
            .saturating_sub(SIBLING_COUNT)
            .clamp(1, total_pages);
        let right_sibling = current_page
            .saturating_add(SIBLING_COUNT)
            .clamp(1, total_pages);

        let show_left_dots = left_sibling > 2;
        let show_right_dots = right_sibling <= total_pages - 2;

        match (show_left_dots, show_right_dots) {
            (false, true) => Self::RightEllipsis { total_pages },
            (true, false) => Self::LeftEllipsis { total_pages },
            (true, true) => Self::BothEllipses {
                left_sibling,
                right_sibling,
                total_pages,
            },
            (false, false) => Self::Degenerate,
        }
    }

    pub fn items(&self) -> Vec<PageItem> {
        match *self {
            Self::Full { total_pages } => (1..=total_pages).map(PageItem::Page).collect(),
            Self::RightEllipsis { total_pages } => (1..=EDGE_ITEM_COUNT)
                .map(PageItem::Page)
                .chain([PageItem::Ellipsis, PageItem::Page(total_pages)])
                .collect(),
            Self::LeftEllipsis { total_pages } => [PageItem::Page(1), PageItem::Ellipsis]
                .into_iter()
                .chain((total_pages - EDGE_ITEM_COUNT + 1..=total_pages).map(PageItem::Page))
                .collect(),
            Self::BothEllipses {
                left_sibling,
                right_sibling,
                total_pages,
            } => [PageItem::Page(1), PageItem::Ellipsis]
                .into_iter()
                .chain((left_sibling..=right_sibling).map(PageItem::Page))
                .chain([PageItem::Ellipsis, PageItem::Page(total_pages)])
                .collect(),
            Self::Degenerate => Vec::new(),
        }
    }
}

/// Page buttons for the history table, with ellipses standing in for runs of
/// hidden pages.
pub fn pagination_range(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    RangeLayout::compute(current_page, total_pages).items()
}

/// The control is hidden for a single page, an empty range or before a page
/// is selected.
pub fn should_render(range: &[PageItem], current_page: u32) -> bool {
    range.len() >= 2 && current_page != 0
}
