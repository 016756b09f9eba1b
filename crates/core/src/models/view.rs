use serde::{Deserialize, Serialize};

use super::coin::CoinRecord;

/// Rows per page when nothing else is selected.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page sizes the dashboard offers. Any positive size is accepted by
/// [`ViewState::set_items_per_page`]; this list is for menus.
pub const PAGE_SIZE_CHOICES: [usize; 5] = [5, 10, 25, 50, 100];

/// Cap on how deep into the listing the view reaches, applied after
/// filtering and before pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankCap {
    Top10,
    Top50,
}

impl RankCap {
    /// Maximum number of filtered rows kept.
    #[must_use]
    pub fn limit(self) -> usize {
        match self {
            RankCap::Top10 => 10,
            RankCap::Top50 => 50,
        }
    }
}

impl std::fmt::Display for RankCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankCap::Top10 => write!(f, "Top 10"),
            RankCap::Top50 => write!(f, "Top 50"),
        }
    }
}

/// Filter on the sign of the 24h percent change.
///
/// `Positive` keeps strictly positive changes, `Negative` strictly
/// negative ones; an exact 0.0 only survives `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignFilter {
    All,
    Positive,
    Negative,
}

impl SignFilter {
    #[must_use]
    pub fn keeps(self, change_pct: f64) -> bool {
        match self {
            SignFilter::All => true,
            SignFilter::Positive => change_pct > 0.0,
            SignFilter::Negative => change_pct < 0.0,
        }
    }
}

impl std::fmt::Display for SignFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignFilter::All => write!(f, "all"),
            SignFilter::Positive => write!(f, "positive"),
            SignFilter::Negative => write!(f, "negative"),
        }
    }
}

/// User-chosen view configuration: search term, filters and the
/// pagination cursor.
///
/// Setters that change which rows are visible snap the cursor back to
/// page 1, so a filter change never leaves the user stranded on a page
/// past the end of the new result set. `current_page` itself is kept
/// at least 1 but is deliberately NOT clamped to the page count here;
/// the read path reports an out-of-range page as an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    search_term: String,
    rank_cap: RankCap,
    sign_filter: SignFilter,
    #[serde(deserialize_with = "at_least_one")]
    current_page: usize,
    #[serde(deserialize_with = "at_least_one")]
    items_per_page: usize,
}

/// Restored snapshots go through here, not through the setters; a zero
/// smuggled in via serde would divide the page math by zero.
fn at_least_one<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    Ok(value.max(1))
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            rank_cap: RankCap::Top50,
            sign_filter: SignFilter::All,
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Setters (visibility-changing ones reset the page) ───────────

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn set_rank_cap(&mut self, cap: RankCap) {
        self.rank_cap = cap;
        self.current_page = 1;
    }

    pub fn set_sign_filter(&mut self, filter: SignFilter) {
        self.sign_filter = filter;
        self.current_page = 1;
    }

    /// Set the page size. Zero is lifted to 1.
    pub fn set_items_per_page(&mut self, size: usize) {
        self.items_per_page = size.max(1);
        self.current_page = 1;
    }

    /// Move the cursor. Zero is lifted to 1; pages past the end are
    /// allowed and simply read back empty.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Drop the search term and filters back to defaults, keeping the
    /// page size. The cursor returns to page 1.
    pub fn clear_filters(&mut self) {
        self.search_term.clear();
        self.rank_cap = RankCap::Top50;
        self.sign_filter = SignFilter::All;
        self.current_page = 1;
    }

    // ── Getters ─────────────────────────────────────────────────────

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn rank_cap(&self) -> RankCap {
        self.rank_cap
    }

    #[must_use]
    pub fn sign_filter(&self) -> SignFilter {
        self.sign_filter
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }
}

/// Pagination figures for one computed page. Indices are 1-based and
/// inclusive, ready for a "Showing X–Y of Z" caption; an empty page
/// reports `start_index > end_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: usize,
    /// Never 0; an empty result set still has one (empty) page.
    pub total_pages: usize,
    pub items_per_page: usize,
    /// Rows surviving the filters and the rank cap, across all pages.
    pub total_items: usize,
    /// 1-based position of the first row on this page.
    pub start_index: usize,
    /// 1-based position of the last row on this page, inclusive.
    pub end_index: usize,
}

/// One page of the market view: borrowed catalog rows plus the figures
/// to render pagination controls. The core computes these on demand —
/// the frontend just renders them.
#[derive(Debug, Clone, Serialize)]
pub struct CoinPage<'a> {
    pub rows: Vec<&'a CoinRecord>,
    pub page_info: PageInfo,
}
