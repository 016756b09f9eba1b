use crate::models::catalog::Catalog;
use crate::models::stats::MarketStats;
use crate::models::view::{CoinPage, PageInfo, ViewState};

/// Computes the market view: search, filters, rank cap and pagination
/// over the catalog.
///
/// Pure reads — same catalog and view state in, same page out. The
/// core computes, the frontend renders.
pub struct ViewService;

impl ViewService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the page the current view state selects.
    ///
    /// Pipeline, in order:
    /// 1. Start from the catalog in upstream listing order
    /// 2. Search: keep rows whose name or symbol contains the term
    ///    (case-insensitive); an empty term keeps everything
    /// 3. Sign filter on the 24h change percentage
    /// 4. Truncate to the rank cap
    /// 5. Slice out the current page
    ///
    /// The stored page is honored as-is: a cursor past the end yields
    /// an empty `rows`, never a silent correction. `total_pages` is at
    /// least 1 so pagination controls always have a page to show.
    pub fn compute_view<'a>(&self, catalog: &'a Catalog, view: &ViewState) -> CoinPage<'a> {
        let mut filtered: Vec<_> = catalog.iter_ordered().collect();

        if !view.search_term().is_empty() {
            let needle = view.search_term().to_lowercase();
            filtered.retain(|coin| coin.matches(&needle));
        }

        let sign = view.sign_filter();
        filtered.retain(|coin| sign.keeps(coin.price_change_percentage_24h));

        filtered.truncate(view.rank_cap().limit());

        let total_items = filtered.len();
        let items_per_page = view.items_per_page();
        let total_pages = total_items.div_ceil(items_per_page).max(1);
        let current_page = view.current_page();

        let start = (current_page - 1).saturating_mul(items_per_page);
        let rows: Vec<_> = filtered
            .into_iter()
            .skip(start)
            .take(items_per_page)
            .collect();

        CoinPage {
            page_info: PageInfo {
                current_page,
                total_pages,
                items_per_page,
                total_items,
                start_index: start + 1,
                end_index: (start + rows.len()).min(total_items),
            },
            rows,
        }
    }

    /// Headline stats over every loaded coin, ignoring the view's
    /// search and filters.
    pub fn market_stats(&self, catalog: &Catalog) -> MarketStats {
        let total_market_cap: f64 = catalog.iter_ordered().map(|c| c.market_cap).sum();

        let average_change_24h = if catalog.is_empty() {
            0.0
        } else {
            let sum: f64 = catalog
                .iter_ordered()
                .map(|c| c.price_change_percentage_24h)
                .sum();
            sum / catalog.len() as f64
        };

        let btc_dominance = catalog
            .iter_ordered()
            .find(|c| c.symbol.eq_ignore_ascii_case("btc"))
            .filter(|_| total_market_cap > 0.0)
            .map_or(0.0, |btc| btc.market_cap / total_market_cap * 100.0);

        MarketStats {
            total_market_cap,
            average_change_24h,
            btc_dominance,
        }
    }
}

impl Default for ViewService {
    fn default() -> Self {
        Self::new()
    }
}
