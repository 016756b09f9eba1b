pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    catalog::{Catalog, CatalogStatus},
    coin::CoinRecord,
    ledger::Ledger,
    series::ChartPoint,
    settings::Settings,
    stats::MarketStats,
    valuation::PortfolioValuation,
    view::{CoinPage, RankCap, SignFilter, ViewState},
};
use providers::{coingecko::CoinGeckoProvider, traits::MarketProvider};
use services::{
    chart_service::ChartService, portfolio_service::PortfolioService, view_service::ViewService,
};

use errors::CoreError;

/// Most coins one catalog refresh may request (upstream page-size cap).
const MAX_MARKET_PAGE_SIZE: u32 = 250;

/// Longest history window a chart may request, in days.
const MAX_CHART_WINDOW_DAYS: u32 = 365;

/// Main entry point for the Coin Tracker core library.
/// Holds the catalog, view state, ledger and settings, plus the
/// services and the market data provider that operate on them.
#[must_use]
pub struct CoinTracker {
    catalog: Catalog,
    view: ViewState,
    ledger: Ledger,
    settings: Settings,
    view_service: ViewService,
    chart_service: ChartService,
    portfolio_service: PortfolioService,
    provider: Box<dyn MarketProvider>,
}

impl std::fmt::Debug for CoinTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinTracker")
            .field("coins", &self.catalog.len())
            .field("status", &self.catalog.status())
            .field("holdings", &self.ledger.len())
            .field("settings", &self.settings)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl CoinTracker {
    /// Create a tracker with default settings and the CoinGecko
    /// provider. The catalog starts empty; call
    /// [`refresh_catalog`](Self::refresh_catalog) to load it.
    pub fn new() -> Self {
        let settings = Settings::default();
        let provider = Box::new(CoinGeckoProvider::with_api_key(settings.api_key.clone()));
        Self::build(settings, provider)
    }

    /// Create a tracker with the given settings and the CoinGecko
    /// provider (carrying the settings' API key, if any).
    pub fn with_settings(settings: Settings) -> Self {
        let provider = Box::new(CoinGeckoProvider::with_api_key(settings.api_key.clone()));
        Self::build(settings, provider)
    }

    /// Create a tracker around a custom market data provider. Tests
    /// inject mocks here; everything downstream of the fetch is
    /// provider-agnostic.
    pub fn with_provider(provider: Box<dyn MarketProvider>) -> Self {
        Self::build(Settings::default(), provider)
    }

    // ── Catalog Refresh ─────────────────────────────────────────────

    /// Fetch a fresh market listing and replace the catalog with it.
    ///
    /// The catalog shows `Loading` while the fetch is in flight and
    /// keeps serving the previous listing. On success the listing is
    /// swapped wholesale and the count of loaded coins is returned; on
    /// failure the previous listing stays and the catalog reports the
    /// error. A response that lost a race to a newer refresh is
    /// discarded and counts as 0.
    pub async fn refresh_catalog(&mut self) -> Result<usize, CoreError> {
        let seq = self.catalog.mark_loading();
        let vs_currency = self.settings.vs_currency.clone();
        let per_page = self.settings.market_page_size;

        log::debug!("refreshing catalog: {per_page} coins in {vs_currency}");
        match self.provider.fetch_markets(&vs_currency, per_page, 1).await {
            Ok(records) => {
                let count = records.len();
                if self.catalog.replace_all(seq, records) {
                    log::debug!("catalog replaced: {count} coins");
                    Ok(count)
                } else {
                    log::debug!("discarding market listing that lost a refresh race");
                    Ok(0)
                }
            }
            Err(e) => {
                log::warn!("catalog refresh failed: {e}");
                self.catalog.mark_error(seq, e.to_string());
                Err(e)
            }
        }
    }

    /// Current fetch phase of the catalog.
    #[must_use]
    pub fn catalog_status(&self) -> CatalogStatus {
        self.catalog.status()
    }

    /// The loaded catalog, for direct lookups and iteration.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up one loaded coin by its catalog id.
    #[must_use]
    pub fn coin(&self, id: &str) -> Option<&CoinRecord> {
        self.catalog.get(id)
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Set the search term and, when nothing loaded matches it, fall
    /// back to fetching a fresh listing through the same full-replace
    /// path as [`refresh_catalog`](Self::refresh_catalog).
    ///
    /// Returns whether the catalog holds a match after the call. An
    /// empty term just clears the search.
    pub async fn search_catalog(&mut self, term: &str) -> Result<bool, CoreError> {
        self.view.set_search_term(term);
        if term.is_empty() {
            return Ok(true);
        }
        if self.has_local_match(term) {
            return Ok(true);
        }

        log::debug!("no local match for '{term}', fetching fresh listing");
        let seq = self.catalog.mark_loading();
        let vs_currency = self.settings.vs_currency.clone();
        let per_page = self.settings.market_page_size;
        match self.provider.fetch_markets(&vs_currency, per_page, 1).await {
            Ok(records) => {
                self.catalog.replace_all(seq, records);
            }
            Err(e) => {
                log::warn!("search fallback fetch failed: {e}");
                self.catalog.mark_error(seq, e.to_string());
                return Err(e);
            }
        }

        Ok(self.has_local_match(term))
    }

    fn has_local_match(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.catalog.iter_ordered().any(|coin| coin.matches(&needle))
    }

    // ── View State ──────────────────────────────────────────────────

    /// Set the search term without any remote fallback.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term);
    }

    pub fn set_rank_cap(&mut self, cap: RankCap) {
        self.view.set_rank_cap(cap);
    }

    pub fn set_sign_filter(&mut self, filter: SignFilter) {
        self.view.set_sign_filter(filter);
    }

    pub fn set_items_per_page(&mut self, size: usize) {
        self.view.set_items_per_page(size);
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.view.set_current_page(page);
    }

    /// Reset search and filters to defaults, keeping the page size.
    pub fn clear_filters(&mut self) {
        self.view.clear_filters();
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    // ── Market Reads ────────────────────────────────────────────────

    /// The page of coins the current view state selects. Recomputed
    /// from the catalog on every call; reading never mutates anything.
    #[must_use]
    pub fn market_view(&self) -> CoinPage<'_> {
        self.view_service.compute_view(&self.catalog, &self.view)
    }

    /// Headline stats over the whole loaded catalog, unfiltered.
    #[must_use]
    pub fn market_stats(&self) -> MarketStats {
        self.view_service.market_stats(&self.catalog)
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add units of a coin to the ledger. An existing position
    /// accumulates. The coin doesn't have to be in the catalog; an
    /// unlisted position values as `Unresolved` until a listing
    /// carries it.
    pub fn add_holding(&mut self, id: &str, amount: f64) -> Result<(), CoreError> {
        Self::validate_amount(amount)?;
        self.ledger.add(id, amount);
        Ok(())
    }

    /// Overwrite the amount of an existing position. Returns whether a
    /// position with this id existed; an unknown id changes nothing.
    pub fn set_holding_amount(&mut self, id: &str, amount: f64) -> Result<bool, CoreError> {
        Self::validate_amount(amount)?;
        Ok(self.ledger.set(id, amount))
    }

    /// Close a position. Returns whether one existed under this id.
    pub fn remove_holding(&mut self, id: &str) -> bool {
        self.ledger.remove(id)
    }

    /// The ledger of holdings, for direct inspection.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Value every holding against the current catalog. Recomputed on
    /// every call, so it always reflects the latest listing.
    #[must_use]
    pub fn portfolio(&self) -> PortfolioValuation {
        self.portfolio_service
            .compute_portfolio(&self.ledger, &self.catalog)
    }

    fn validate_amount(amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Holding amount must be a positive number, got {amount}"
            )));
        }
        Ok(())
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Fetch price history for one coin and shape it into at most one
    /// chart point per day (see
    /// [`ChartService::bucketize_daily`](services::chart_service::ChartService::bucketize_daily)).
    ///
    /// A coin with no history yields an empty chart, not an error.
    pub async fn load_chart(&self, coin_id: &str) -> Result<Vec<ChartPoint>, CoreError> {
        if coin_id.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Chart requires a coin id".to_string(),
            ));
        }

        let raw = self
            .provider
            .fetch_history(coin_id, &self.settings.vs_currency, self.settings.chart_days)
            .await?;
        log::debug!("loaded {} raw history samples for {coin_id}", raw.len());
        Ok(self.chart_service.daily_chart(raw))
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the quote currency (e.g., "usd", "eur", "pln").
    /// Currency code must be a 3-letter alphabetic string; it is
    /// stored lowercase, the way the upstream API expects it.
    pub fn set_vs_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_lowercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., usd, eur, pln)"
            )));
        }
        self.settings.vs_currency = trimmed;
        Ok(())
    }

    /// Set how many coins a catalog refresh asks for (1 to
    /// `MAX_MARKET_PAGE_SIZE`).
    pub fn set_market_page_size(&mut self, size: u32) -> Result<(), CoreError> {
        if size == 0 || size > MAX_MARKET_PAGE_SIZE {
            return Err(CoreError::ValidationError(format!(
                "Market page size {size} is outside 1..={MAX_MARKET_PAGE_SIZE}"
            )));
        }
        self.settings.market_page_size = size;
        Ok(())
    }

    /// Set the history window charts request, in days (1 to
    /// `MAX_CHART_WINDOW_DAYS`).
    pub fn set_chart_days(&mut self, days: u32) -> Result<(), CoreError> {
        if days == 0 || days > MAX_CHART_WINDOW_DAYS {
            return Err(CoreError::ValidationError(format!(
                "Chart window of {days} days is outside 1..={MAX_CHART_WINDOW_DAYS}"
            )));
        }
        self.settings.chart_days = days;
        Ok(())
    }

    /// Set or clear the upstream API key.
    /// Rebuilds the CoinGecko provider so the new key takes effect
    /// immediately.
    pub fn set_api_key(&mut self, key: Option<String>) {
        self.settings.api_key = key;
        self.provider = Box::new(CoinGeckoProvider::with_api_key(self.settings.api_key.clone()));
    }

    /// Get current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, provider: Box<dyn MarketProvider>) -> Self {
        Self {
            catalog: Catalog::new(),
            view: ViewState::new(),
            ledger: Ledger::new(),
            settings,
            view_service: ViewService::new(),
            chart_service: ChartService::new(),
            portfolio_service: PortfolioService::new(),
            provider,
        }
    }
}

impl Default for CoinTracker {
    fn default() -> Self {
        Self::new()
    }
}
