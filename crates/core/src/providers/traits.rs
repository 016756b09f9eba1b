use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::coin::CoinRecord;
use crate::models::series::RawPricePoint;

/// Trait abstraction for market data sources (SOLID: Dependency Inversion).
///
/// The shipped implementation talks to CoinGecko. If that API stops
/// working or changes, we replace only that one implementation — the
/// rest of the codebase is untouched. Tests swap in mocks through the
/// same seam.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch one page of the market listing, largest market cap first,
    /// quoted in `vs_currency`.
    async fn fetch_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CoinRecord>, CoreError>;

    /// Fetch price history for one coin over the trailing `days` days.
    /// Returns raw samples; shaping them into a chart is the caller's
    /// job.
    async fn fetch_history(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<RawPricePoint>, CoreError>;
}
