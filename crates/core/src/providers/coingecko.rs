use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::MarketProvider;
use crate::errors::CoreError;
use crate::models::coin::CoinRecord;
use crate::models::series::RawPricePoint;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API provider for cryptocurrency market data.
///
/// - **Free tier**: works without a key; a demo key lifts the rate
///   limits and goes along as the `x_cg_demo_api_key` query parameter.
/// - **Endpoints**: `/coins/markets` (listing), `/coins/{id}/market_chart`
///   (price history).
///
/// Note: CoinGecko keys coins by lowercase ids like "bitcoin",
/// "ethereum"; those ids are what the rest of the core joins on.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_api_key(None)
    }

    pub fn with_api_key(api_key: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }

    /// Query parameters common to every request: the demo API key,
    /// when one is set.
    fn key_params(&self) -> Vec<(&'static str, String)> {
        match &self.api_key {
            Some(key) => vec![("x_cg_demo_api_key", key.clone())],
            None => Vec::new(),
        }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

/// One row of `/coins/markets`. Numeric fields arrive as `null` for
/// freshly listed or stale coins, hence the Options.
#[derive(Deserialize)]
struct MarketRow {
    id: String,
    name: String,
    symbol: String,
    image: Option<String>,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<u32>,
}

impl MarketRow {
    /// Normalize into a [`CoinRecord`]: missing numbers become 0.0,
    /// rows with garbage numbers are dropped entirely.
    fn into_record(self) -> Option<CoinRecord> {
        let current_price = self.current_price.unwrap_or(0.0);
        let change = self.price_change_percentage_24h.unwrap_or(0.0);
        let market_cap = self.market_cap.unwrap_or(0.0);
        if !current_price.is_finite() || !change.is_finite() || !market_cap.is_finite() {
            return None;
        }
        if current_price < 0.0 || market_cap < 0.0 {
            return None;
        }
        Some(CoinRecord {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            image: self.image,
            current_price,
            price_change_percentage_24h: change,
            market_cap,
            market_cap_rank: self.market_cap_rank,
        })
    }
}

#[derive(Deserialize)]
struct MarketChartResponse {
    prices: Vec<RawPricePoint>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn fetch_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CoinRecord>, CoreError> {
        let url = format!("{BASE_URL}/coins/markets");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", &per_page.to_string()),
                ("page", &page.to_string()),
                ("sparkline", "false"),
                ("price_change_percentage", "24h"),
            ])
            .query(&self.key_params())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Markets request failed with status {}", resp.status()),
            });
        }

        let rows: Vec<MarketRow> = resp.json().await.map_err(|e| CoreError::Api {
            provider: "CoinGecko".into(),
            message: format!("Failed to parse markets response: {e}"),
        })?;

        Ok(rows.into_iter().filter_map(MarketRow::into_record).collect())
    }

    async fn fetch_history(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<RawPricePoint>, CoreError> {
        let url = format!("{BASE_URL}/coins/{coin_id}/market_chart");

        let resp = self
            .client
            .get(&url)
            .query(&[("vs_currency", vs_currency), ("days", &days.to_string())])
            .query(&self.key_params())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!(
                    "History request for {coin_id} failed with status {}",
                    resp.status()
                ),
            });
        }

        let chart: MarketChartResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: "CoinGecko".into(),
            message: format!("Failed to parse history for {coin_id}: {e}"),
        })?;

        Ok(chart.prices)
    }
}
