use serde::{Deserialize, Serialize};

/// One coin row from a market listing, normalized for the core.
///
/// `id` is the upstream catalog identifier (e.g., "bitcoin") and is the
/// key everything else joins on — holdings, chart requests, lookups.
/// `symbol` is the short ticker (e.g., "btc") and is NOT unique upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Upstream identifier, unique within a catalog (e.g., "bitcoin")
    pub id: String,

    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol as delivered upstream, typically lowercase (e.g., "btc")
    pub symbol: String,

    /// Logo URL, when the listing carries one
    #[serde(default)]
    pub image: Option<String>,

    /// Latest price in the quote currency
    #[serde(default)]
    pub current_price: f64,

    /// 24h price change in percent (e.g., -3.2 means down 3.2%)
    #[serde(default)]
    pub price_change_percentage_24h: f64,

    /// Market capitalization in the quote currency
    #[serde(default)]
    pub market_cap: f64,

    /// Rank by market cap, when the listing carries one (1 = largest)
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

impl CoinRecord {
    /// Create a record with the identifying fields set and all market
    /// figures zeroed. Callers fill in prices as they have them.
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            image: None,
            current_price: 0.0,
            price_change_percentage_24h: 0.0,
            market_cap: 0.0,
            market_cap_rank: None,
        }
    }

    /// Case-insensitive substring match against name or symbol.
    /// An empty needle matches everything.
    #[must_use]
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
            || self.symbol.to_lowercase().contains(needle_lowercase)
    }
}
