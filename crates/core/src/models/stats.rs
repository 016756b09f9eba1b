use serde::{Deserialize, Serialize};

/// Headline figures over the whole loaded catalog, unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Sum of market caps across every loaded coin
    pub total_market_cap: f64,

    /// Mean of the 24h change percentages; 0.0 for an empty catalog
    pub average_change_24h: f64,

    /// Bitcoin's market cap as a percentage of the total; 0.0 when
    /// bitcoin isn't loaded or the total is zero
    pub btc_dominance: f64,
}
