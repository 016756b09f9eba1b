use serde::{Deserialize, Serialize};

/// User-configurable settings. The core keeps them in memory; the host
/// app persists them if it wants them back next launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Quote currency for every price and valuation (e.g., "usd").
    /// Lowercase, as the upstream API expects it.
    pub vs_currency: String,

    /// How many coins a catalog refresh asks for.
    pub market_page_size: u32,

    /// History window requested for charts, in days.
    pub chart_days: u32,

    /// Optional upstream API key; travels as a query parameter.
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            market_page_size: 100,
            chart_days: 7,
            api_key: None,
        }
    }
}
