use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A timestamp as it may arrive in history payloads: epoch
/// milliseconds (integer or float) or an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    /// Epoch milliseconds, or None when the value can't be read as a
    /// point in time.
    fn into_millis(self) -> Option<i64> {
        match self {
            RawTimestamp::Millis(ms) => Some(ms),
            RawTimestamp::Float(f) if f.is_finite() => Some(f as i64),
            RawTimestamp::Float(_) => None,
            RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.timestamp_millis()),
        }
    }
}

/// One raw sample from a price-history response.
///
/// Upstream shapes vary: CoinGecko's `market_chart` delivers
/// `[timestamp_ms, price]` pairs, chart components pass
/// `{ "x": <timestamp>, "y": <price> }` objects. Both deserialize
/// here; [`RawPricePoint::normalize`] flattens them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPricePoint {
    /// `[timestamp_ms, price]`
    Pair(RawTimestamp, f64),
    /// `{ "x": timestamp, "y": price }`
    Point { x: RawTimestamp, y: f64 },
}

impl RawPricePoint {
    /// Flatten to a [`PricePoint`]. Returns None for samples that
    /// can't chart: unreadable timestamps, non-finite or negative
    /// prices. Malformed samples are data to skip, not errors.
    pub fn normalize(self) -> Option<PricePoint> {
        let (ts, price) = match self {
            RawPricePoint::Pair(ts, y) => (ts, y),
            RawPricePoint::Point { x, y } => (x, y),
        };
        if !price.is_finite() || price < 0.0 {
            return None;
        }
        Some(PricePoint {
            timestamp_ms: ts.into_millis()?,
            price,
        })
    }
}

/// A single normalized price sample (epoch milliseconds → price).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }

    /// UTC calendar day this sample falls on. None only for timestamps
    /// outside chrono's representable range.
    #[must_use]
    pub fn utc_day(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.timestamp_ms).map(|dt| dt.date_naive())
    }
}

/// A single data point for chart rendering, one per calendar day.
///
/// The core generates these — the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The UTC calendar day this point represents
    pub date: NaiveDate,

    /// Short axis label for the day (e.g., "Jan 5")
    pub label: String,

    /// The day's price: the latest sample observed within the day
    pub price: f64,
}

impl ChartPoint {
    pub fn for_day(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            label: date.format("%b %-d").to_string(),
            price,
        }
    }
}
