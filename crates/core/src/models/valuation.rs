use serde::{Deserialize, Serialize};

/// One holding joined against the catalog: ledger amount plus the
/// coin's current market figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    /// Catalog id of the coin (e.g., "bitcoin")
    pub id: String,

    /// Coin name from the catalog
    pub name: String,

    /// Ticker symbol from the catalog
    pub symbol: String,

    /// Logo URL, when the catalog carries one
    pub image: Option<String>,

    /// Units held
    pub amount: f64,

    /// Current price per unit in the quote currency
    pub current_price: f64,

    /// 24h price change in percent
    pub price_change_percentage_24h: f64,

    /// amount × current_price
    pub total_value: f64,
}

/// One ledger position as it appears in a valuation.
///
/// A holding whose id is missing from the current catalog surfaces as
/// `Unresolved` — visible data, never a panic and never a silent drop.
/// It contributes nothing to the totals until a listing that carries
/// the coin arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValuationRow {
    Resolved(HoldingRow),
    Unresolved { id: String, amount: f64 },
}

impl ValuationRow {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, ValuationRow::Resolved(_))
    }

    #[must_use]
    pub fn as_resolved(&self) -> Option<&HoldingRow> {
        match self {
            ValuationRow::Resolved(row) => Some(row),
            ValuationRow::Unresolved { .. } => None,
        }
    }

    /// Catalog id of the position, resolved or not.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            ValuationRow::Resolved(row) => &row.id,
            ValuationRow::Unresolved { id, .. } => id,
        }
    }
}

/// Aggregate figures across the resolved rows of a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of every resolved row's total_value
    pub total_value: f64,

    /// Portfolio value 24h ago, back-derived from each coin's 24h
    /// change percentage
    pub prior_value: f64,

    /// total_value − prior_value
    pub change_value: f64,

    /// 24h change of the whole portfolio in percent; 0.0 when there is
    /// no prior value to compare against
    pub change_percent: f64,

    /// Resolved holding with the highest 24h change percentage; the
    /// earliest such row (id-ascending) on a tie
    pub best_performer: Option<HoldingRow>,
}

impl PortfolioTotals {
    /// Totals of an empty (or fully unresolved) portfolio.
    pub fn empty() -> Self {
        Self {
            total_value: 0.0,
            prior_value: 0.0,
            change_value: 0.0,
            change_percent: 0.0,
            best_performer: None,
        }
    }
}

/// A full portfolio valuation: one row per ledger position, in
/// id-ascending order, plus the aggregate totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub rows: Vec<ValuationRow>,
    pub totals: PortfolioTotals,
}

impl PortfolioValuation {
    /// Rows that resolved against the catalog.
    pub fn resolved_rows(&self) -> impl Iterator<Item = &HoldingRow> {
        self.rows.iter().filter_map(ValuationRow::as_resolved)
    }

    /// Ids of positions the current catalog doesn't carry.
    pub fn unresolved_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(|row| match row {
            ValuationRow::Unresolved { id, .. } => Some(id.as_str()),
            ValuationRow::Resolved(_) => None,
        })
    }
}
