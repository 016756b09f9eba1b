use crate::models::catalog::Catalog;
use crate::models::ledger::Ledger;
use crate::models::valuation::{
    HoldingRow, PortfolioTotals, PortfolioValuation, ValuationRow,
};

/// Values the user's holdings against the current catalog.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Join every ledger position against the catalog and total the
    /// result.
    ///
    /// Rows come out in ledger order (id-ascending). Positions the
    /// catalog doesn't carry become `Unresolved` rows and contribute
    /// nothing to the totals. For each resolved row:
    /// - total_value = amount × current_price
    /// - prior_value = total_value / (1 + change_pct / 100), the
    ///   holding's value 24h ago
    ///
    /// A change at or below −100% (or a non-finite one) zeroes the
    /// row's prior-value contribution: the current value carries no
    /// information about yesterday once the divisor hits zero or flips
    /// sign. The portfolio-wide change percentage is reported only
    /// when there is a positive prior value to compare against.
    pub fn compute_portfolio(&self, ledger: &Ledger, catalog: &Catalog) -> PortfolioValuation {
        let mut rows = Vec::with_capacity(ledger.len());
        let mut total_value = 0.0;
        let mut prior_value = 0.0;
        let mut best: Option<HoldingRow> = None;

        for holding in ledger.iter() {
            let Some(coin) = catalog.get(&holding.id) else {
                rows.push(ValuationRow::Unresolved {
                    id: holding.id.clone(),
                    amount: holding.amount,
                });
                continue;
            };

            let row = HoldingRow {
                id: coin.id.clone(),
                name: coin.name.clone(),
                symbol: coin.symbol.clone(),
                image: coin.image.clone(),
                amount: holding.amount,
                current_price: coin.current_price,
                price_change_percentage_24h: coin.price_change_percentage_24h,
                total_value: holding.amount * coin.current_price,
            };

            total_value += row.total_value;
            prior_value += prior_row_value(row.total_value, row.price_change_percentage_24h);

            // Strict greater-than: the first row of a tie stays best.
            let beats = best.as_ref().is_none_or(|b| {
                row.price_change_percentage_24h > b.price_change_percentage_24h
            });
            if beats {
                best = Some(row.clone());
            }

            rows.push(ValuationRow::Resolved(row));
        }

        let change_value = total_value - prior_value;
        let change_percent = if prior_value > 0.0 {
            change_value / prior_value * 100.0
        } else {
            0.0
        };

        PortfolioValuation {
            rows,
            totals: PortfolioTotals {
                total_value,
                prior_value,
                change_value,
                change_percent,
                best_performer: best,
            },
        }
    }
}

/// What this holding was worth 24h ago, back-derived from its change
/// percentage. At or below −100% the divisor is zero or negative and
/// yesterday's value is unrecoverable; the holding then contributes 0.
fn prior_row_value(total_value: f64, change_pct: f64) -> f64 {
    if !change_pct.is_finite() || change_pct <= -100.0 {
        return 0.0;
    }
    total_value / (1.0 + change_pct / 100.0)
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
