use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One owned position: a catalog id and how much of it is held.
///
/// Deliberately carries no price data. Prices live in the catalog and
/// the join happens at valuation time, so a stale ledger can never
/// disagree with a fresh listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    /// Catalog id of the held coin (e.g., "bitcoin")
    pub id: String,

    /// Units held; kept strictly positive by the mutation API
    pub amount: f64,
}

/// The user's holdings, keyed by catalog id.
///
/// A `BTreeMap` keeps iteration id-ascending, so valuations come out
/// in a stable order regardless of insertion history. Serializable so
/// the host app can persist it however it likes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    holdings: BTreeMap<String, HoldingRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add units of a coin. An existing position accumulates; a new id
    /// opens a position. Amount validation is the caller's job.
    pub fn add(&mut self, id: impl Into<String>, amount: f64) {
        let id = id.into();
        self.holdings
            .entry(id.clone())
            .and_modify(|h| h.amount += amount)
            .or_insert(HoldingRecord { id, amount });
    }

    /// Overwrite the amount of an existing position. Returns whether a
    /// position with this id existed; an unknown id changes nothing.
    pub fn set(&mut self, id: &str, amount: f64) -> bool {
        match self.holdings.get_mut(id) {
            Some(holding) => {
                holding.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Close a position. Returns whether one existed under this id.
    pub fn remove(&mut self, id: &str) -> bool {
        self.holdings.remove(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HoldingRecord> {
        self.holdings.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.holdings.contains_key(id)
    }

    /// Iterate holdings in id-ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &HoldingRecord> {
        self.holdings.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
