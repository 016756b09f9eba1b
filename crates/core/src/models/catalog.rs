use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::coin::CoinRecord;

/// Fetch lifecycle phase of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogStatus {
    /// No fetch in flight; whatever data is present is usable
    Idle,
    /// A refresh has been started and not yet resolved
    Loading,
    /// The most recent refresh failed; prior data (if any) is still present
    Error,
}

impl std::fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogStatus::Idle => write!(f, "idle"),
            CatalogStatus::Loading => write!(f, "loading"),
            CatalogStatus::Error => write!(f, "error"),
        }
    }
}

impl Default for CatalogStatus {
    fn default() -> Self {
        CatalogStatus::Idle
    }
}

/// Token identifying one refresh request against the catalog.
///
/// Minted by [`Catalog::mark_loading`]; [`Catalog::replace_all`] and
/// [`Catalog::mark_error`] only apply when handed the most recently
/// minted token. A response that raced with a newer request is thereby
/// discarded instead of clobbering newer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchSeq(u64);

/// Normalized snapshot of the market listing.
///
/// Records live in an id-keyed map; `ids` preserves upstream listing
/// order (market-cap descending as delivered) for iteration. Every id
/// in `ids` resolves in the map, every entry in the map appears in
/// `ids` exactly once.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: HashMap<String, CoinRecord>,
    ids: Vec<String>,
    status: CatalogStatus,
    error: Option<String>,
    /// Sequence number of the most recently minted fetch token.
    issued_seq: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Fetch lifecycle ─────────────────────────────────────────────

    /// Begin a refresh: flips status to `Loading`, clears any prior
    /// error, and mints the token the eventual response must present.
    /// Existing records stay visible while the fetch is in flight.
    pub fn mark_loading(&mut self) -> FetchSeq {
        self.issued_seq += 1;
        self.status = CatalogStatus::Loading;
        self.error = None;
        FetchSeq(self.issued_seq)
    }

    /// Replace the entire catalog with a fresh listing.
    ///
    /// Applies only when `seq` is the most recently minted token;
    /// returns whether it applied. A stale token leaves the catalog
    /// untouched. On apply, status returns to `Idle` and the error
    /// clears. If one payload carries an id twice, the later record
    /// wins the entry while the id keeps its first position.
    pub fn replace_all(&mut self, seq: FetchSeq, records: Vec<CoinRecord>) -> bool {
        if seq.0 != self.issued_seq {
            return false;
        }
        self.entities.clear();
        self.ids.clear();
        self.entities.reserve(records.len());
        for record in records {
            if !self.entities.contains_key(&record.id) {
                self.ids.push(record.id.clone());
            }
            self.entities.insert(record.id.clone(), record);
        }
        self.status = CatalogStatus::Idle;
        self.error = None;
        true
    }

    /// Record a failed refresh. Applies only when `seq` is the most
    /// recently minted token; returns whether it applied. Existing
    /// records are left untouched either way.
    pub fn mark_error(&mut self, seq: FetchSeq, message: impl Into<String>) -> bool {
        if seq.0 != self.issued_seq {
            return false;
        }
        self.status = CatalogStatus::Error;
        self.error = Some(message.into());
        true
    }

    // ── Lookups ─────────────────────────────────────────────────────

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CoinRecord> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Iterate records in upstream listing order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &CoinRecord> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Ids in upstream listing order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Message from the most recent failed refresh, if the catalog is
    /// currently in the `Error` phase.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
