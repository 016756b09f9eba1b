// ═══════════════════════════════════════════════════════════════════
// Catalog Tests — replace/loading/error lifecycle, fetch tokens,
// normalized id/entity invariants
// ═══════════════════════════════════════════════════════════════════

use coin_tracker_core::models::catalog::{Catalog, CatalogStatus};
use coin_tracker_core::models::coin::CoinRecord;

fn coin(id: &str, name: &str, symbol: &str, price: f64) -> CoinRecord {
    let mut c = CoinRecord::new(id, name, symbol);
    c.current_price = price;
    c
}

fn listing() -> Vec<CoinRecord> {
    vec![
        coin("bitcoin", "Bitcoin", "btc", 94000.0),
        coin("ethereum", "Ethereum", "eth", 3300.0),
        coin("solana", "Solana", "sol", 210.0),
    ]
}

// ═══════════════════════════════════════════════════════════════════
//  Initial state
// ═══════════════════════════════════════════════════════════════════

mod initial_state {
    use super::*;

    #[test]
    fn new_catalog_is_empty_and_idle() {
        let c = Catalog::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert_eq!(c.status(), CatalogStatus::Idle);
        assert_eq!(c.error_message(), None);
    }

    #[test]
    fn default_matches_new() {
        let c = Catalog::default();
        assert!(c.is_empty());
        assert_eq!(c.status(), CatalogStatus::Idle);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  replace_all
// ═══════════════════════════════════════════════════════════════════

mod replace_all {
    use super::*;

    #[test]
    fn loads_records_and_returns_to_idle() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        assert!(c.replace_all(seq, listing()));

        assert_eq!(c.len(), 3);
        assert_eq!(c.status(), CatalogStatus::Idle);
        assert_eq!(c.error_message(), None);
        assert_eq!(c.get("ethereum").unwrap().current_price, 3300.0);
    }

    #[test]
    fn preserves_upstream_order() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        assert_eq!(c.ids(), &["bitcoin", "ethereum", "solana"]);
        let names: Vec<&str> = c.iter_ordered().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bitcoin", "Ethereum", "Solana"]);
    }

    #[test]
    fn replaces_wholesale_not_merging() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        let seq = c.mark_loading();
        c.replace_all(seq, vec![coin("dogecoin", "Dogecoin", "doge", 0.3)]);

        assert_eq!(c.len(), 1);
        assert!(c.get("bitcoin").is_none());
        assert!(c.contains("dogecoin"));
    }

    #[test]
    fn empty_listing_empties_the_catalog() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        let seq = c.mark_loading();
        assert!(c.replace_all(seq, Vec::new()));
        assert!(c.is_empty());
        assert_eq!(c.status(), CatalogStatus::Idle);
    }

    #[test]
    fn duplicate_id_keeps_first_position_and_last_record() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(
            seq,
            vec![
                coin("bitcoin", "Bitcoin", "btc", 94000.0),
                coin("ethereum", "Ethereum", "eth", 3300.0),
                coin("bitcoin", "Bitcoin (revised)", "btc", 95000.0),
            ],
        );

        assert_eq!(c.len(), 2);
        assert_eq!(c.ids(), &["bitcoin", "ethereum"]);
        let btc = c.get("bitcoin").unwrap();
        assert_eq!(btc.name, "Bitcoin (revised)");
        assert_eq!(btc.current_price, 95000.0);
    }

    #[test]
    fn every_id_resolves_to_an_entity() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        for id in c.ids() {
            assert!(c.get(id).is_some(), "id {id} has no entity");
        }
        assert_eq!(c.iter_ordered().count(), c.ids().len());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Loading phase
// ═══════════════════════════════════════════════════════════════════

mod loading {
    use super::*;

    #[test]
    fn mark_loading_flips_status() {
        let mut c = Catalog::new();
        c.mark_loading();
        assert_eq!(c.status(), CatalogStatus::Loading);
    }

    #[test]
    fn previous_records_stay_visible_while_loading() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        c.mark_loading();
        assert_eq!(c.status(), CatalogStatus::Loading);
        assert_eq!(c.len(), 3);
        assert!(c.contains("bitcoin"));
    }

    #[test]
    fn mark_loading_clears_prior_error() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.mark_error(seq, "rate limited");
        assert_eq!(c.status(), CatalogStatus::Error);

        c.mark_loading();
        assert_eq!(c.status(), CatalogStatus::Loading);
        assert_eq!(c.error_message(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  mark_error
// ═══════════════════════════════════════════════════════════════════

mod mark_error {
    use super::*;

    #[test]
    fn records_the_failure() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        assert!(c.mark_error(seq, "HTTP 429"));

        assert_eq!(c.status(), CatalogStatus::Error);
        assert_eq!(c.error_message(), Some("HTTP 429"));
    }

    #[test]
    fn keeps_previous_records() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        let seq = c.mark_loading();
        c.mark_error(seq, "connection refused");

        assert_eq!(c.len(), 3);
        assert!(c.contains("solana"));
        assert_eq!(c.status(), CatalogStatus::Error);
    }

    #[test]
    fn successful_replace_clears_the_error() {
        let mut c = Catalog::new();
        let seq = c.mark_loading();
        c.mark_error(seq, "boom");

        let seq = c.mark_loading();
        c.replace_all(seq, listing());

        assert_eq!(c.status(), CatalogStatus::Idle);
        assert_eq!(c.error_message(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Fetch tokens — stale responses are discarded
// ═══════════════════════════════════════════════════════════════════

mod fetch_tokens {
    use super::*;

    #[test]
    fn stale_replace_is_discarded() {
        let mut c = Catalog::new();
        let old_seq = c.mark_loading();
        let new_seq = c.mark_loading();

        // The older request resolves after the newer one started.
        assert!(!c.replace_all(old_seq, vec![coin("stale", "Stale", "stl", 1.0)]));
        assert!(c.is_empty());
        assert_eq!(c.status(), CatalogStatus::Loading);

        assert!(c.replace_all(new_seq, listing()));
        assert_eq!(c.len(), 3);
        assert_eq!(c.status(), CatalogStatus::Idle);
    }

    #[test]
    fn stale_replace_does_not_clobber_newer_data() {
        let mut c = Catalog::new();
        let old_seq = c.mark_loading();

        let new_seq = c.mark_loading();
        c.replace_all(new_seq, listing());

        // Old response arrives last; the newer listing must survive.
        assert!(!c.replace_all(old_seq, vec![coin("stale", "Stale", "stl", 1.0)]));
        assert_eq!(c.len(), 3);
        assert!(c.contains("bitcoin"));
        assert!(!c.contains("stale"));
        assert_eq!(c.status(), CatalogStatus::Idle);
    }

    #[test]
    fn stale_error_is_discarded() {
        let mut c = Catalog::new();
        let old_seq = c.mark_loading();
        let new_seq = c.mark_loading();

        assert!(!c.mark_error(old_seq, "slow request finally failed"));
        assert_eq!(c.status(), CatalogStatus::Loading);
        assert_eq!(c.error_message(), None);

        assert!(c.replace_all(new_seq, listing()));
        assert_eq!(c.status(), CatalogStatus::Idle);
    }

    #[test]
    fn stale_error_does_not_mask_newer_success() {
        let mut c = Catalog::new();
        let old_seq = c.mark_loading();

        let new_seq = c.mark_loading();
        c.replace_all(new_seq, listing());

        assert!(!c.mark_error(old_seq, "too late"));
        assert_eq!(c.status(), CatalogStatus::Idle);
        assert_eq!(c.error_message(), None);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn latest_token_still_applies_after_older_ones_lapse() {
        let mut c = Catalog::new();
        let _a = c.mark_loading();
        let _b = c.mark_loading();
        let current = c.mark_loading();

        assert!(c.replace_all(current, listing()));
        assert_eq!(c.len(), 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CatalogStatus
// ═══════════════════════════════════════════════════════════════════

mod status_display {
    use super::*;

    #[test]
    fn display_strings() {
        assert_eq!(CatalogStatus::Idle.to_string(), "idle");
        assert_eq!(CatalogStatus::Loading.to_string(), "loading");
        assert_eq!(CatalogStatus::Error.to_string(), "error");
    }

    #[test]
    fn serde_roundtrip() {
        for status in [
            CatalogStatus::Idle,
            CatalogStatus::Loading,
            CatalogStatus::Error,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: CatalogStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, back);
        }
    }
}
