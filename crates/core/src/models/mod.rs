pub mod catalog;
pub mod coin;
pub mod ledger;
pub mod series;
pub mod settings;
pub mod stats;
pub mod valuation;
pub mod view;
