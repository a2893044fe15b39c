pub mod date_key;
pub mod fruit;
pub mod ledger;
pub mod stats;
