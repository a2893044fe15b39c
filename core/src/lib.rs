pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::Config;
pub use error::LedgerError;
pub use model::date_key::DateKey;
pub use model::fruit::{DailyCount, FruitType};
pub use model::ledger::Ledger;
pub use model::stats::MonthlyStats;
pub use repository::{FileLedgerRepository, LedgerRepository, MemoryLedgerRepository};
pub use service::dto::{CalendarDay, CalendarMonth};
pub use service::ledger_service::LedgerService;
pub use time::{is_valid_date, is_valid_year_month, parse_human_date, MAX_VALID_YEAR, MIN_VALID_YEAR};
