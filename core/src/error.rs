use thiserror::Error;

use crate::model::fruit::FruitType;
use crate::time::{MAX_VALID_YEAR, MIN_VALID_YEAR};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Invalid date format: {0}. Use YYYY-MM-DD format.")]
    InvalidDate(String),

    #[error(
        "Invalid year/month combination: {year}/{month}. Year must be between {min} and {max}, month must be between 1 and 12.",
        min = MIN_VALID_YEAR,
        max = MAX_VALID_YEAR
    )]
    InvalidYearMonth { year: i32, month: u32 },

    #[error("Unknown fruit: '{0}' (expected banana, apple or orange)")]
    UnknownFruit(String),

    #[error("Cannot log more {fruit} on {date}: the daily count is at its maximum")]
    CountLimit { date: String, fruit: FruitType },
}
