use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::time::{parse_calendar_date, DATE_KEY_FORMAT};

/// A validated `YYYY-MM-DD` ledger key.
///
/// The only ways to build one go through the date validator, so a `DateKey`
/// held anywhere in the crate is always a real calendar date inside the
/// accepted year range. Deserializing re-runs the validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    date: NaiveDate,
    key: String,
}

impl DateKey {
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        match parse_calendar_date(input) {
            Some(date) => Ok(Self {
                date,
                key: input.to_string(),
            }),
            None => Err(LedgerError::InvalidDate(input.to_string())),
        }
    }

    /// Canonical formatter: every key built from a calendar date goes through here.
    pub fn from_date(date: NaiveDate) -> Result<Self, LedgerError> {
        Self::parse(&date.format(DATE_KEY_FORMAT).to_string())
    }

    pub fn today() -> Result<Self, LedgerError> {
        Self::from_date(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn in_month(&self, prefix: &str) -> bool {
        self.key.starts_with(prefix)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl FromStr for DateKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.key)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_and_invalid() {
        assert_eq!(DateKey::parse("2025-05-23").unwrap().as_str(), "2025-05-23");
        assert_eq!(
            DateKey::parse("2025/05/23"),
            Err(LedgerError::InvalidDate("2025/05/23".to_string()))
        );
    }

    #[test]
    fn test_from_date_pads_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(DateKey::from_date(date).unwrap().to_string(), "2025-03-07");
    }

    #[test]
    fn test_from_date_rejects_out_of_range_year() {
        let date = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
        assert!(DateKey::from_date(date).is_err());
    }

    #[test]
    fn test_today_matches_local_clock() {
        let key = DateKey::today().unwrap();
        assert_eq!(DateKey::from_date(key.date()).unwrap(), key);
        assert_eq!(key.as_str(), key.date().format(DATE_KEY_FORMAT).to_string());
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let a = DateKey::parse("2025-05-31").unwrap();
        let b = DateKey::parse("2025-06-01").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_deserialize_validates() {
        let key: DateKey = serde_json::from_str("\"2024-02-29\"").unwrap();
        assert_eq!(key.as_str(), "2024-02-29");
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-02-29\"");
        assert!(serde_json::from_str::<DateKey>("\"2025-02-29\"").is_err());
    }
}
