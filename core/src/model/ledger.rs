use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::date_key::DateKey;
use crate::model::fruit::{DailyCount, FruitType};

/// Sparse mapping from date to fruit counts.
///
/// The map sits behind an `Arc` and is never edited in place: every change
/// builds a new map and returns a new `Ledger`, so clones handed out earlier
/// keep seeing the state they were taken from. Cloning a `Ledger` is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Arc<BTreeMap<DateKey, DailyCount>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &DateKey) -> Option<&DailyCount> {
        self.entries.get(date)
    }

    /// Counts for `date`, zero when the day has no entry.
    pub fn counts_for(&self, date: &DateKey) -> DailyCount {
        self.entries.get(date).copied().unwrap_or_default()
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.entries.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &DailyCount)> {
        self.entries.iter()
    }

    /// `None` when the count for `fruit` on `date` cannot grow any further.
    pub fn with_added(&self, date: &DateKey, fruit: FruitType) -> Option<Ledger> {
        let counts = self.counts_for(date).incremented(fruit)?;
        let mut next = (*self.entries).clone();
        next.insert(date.clone(), counts);
        Some(Ledger { entries: Arc::new(next) })
    }

    /// `None` when there is nothing to remove: no entry for `date`, or the
    /// count for `fruit` is already zero. Emptied entries are kept.
    pub fn with_removed(&self, date: &DateKey, fruit: FruitType) -> Option<Ledger> {
        let counts = self.entries.get(date)?.decremented(fruit)?;
        let mut next = (*self.entries).clone();
        next.insert(date.clone(), counts);
        Some(Ledger { entries: Arc::new(next) })
    }
}

impl From<BTreeMap<DateKey, DailyCount>> for Ledger {
    fn from(entries: BTreeMap<DateKey, DailyCount>) -> Self {
        Self { entries: Arc::new(entries) }
    }
}

impl Serialize for Ledger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<DateKey, DailyCount>::deserialize(deserializer).map(Ledger::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_with_added_creates_entry_lazily() {
        let ledger = Ledger::new();
        assert!(!ledger.contains(&key("2025-05-23")));

        let ledger = ledger.with_added(&key("2025-05-23"), FruitType::Orange).unwrap();
        assert_eq!(
            ledger.get(&key("2025-05-23")),
            Some(&DailyCount { banana: 0, apple: 0, orange: 1 })
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_earlier_clones_are_not_affected() {
        let before = Ledger::new().with_added(&key("2025-05-23"), FruitType::Banana).unwrap();
        let held = before.clone();

        let after = before.with_added(&key("2025-05-23"), FruitType::Banana).unwrap();

        assert_eq!(held.counts_for(&key("2025-05-23")).banana, 1);
        assert_eq!(after.counts_for(&key("2025-05-23")).banana, 2);
    }

    #[test]
    fn test_with_added_refuses_to_wrap() {
        let full: BTreeMap<DateKey, DailyCount> = [(
            key("2025-05-23"),
            DailyCount { banana: u32::MAX, apple: 0, orange: 0 },
        )]
        .into_iter()
        .collect();
        let ledger = Ledger::from(full);

        assert!(ledger.with_added(&key("2025-05-23"), FruitType::Banana).is_none());
        let next = ledger.with_added(&key("2025-05-23"), FruitType::Apple).unwrap();
        assert_eq!(next.counts_for(&key("2025-05-23")).apple, 1);
        assert_eq!(ledger.counts_for(&key("2025-05-23")).banana, u32::MAX);
    }

    #[test]
    fn test_with_removed_noops() {
        let ledger = Ledger::new();
        assert!(ledger.with_removed(&key("2025-05-23"), FruitType::Apple).is_none());

        let ledger = ledger.with_added(&key("2025-05-23"), FruitType::Banana).unwrap();
        assert!(ledger.with_removed(&key("2025-05-23"), FruitType::Apple).is_none());

        let ledger = ledger.with_removed(&key("2025-05-23"), FruitType::Banana).unwrap();
        assert_eq!(ledger.get(&key("2025-05-23")), Some(&DailyCount::default()));
    }

    #[test]
    fn test_json_shape() {
        let ledger = Ledger::new()
            .with_added(&key("2025-05-23"), FruitType::Banana)
            .and_then(|l| l.with_added(&key("2025-05-01"), FruitType::Apple))
            .unwrap();
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "2025-05-01": { "banana": 0, "apple": 1, "orange": 0 },
                "2025-05-23": { "banana": 1, "apple": 0, "orange": 0 }
            })
        );

        let back: Ledger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_deserialize_rejects_invalid_key() {
        let json = r#"{ "2025-02-30": { "banana": 1, "apple": 0, "orange": 0 } }"#;
        assert!(serde_json::from_str::<Ledger>(json).is_err());
    }
}
