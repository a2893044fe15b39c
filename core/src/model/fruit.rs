use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FruitType {
    Banana,
    Apple,
    Orange,
}

impl FruitType {
    /// Display order used by every view.
    pub const ALL: [FruitType; 3] = [FruitType::Banana, FruitType::Apple, FruitType::Orange];

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitType::Banana => "banana",
            FruitType::Apple => "apple",
            FruitType::Orange => "orange",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FruitType::Banana => "Banana",
            FruitType::Apple => "Apple",
            FruitType::Orange => "Orange",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FruitType::Banana => "🍌",
            FruitType::Apple => "🍎",
            FruitType::Orange => "🍊",
        }
    }
}

impl fmt::Display for FruitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FruitType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "banana" | "bananas" => Ok(FruitType::Banana),
            "apple" | "apples" => Ok(FruitType::Apple),
            "orange" | "oranges" => Ok(FruitType::Orange),
            _ => Err(LedgerError::UnknownFruit(s.to_string())),
        }
    }
}

/// Per-day fruit counts. Missing fields in stored snapshots read as zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DailyCount {
    pub banana: u32,
    pub apple: u32,
    pub orange: u32,
}

impl DailyCount {
    pub fn get(&self, fruit: FruitType) -> u32 {
        match fruit {
            FruitType::Banana => self.banana,
            FruitType::Apple => self.apple,
            FruitType::Orange => self.orange,
        }
    }

    fn slot(&mut self, fruit: FruitType) -> &mut u32 {
        match fruit {
            FruitType::Banana => &mut self.banana,
            FruitType::Apple => &mut self.apple,
            FruitType::Orange => &mut self.orange,
        }
    }

    /// `None` when the count for `fruit` is already `u32::MAX`.
    pub fn incremented(mut self, fruit: FruitType) -> Option<Self> {
        let slot = self.slot(fruit);
        *slot = slot.checked_add(1)?;
        Some(self)
    }

    /// `None` when the count for `fruit` is already zero.
    pub fn decremented(mut self, fruit: FruitType) -> Option<Self> {
        let slot = self.slot(fruit);
        *slot = slot.checked_sub(1)?;
        Some(self)
    }

    /// Widened so three counts at `u32::MAX` still add up exactly.
    pub fn total(&self) -> u64 {
        u64::from(self.banana) + u64::from(self.apple) + u64::from(self.orange)
    }

    /// Fruits with a non-zero count, in display order.
    pub fn active_fruits(&self) -> Vec<FruitType> {
        FruitType::ALL
            .into_iter()
            .filter(|f| self.get(*f) > 0)
            .collect()
    }
}
