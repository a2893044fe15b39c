use serde::Serialize;

use crate::model::fruit::{DailyCount, FruitType};

/// Per-fruit sums for one month, kept in `u64` so any month of `u32` daily
/// counts fits. `total` is derived on construction and cannot drift from the
/// three sums.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyStats {
    banana: u64,
    apple: u64,
    orange: u64,
    total: u64,
}

impl MonthlyStats {
    pub fn new(banana: u64, apple: u64, orange: u64) -> Self {
        Self {
            banana,
            apple,
            orange,
            total: banana + apple + orange,
        }
    }

    pub fn add(self, counts: &DailyCount) -> Self {
        Self::new(
            self.banana + u64::from(counts.banana),
            self.apple + u64::from(counts.apple),
            self.orange + u64::from(counts.orange),
        )
    }

    pub fn count(&self, fruit: FruitType) -> u64 {
        match fruit {
            FruitType::Banana => self.banana,
            FruitType::Apple => self.apple,
            FruitType::Orange => self.orange,
        }
    }

    pub fn banana(&self) -> u64 {
        self.banana
    }

    pub fn apple(&self) -> u64 {
        self.apple
    }

    pub fn orange(&self) -> u64 {
        self.orange
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Share of `fruit` in the month's total, 0.0 for an empty month.
    pub fn share(&self, fruit: FruitType) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(fruit) as f64 / self.total as f64
        }
    }
}
