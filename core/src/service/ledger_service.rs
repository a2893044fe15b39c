use tracing::{debug, info, warn};

use crate::error::LedgerError;
use crate::model::date_key::DateKey;
use crate::model::fruit::{DailyCount, FruitType};
use crate::model::ledger::Ledger;
use crate::model::stats::MonthlyStats;
use crate::repository::LedgerRepository;
use crate::service::dto::CalendarMonth;
use crate::usecase::calendar::CalendarUseCase;
use crate::usecase::monthly_stats::MonthlyStatsUseCase;

/// Owns the in-memory ledger and writes a snapshot through `R` after each
/// change. Every mutating call validates its input before touching state, so
/// an `Err` always leaves the ledger as it was.
pub struct LedgerService<R: LedgerRepository> {
    repo: R,
    ledger: Ledger,
}

impl<R: LedgerRepository> LedgerService<R> {
    /// Restores the last snapshot from `repo`, or starts empty.
    pub fn open(repo: R) -> Self {
        let ledger = repo.load();
        Self { repo, ledger }
    }

    pub fn add_fruit(&mut self, date: &str, fruit: FruitType) -> Result<(), LedgerError> {
        let key = DateKey::parse(date)?;

        self.ledger = self
            .ledger
            .with_added(&key, fruit)
            .ok_or_else(|| LedgerError::CountLimit {
                date: key.to_string(),
                fruit,
            })?;
        debug!(date = %key, %fruit, count = self.ledger.counts_for(&key).get(fruit), "added fruit");

        self.persist();
        Ok(())
    }

    pub fn remove_fruit(&mut self, date: &str, fruit: FruitType) -> Result<(), LedgerError> {
        let key = DateKey::parse(date)?;

        match self.ledger.with_removed(&key, fruit) {
            Some(next) => {
                self.ledger = next;
                debug!(date = %key, %fruit, count = self.ledger.counts_for(&key).get(fruit), "removed fruit");
                self.persist();
            }
            None => debug!(date = %key, %fruit, "nothing to remove"),
        }
        Ok(())
    }

    /// Read-only view of the current state. Later mutations do not show up
    /// in a snapshot already handed out.
    pub fn snapshot(&self) -> Ledger {
        self.ledger.clone()
    }

    pub fn reset(&mut self) {
        self.ledger = Ledger::new();
        info!("ledger reset");
        self.persist();
    }

    pub fn get_monthly_stats(&self, year: i32, month: u32) -> Result<MonthlyStats, LedgerError> {
        MonthlyStatsUseCase::new(&self.ledger).get_monthly_stats(year, month)
    }

    pub fn day_counts(&self, date: &str) -> Result<DailyCount, LedgerError> {
        let key = DateKey::parse(date)?;
        Ok(self.ledger.counts_for(&key))
    }

    pub fn calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, LedgerError> {
        CalendarUseCase::new(&self.ledger).get_calendar_month(year, month)
    }

    // Save failures are logged, never surfaced: the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.ledger) {
            warn!(error = %err, "failed to save ledger snapshot");
        }
    }
}
