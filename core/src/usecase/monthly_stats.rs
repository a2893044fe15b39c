use crate::error::LedgerError;
use crate::model::ledger::Ledger;
use crate::model::stats::MonthlyStats;
use crate::time::is_valid_year_month;

/// Zero-padded `YYYY-MM` prefix shared by every date key of that month.
pub fn month_prefix(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

pub struct MonthlyStatsUseCase<'a> {
    ledger: &'a Ledger,
}

impl<'a> MonthlyStatsUseCase<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn get_monthly_stats(&self, year: i32, month: u32) -> Result<MonthlyStats, LedgerError> {
        if !is_valid_year_month(year, month) {
            return Err(LedgerError::InvalidYearMonth { year, month });
        }

        let prefix = month_prefix(year, month);
        let stats = self
            .ledger
            .iter()
            .filter(|(date, _)| date.in_month(&prefix))
            .fold(MonthlyStats::default(), |acc, (_, counts)| acc.add(counts));

        Ok(stats)
    }
}
