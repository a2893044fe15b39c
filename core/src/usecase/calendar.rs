use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::model::date_key::DateKey;
use crate::model::ledger::Ledger;
use crate::service::dto::{CalendarDay, CalendarMonth};
use crate::time::{days_in_month, first_weekday_offset, is_valid_year_month};

pub struct CalendarUseCase<'a> {
    ledger: &'a Ledger,
}

impl<'a> CalendarUseCase<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// One cell per day of the month, in order, with zeros for days that
    /// have no ledger entry.
    pub fn get_calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, LedgerError> {
        let invalid = || LedgerError::InvalidYearMonth { year, month };
        if !is_valid_year_month(year, month) {
            return Err(invalid());
        }

        let day_count = days_in_month(year, month).ok_or_else(invalid)?;
        let leading_blanks = first_weekday_offset(year, month).ok_or_else(invalid)?;

        let mut days = Vec::with_capacity(day_count as usize);
        for day in 1..=day_count {
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
            let key = DateKey::from_date(date)?;
            let counts = self.ledger.counts_for(&key);
            days.push(CalendarDay {
                day,
                total: counts.total(),
                date: key,
                counts,
            });
        }

        Ok(CalendarMonth {
            year,
            month,
            leading_blanks,
            days,
        })
    }
}
