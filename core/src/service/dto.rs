use serde::Serialize;

use crate::model::date_key::DateKey;
use crate::model::fruit::DailyCount;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: DateKey,
    pub day: u32,
    pub counts: DailyCount,
    pub total: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in a Sunday-first week grid.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| d.total).sum()
    }

    /// Days grouped into Sunday-first weeks; `None` marks padding cells.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = (0..self.leading_blanks).map(|_| None).collect();
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }
}
