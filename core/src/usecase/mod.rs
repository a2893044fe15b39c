pub mod calendar;
pub mod monthly_stats;
