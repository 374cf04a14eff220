use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// Years a report may name. Anything outside falls back to the current year.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar month, always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportPeriod {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !YEAR_RANGE.contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Interprets untrusted `month`/`year` text.
    ///
    /// Missing values mean "this month/year". If either fails to parse both fall back
    /// to `today`; a parsed month outside 1..=12 falls back on its own, as does a year
    /// outside 1..=9999.
    pub fn from_query(month: Option<&str>, year: Option<&str>, today: NaiveDate) -> Self {
        let fallback = Self::containing(today);

        let month = month.map(|m| m.trim().parse::<i64>()).transpose();
        let year = year.map(|y| y.trim().parse::<i64>()).transpose();
        let (Ok(month), Ok(year)) = (month, year) else {
            return fallback;
        };

        let month = u32::try_from(month.unwrap_or(i64::from(fallback.month)))
            .ok()
            .filter(|m| (1..=12).contains(m))
            .unwrap_or(fallback.month);
        let year = i32::try_from(year.unwrap_or(i64::from(fallback.year)))
            .ok()
            .filter(|y| YEAR_RANGE.contains(y))
            .unwrap_or(fallback.year);

        Self { year, month }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month()).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(next) => next.signed_duration_since(self.first_day()).num_days() as u32,
            None => 31,
        }
    }

    /// Every date of the month, day 1 first.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
            .collect()
    }

    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}
