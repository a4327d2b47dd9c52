//! Named relative periods and the time windows they resolve to.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A calendar window relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

impl Period {
    pub const ALL: [Self; 8] = [
        Self::Today,
        Self::Yesterday,
        Self::ThisWeek,
        Self::LastWeek,
        Self::ThisMonth,
        Self::LastMonth,
        Self::ThisYear,
        Self::LastYear,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this-week",
            Self::LastWeek => "last-week",
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::ThisYear => "this-year",
            Self::LastYear => "last-year",
        }
    }

    /// Resolves the period against `now` (local wall-clock time).
    ///
    /// Weeks start on Monday.
    pub fn window(self, now: NaiveDateTime) -> Window {
        let today = now.date();
        let (start, end) = match self {
            Self::Today => (today, today + Days::new(1)),
            Self::Yesterday => (today - Days::new(1), today),
            Self::ThisWeek => {
                let monday = monday_of(today);
                (monday, monday + Days::new(7))
            }
            Self::LastWeek => {
                let monday = monday_of(today);
                (monday - Days::new(7), monday)
            }
            Self::ThisMonth => {
                let first = first_of_month(today);
                (first, first + Months::new(1))
            }
            Self::LastMonth => {
                let first = first_of_month(today);
                (first - Months::new(1), first)
            }
            Self::ThisYear => {
                let first = first_of_year(today);
                (first, first + Months::new(12))
            }
            Self::LastYear => {
                let first = first_of_year(today);
                (first - Months::new(12), first)
            }
        };
        Window::days(Some(start), Some(end))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

/// Half-open `[start, end)` interval in local wall-clock time.
///
/// A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Window {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl Window {
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// Window from midnight of `start` to midnight of `end`.
    pub fn days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(|d| d.and_time(NaiveTime::MIN)),
            end: end.map(|d| d.and_time(NaiveTime::MIN)),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start.is_none_or(|s| s <= at) && self.end.is_none_or(|e| at < e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn window(y1: i32, m1: u32, d1: u32, y2: i32, m2: u32, d2: u32) -> Window {
        Window {
            start: Some(at(y1, m1, d1, 0)),
            end: Some(at(y2, m2, d2, 0)),
        }
    }

    // 2024-03-14 is a Thursday
    fn thursday() -> NaiveDateTime {
        at(2024, 3, 14, 10)
    }

    #[test]
    fn today_and_yesterday() {
        assert_eq!(
            Period::Today.window(thursday()),
            window(2024, 3, 14, 2024, 3, 15)
        );
        assert_eq!(
            Period::Yesterday.window(thursday()),
            window(2024, 3, 13, 2024, 3, 14)
        );
    }

    #[test]
    fn weeks_start_on_monday() {
        assert_eq!(
            Period::ThisWeek.window(thursday()),
            window(2024, 3, 11, 2024, 3, 18)
        );
        assert_eq!(
            Period::LastWeek.window(thursday()),
            window(2024, 3, 4, 2024, 3, 11)
        );
    }

    #[test]
    fn week_boundaries_on_monday_and_sunday() {
        // Mar 11 is a Monday, Mar 17 a Sunday
        for day in [11, 17] {
            assert_eq!(
                Period::ThisWeek.window(at(2024, 3, day, 23)),
                window(2024, 3, 11, 2024, 3, 18)
            );
        }
    }

    #[test]
    fn months_follow_calendar() {
        assert_eq!(
            Period::ThisMonth.window(thursday()),
            window(2024, 3, 1, 2024, 4, 1)
        );
        assert_eq!(
            Period::LastMonth.window(thursday()),
            window(2024, 2, 1, 2024, 3, 1)
        );
        // January wraps to the previous December
        assert_eq!(
            Period::LastMonth.window(at(2024, 1, 31, 8)),
            window(2023, 12, 1, 2024, 1, 1)
        );
        assert_eq!(
            Period::ThisMonth.window(at(2023, 12, 5, 8)),
            window(2023, 12, 1, 2024, 1, 1)
        );
    }

    #[test]
    fn years_follow_calendar() {
        assert_eq!(
            Period::ThisYear.window(thursday()),
            window(2024, 1, 1, 2025, 1, 1)
        );
        assert_eq!(
            Period::LastYear.window(thursday()),
            window(2023, 1, 1, 2024, 1, 1)
        );
    }

    #[test]
    fn window_is_half_open() {
        let today = Period::Today.window(thursday());
        assert!(today.contains(at(2024, 3, 14, 0)));
        assert!(today.contains(at(2024, 3, 14, 23)));
        assert!(!today.contains(at(2024, 3, 15, 0)));
        assert!(!today.contains(at(2024, 3, 13, 23)));
    }

    #[test]
    fn open_bounds_accept_everything_on_that_side() {
        let from_only = Window::days(NaiveDate::from_ymd_opt(2024, 3, 1), None);
        assert!(from_only.contains(at(2099, 1, 1, 0)));
        assert!(!from_only.contains(at(2024, 2, 29, 23)));
        assert!(Window::UNBOUNDED.contains(at(1970, 1, 1, 0)));
    }

    #[test]
    fn period_names_are_kebab_case() {
        assert_eq!(serde_json::to_string(&Period::LastWeek).unwrap(), "\"last-week\"");
        assert_eq!(Period::ThisYear.to_string(), "this-year");
    }
}
