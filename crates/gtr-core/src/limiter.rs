//! Commit limiting: which commits of a project are in scope for a query.

use std::num::NonZeroUsize;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ReportError;
use crate::period::{Period, Window};
use crate::source::CommitRef;

/// Raw commit-limiting parameters as accepted from callers.
///
/// Validated into a [`CommitLimiter`] by [`CommitLimiter::new`].
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per named period, as exposed to callers"
)]
#[derive(Debug, Clone, Default)]
pub struct LimiterParams {
    /// Maximum number of commits per project. Zero or negative means no cap.
    pub max_count: i64,
    /// Inclusive start date, `YYYY-MM-DD`.
    pub from_date: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub to_date: Option<String>,
    /// Case-insensitive substring matched against subject or author.
    pub search: Option<String>,
    pub today: bool,
    pub yesterday: bool,
    pub this_week: bool,
    pub last_week: bool,
    pub this_month: bool,
    pub last_month: bool,
    pub this_year: bool,
    pub last_year: bool,
}

impl LimiterParams {
    fn requested_periods(&self) -> Vec<Period> {
        let flags = [
            self.today,
            self.yesterday,
            self.this_week,
            self.last_week,
            self.this_month,
            self.last_month,
            self.this_year,
            self.last_year,
        ];
        Period::ALL
            .into_iter()
            .zip(flags)
            .filter_map(|(period, set)| set.then_some(period))
            .collect()
    }
}

/// The time dimension of a commit limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeScope {
    /// No time filtering.
    #[default]
    Unbounded,
    /// Inclusive calendar dates; a missing side is open.
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    /// A named period relative to "now".
    Named(Period),
}

impl TimeScope {
    /// Resolves the scope to a concrete window given the local "now".
    pub fn window(&self, now: NaiveDateTime) -> Window {
        match *self {
            Self::Unbounded => Window::UNBOUNDED,
            Self::Range { from, to } => Window::days(from, to.and_then(|d| d.succ_opt())),
            Self::Named(period) => period.window(now),
        }
    }
}

/// A validated, immutable commit-selection scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitLimiter {
    max_count: Option<NonZeroUsize>,
    scope: TimeScope,
    search: Option<String>,
}

impl CommitLimiter {
    /// Validates caller parameters.
    ///
    /// At most one of {explicit date range, each named period} may be given.
    pub fn new(params: &LimiterParams) -> Result<Self, ReportError> {
        let from_raw = non_empty(params.from_date.as_deref());
        let to_raw = non_empty(params.to_date.as_deref());
        let periods = params.requested_periods();

        let mut requested: Vec<String> = periods.iter().map(ToString::to_string).collect();
        if from_raw.is_some() || to_raw.is_some() {
            requested.insert(0, "date range".to_string());
        }
        if requested.len() > 1 {
            return Err(ReportError::InvalidScope(format!(
                "only one of date range or named period may be used, got {}",
                requested.join(", ")
            )));
        }

        let scope = if let Some(&period) = periods.first() {
            TimeScope::Named(period)
        } else if from_raw.is_some() || to_raw.is_some() {
            let from = from_raw.map(parse_date).transpose()?;
            let to = to_raw.map(parse_date).transpose()?;
            if let (Some(f), Some(t)) = (from, to) {
                if f > t {
                    return Err(ReportError::InvalidDate {
                        value: format!("{f}..{t}"),
                        reason: "from date is after to date".to_string(),
                    });
                }
            }
            TimeScope::Range { from, to }
        } else {
            TimeScope::Unbounded
        };

        Ok(Self {
            max_count: usize::try_from(params.max_count)
                .ok()
                .and_then(NonZeroUsize::new),
            scope,
            search: non_empty(params.search.as_deref()).map(str::to_lowercase),
        })
    }

    /// Builds a limiter directly from already-typed parts.
    pub fn from_parts(
        max_count: Option<NonZeroUsize>,
        scope: TimeScope,
        search: Option<&str>,
    ) -> Self {
        Self {
            max_count,
            scope,
            search: non_empty(search).map(str::to_lowercase),
        }
    }

    pub const fn max_count(&self) -> Option<NonZeroUsize> {
        self.max_count
    }

    pub const fn scope(&self) -> &TimeScope {
        &self.scope
    }

    /// The lowercased search term, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether the commit's message or author contains the search term.
    pub fn matches_search(&self, commit: &CommitRef) -> bool {
        self.search.as_deref().is_none_or(|needle| {
            commit.message.to_lowercase().contains(needle)
                || commit.author.to_lowercase().contains(needle)
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ReportError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
