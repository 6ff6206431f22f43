use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate};

use crate::period::draws_to_days;
use crate::schedule::{schedule_for, GapUnit};

/// Caller-supplied window request: either "last N draws" (preferred) or
/// "last N calendar days". The two are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSpec {
    Draws(u32),
    Days(u32),
}

/// Concrete date span an analysis runs over. Resolved before any counting
/// happens; both bounds are calendar dates, the gap math decides boundary
/// inclusion per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// How the resolved window should be phrased: the requested size in its
/// native unit, plus the day-equivalent span ("200 draws ≈ 1407 days").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowMeta {
    pub native_count: u32,
    pub unit: GapUnit,
    pub resolved_days: u32,
}

impl WindowSpec {
    /// Resolves the request against a reference end date. Fails fast on a
    /// non-positive size (caller contract violation).
    pub fn resolve(&self, province_id: &str, end: NaiveDate) -> Result<(AnalysisWindow, WindowMeta)> {
        let native_count = match *self {
            WindowSpec::Draws(n) | WindowSpec::Days(n) => n,
        };
        if native_count == 0 {
            bail!("Analysis window must be positive");
        }
        let resolved_days = match *self {
            WindowSpec::Draws(n) => draws_to_days(province_id, n),
            WindowSpec::Days(n) => n,
        };
        let unit = match self {
            WindowSpec::Draws(_) => schedule_for(province_id).gap_unit(),
            WindowSpec::Days(_) => GapUnit::Days,
        };
        let window = AnalysisWindow {
            start: end - Duration::days(resolved_days as i64),
            end,
        };
        Ok((window, WindowMeta { native_count, unit, resolved_days }))
    }
}
