use std::collections::BTreeMap;

use chrono::NaiveDate;
use xoso_db::models::DrawRecord;

use crate::extract::{presence_by_date, DigitWidth};
use crate::period::count_periods;
use crate::schedule::{schedule_for, DrawClass, GapUnit};
use crate::window::{AnalysisWindow, WindowMeta};

/// Severity of a cold streak. Thresholds depend on the draw class: a
/// 10-day drought means little for a weekly province, a lot for a daily one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GanCategory {
    GanThuong,
    GanLon,
    CucGan,
}

impl std::fmt::Display for GanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GanCategory::GanThuong => write!(f, "Gan thường"),
            GanCategory::GanLon => write!(f, "Gan lớn"),
            GanCategory::CucGan => write!(f, "Cực gan"),
        }
    }
}

/// Daily provinces: 10-15 / 16-20 / ≥21 days. Periodic provinces: 3-5 /
/// 6-8 / ≥9 periods. Gaps below the lower bound stay at the GanThuong floor.
pub fn categorize(class: DrawClass, current_gap: u32) -> GanCategory {
    match class {
        DrawClass::Daily => match current_gap {
            0..=15 => GanCategory::GanThuong,
            16..=20 => GanCategory::GanLon,
            _ => GanCategory::CucGan,
        },
        DrawClass::Periodic(_) => match current_gap {
            0..=5 => GanCategory::GanThuong,
            6..=8 => GanCategory::GanLon,
            _ => GanCategory::CucGan,
        },
    }
}

/// Gap metrics for one number that appeared at least once in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapResult {
    pub number: String,
    pub current_gap: u32,
    pub unit: GapUnit,
    pub last_seen: NaiveDate,
    pub max_gap: u32,
    pub category: GanCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    pub results: Vec<GapResult>,
    pub window: AnalysisWindow,
    pub meta: WindowMeta,
    /// True when the window held no draw records at all. An empty result
    /// list is otherwise ambiguous with "nothing is overdue".
    pub empty_window: bool,
}

/// Lô Gan analysis over an already-resolved window.
///
/// Per number, three gap candidates are evaluated: the quiet stretch before
/// the first appearance, every inter-appearance stretch, and the stretch
/// since the last appearance (the current gap). `max_gap` is seeded from
/// the full candidate set, so it can equal the current gap when the present
/// drought is the record, or exceed it when a past one was longer.
///
/// The window end is treated end-exclusive: a draw day coinciding with
/// `window.end` that has not been drawn yet must not shrink the gap.
/// Numbers that never appeared in the window are excluded; they have no
/// last-seen date to anchor a gap on.
pub fn analyze(
    province_id: &str,
    window: AnalysisWindow,
    meta: &WindowMeta,
    records: &[DrawRecord],
    width: DigitWidth,
    limit: usize,
) -> GapReport {
    let presence = presence_by_date(records, width);
    let empty_window = presence.is_empty();

    let mut appearances: BTreeMap<String, Vec<NaiveDate>> = BTreeMap::new();
    for (date, numbers) in &presence {
        for number in numbers {
            appearances.entry(number.clone()).or_default().push(*date);
        }
    }

    let class = schedule_for(province_id);
    let mut results = Vec::with_capacity(appearances.len());
    for (number, dates) in appearances {
        let first = dates[0];
        let last = dates[dates.len() - 1];

        // Candidate (a): quiet stretch at the start of the window. The
        // start day itself counts; the first appearance day does not.
        let mut max_gap = count_periods(province_id, window.start, first, false, true);

        // Candidate (b): stretches strictly between consecutive appearances.
        for pair in dates.windows(2) {
            let gap = count_periods(province_id, pair[0], pair[1], true, true);
            max_gap = max_gap.max(gap);
        }

        // Candidate (c): the current drought, end-exclusive on both sides.
        let current_gap = count_periods(province_id, last, window.end, true, true);
        max_gap = max_gap.max(current_gap);

        results.push(GapResult {
            number,
            current_gap,
            unit: class.gap_unit(),
            last_seen: last,
            max_gap,
            category: categorize(class, current_gap),
        });
    }

    results.sort_by(|a, b| {
        b.current_gap
            .cmp(&a.current_gap)
            .then_with(|| a.number.cmp(&b.number))
    });
    results.truncate(limit);

    GapReport {
        results,
        window,
        meta: meta.clone(),
        empty_window,
    }
}
