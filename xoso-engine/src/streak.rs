use std::collections::BTreeSet;

use chrono::NaiveDate;
use xoso_db::models::DrawRecord;

use crate::extract::{presence_by_date, DigitWidth};

/// Streak metrics for one number across the window's draw-date sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakResult {
    pub number: String,
    /// Run still alive at the final draw date; 0 if absent on that date.
    pub current_streak: u32,
    pub current_end: NaiveDate,
    pub max_streak: u32,
    pub max_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakReport {
    pub current: Vec<StreakResult>,
    pub historical_max: Vec<StreakResult>,
    pub empty_window: bool,
}

/// Walks the ordered distinct draw dates once per number, incrementing a
/// running counter on presence and resetting on absence. Streaks are counted
/// in draws, so they are schedule-agnostic: consecutive means consecutive
/// drawing dates, whatever the province's calendar looks like.
pub fn analyze(
    records: &[DrawRecord],
    width: DigitWidth,
    min_streak: u32,
    limit: usize,
) -> StreakReport {
    let presence = presence_by_date(records, width);
    let dates: Vec<NaiveDate> = presence.keys().copied().collect();
    if dates.is_empty() {
        return StreakReport {
            current: Vec::new(),
            historical_max: Vec::new(),
            empty_window: true,
        };
    }
    let last_date = dates[dates.len() - 1];
    let min_streak = min_streak.max(1);

    let numbers: BTreeSet<&String> = presence.values().flatten().collect();
    let mut all = Vec::with_capacity(numbers.len());
    for number in numbers {
        let mut run = 0u32;
        let mut max_streak = 0u32;
        let mut max_end = dates[0];
        for &date in &dates {
            if presence[&date].contains(number) {
                run += 1;
                if run > max_streak {
                    max_streak = run;
                    max_end = date;
                }
            } else {
                run = 0;
            }
        }
        all.push(StreakResult {
            number: number.clone(),
            current_streak: run,
            current_end: last_date,
            max_streak,
            max_end,
        });
    }

    let mut current: Vec<StreakResult> = all
        .iter()
        .filter(|r| r.current_streak >= min_streak)
        .cloned()
        .collect();
    current.sort_by(|a, b| {
        b.current_streak
            .cmp(&a.current_streak)
            .then_with(|| a.number.cmp(&b.number))
    });
    current.truncate(limit);

    let mut historical_max: Vec<StreakResult> = all
        .into_iter()
        .filter(|r| r.max_streak >= min_streak)
        .collect();
    historical_max.sort_by(|a, b| {
        b.max_streak
            .cmp(&a.max_streak)
            .then_with(|| a.number.cmp(&b.number))
    });
    historical_max.truncate(limit);

    StreakReport {
        current,
        historical_max,
        empty_window: false,
    }
}
