use chrono::{Datelike, NaiveDate};

use crate::schedule::{schedule_for, DrawClass};

/// Extra days added when converting a draw count to a calendar span, to
/// absorb misalignment between the window start and the province's draw
/// weekdays. Over-approximation by design: the caller counts exact periods
/// afterwards with `count_periods`.
pub const WINDOW_BUFFER_DAYS: u32 = 7;

/// Counts the drawing days of `province_id` inside `[start, end]`.
///
/// Each exclusion flag removes its boundary date from consideration only if
/// that date would otherwise be counted (i.e. it is a draw day). A window
/// with `start > end` contains no periods.
pub fn count_periods(
    province_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    exclude_start: bool,
    exclude_end: bool,
) -> u32 {
    if start > end {
        return 0;
    }
    let class = schedule_for(province_id);
    let mut count = 0;
    let mut day = start;
    loop {
        let excluded = (exclude_start && day == start) || (exclude_end && day == end);
        if !excluded && class.is_draw_day(day.weekday()) {
            count += 1;
        }
        if day == end {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

/// Approximates the calendar-day span needed to contain `draw_count` draws.
///
/// Daily provinces need exactly `draw_count` days. Periodic provinces get
/// whole weeks plus `WINDOW_BUFFER_DAYS`, so the result is "at least enough"
/// rather than exact.
pub fn draws_to_days(province_id: &str, draw_count: u32) -> u32 {
    match schedule_for(province_id) {
        DrawClass::Daily => draw_count,
        class @ DrawClass::Periodic(_) => {
            let per_week = class.draws_per_week().max(1);
            draw_count.div_ceil(per_week) * 7 + WINDOW_BUFFER_DAYS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::date;

    #[test]
    fn test_daily_periods_equal_days() {
        // 2025-09-01 .. 2025-09-10 is a 10-day span.
        let start = date("2025-09-01");
        let end = date("2025-09-10");
        assert_eq!(count_periods("mien-bac", start, end, false, false), 10);
        assert_eq!(count_periods("mien-bac", start, end, true, false), 9);
        assert_eq!(count_periods("mien-bac", start, end, false, true), 9);
        assert_eq!(count_periods("mien-bac", start, end, true, true), 8);
    }

    #[test]
    fn test_weekly_thursdays_counted() {
        // Thursdays between 2025-08-28 and 2025-10-16 exclusive of both:
        // Sep 4, 11, 18, 25, Oct 2, 9.
        let periods =
            count_periods("binh-dinh", date("2025-08-28"), date("2025-10-16"), true, true);
        assert_eq!(periods, 6);
    }

    #[test]
    fn test_exclusion_only_removes_draw_days() {
        // 2025-09-01 is a Monday, 2025-09-04 a Thursday. For a Thursday
        // province, excluding the start must not change the count.
        let start = date("2025-09-01");
        let end = date("2025-09-04");
        assert_eq!(count_periods("binh-dinh", start, end, false, false), 1);
        assert_eq!(count_periods("binh-dinh", start, end, true, false), 1);
        assert_eq!(count_periods("binh-dinh", start, end, false, true), 0);
    }

    #[test]
    fn test_single_day_window() {
        let thursday = date("2025-10-16");
        assert_eq!(count_periods("binh-dinh", thursday, thursday, false, false), 1);
        assert_eq!(count_periods("binh-dinh", thursday, thursday, true, false), 0);
        assert_eq!(count_periods("binh-dinh", thursday, thursday, false, true), 0);
        let friday = date("2025-10-17");
        assert_eq!(count_periods("binh-dinh", friday, friday, false, false), 0);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        assert_eq!(
            count_periods("mien-bac", date("2025-09-10"), date("2025-09-01"), false, false),
            0
        );
    }

    #[test]
    fn test_draws_to_days_daily() {
        assert_eq!(draws_to_days("mien-bac", 30), 30);
        assert_eq!(draws_to_days("mien-bac", 1), 1);
    }

    #[test]
    fn test_draws_to_days_weekly() {
        // 200 weekly draws: 200 weeks plus the buffer week.
        assert_eq!(draws_to_days("ca-mau", 200), 1407);
    }

    #[test]
    fn test_draws_to_days_twice_weekly() {
        // ceil(10 / 2) * 7 + 7
        assert_eq!(draws_to_days("tp-hcm", 10), 42);
        assert_eq!(draws_to_days("tp-hcm", 9), 42);
    }

    #[test]
    fn test_draws_to_days_monotonic() {
        for province in ["mien-bac", "ca-mau", "tp-hcm"] {
            let mut prev = 0;
            for n in 1..=60 {
                let days = draws_to_days(province, n);
                assert!(days >= prev, "{}: not monotonic at n={}", province, n);
                prev = days;
            }
        }
    }

    #[test]
    fn test_draws_to_days_span_contains_enough_draws() {
        // The over-approximated span must contain at least the requested
        // number of drawing days once counted exactly.
        let end = date("2025-10-16");
        for (province, n) in [("ca-mau", 200), ("tp-hcm", 50), ("mien-bac", 90)] {
            let days = draws_to_days(province, n);
            let start = end - chrono::Duration::days(days as i64);
            let periods = count_periods(province, start, end, false, false);
            assert!(periods >= n, "{}: {} periods < {} draws", province, periods, n);
        }
    }
}
