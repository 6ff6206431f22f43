use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use xoso_db::models::DrawRecord;
use xoso_engine::frequency::FrequencyResult;
use xoso_engine::gap::{GanCategory, GapReport};
use xoso_engine::schedule::{draws_per_week, weekdays_for, GapUnit};
use xoso_engine::streak::{StreakReport, StreakResult};
use xoso_engine::window::WindowMeta;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// "200 draws ≈ 1407 days" for periodic provinces, "30 days" otherwise.
fn window_phrase(meta: &WindowMeta) -> String {
    match meta.unit {
        GapUnit::Periods => format!("{} draws ≈ {} days", meta.native_count, meta.resolved_days),
        GapUnit::Days => format!("{} days", meta.resolved_days),
    }
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import finished:");
    println!("  Rows read          : {}", result.total_records);
    println!("  Inserted           : {}", result.inserted);
    println!("  Duplicates skipped : {}", result.skipped);
    if result.errors > 0 {
        println!("  Errors             : {}", result.errors);
    }
}

pub fn display_draws(records: &[DrawRecord]) {
    if records.is_empty() {
        println!("No draws to display.");
        return;
    }

    let mut table = new_table(vec!["Date", "Tier", "Values"]);
    for record in records {
        let mut by_tier: Vec<(String, Vec<&str>)> = Vec::new();
        for prize in &record.prizes {
            let tier = prize.tier.to_string();
            let start_new = by_tier.last().map(|(t, _)| *t != tier).unwrap_or(true);
            if start_new {
                by_tier.push((tier, Vec::new()));
            }
            if let Some((_, values)) = by_tier.last_mut() {
                values.push(&prize.value);
            }
        }
        for (tier, values) in by_tier {
            table.add_row(vec![
                record.draw_date.to_string(),
                tier,
                values.join("  "),
            ]);
        }
    }
    println!("{table}");
}

pub fn display_provinces(provinces: &[(String, u32)]) {
    if provinces.is_empty() {
        println!("Database is empty. Run: xoso import");
        return;
    }

    let mut table = new_table(vec!["Province", "Draws stored", "Schedule", "Draws/week"]);
    for (province, count) in provinces {
        let days = weekdays_for(province)
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let schedule = if draws_per_week(province) == 7 {
            "daily".to_string()
        } else {
            days
        };
        table.add_row(vec![
            province.clone(),
            count.to_string(),
            schedule,
            draws_per_week(province).to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_frequency(
    hot: &[FrequencyResult],
    cold: &[FrequencyResult],
    meta: &WindowMeta,
    province: &str,
) {
    println!(
        "\n📊 Frequency — {} — last {}\n",
        province,
        window_phrase(meta)
    );

    println!("── Hot numbers ──");
    let mut table = new_table(vec!["Number", "Hits"]);
    for result in hot {
        table.add_row(vec![
            Cell::new(&result.number).fg(Color::Green),
            Cell::new(result.count),
        ]);
    }
    println!("{table}");

    println!("\n── Cold numbers ──");
    let mut table = new_table(vec!["Number", "Hits"]);
    for result in cold {
        table.add_row(vec![
            Cell::new(&result.number).fg(Color::Blue),
            Cell::new(result.count),
        ]);
    }
    println!("{table}");
}

pub fn display_gan(report: &GapReport, province: &str) {
    println!(
        "\n🧊 Lô Gan — {} — last {}\n",
        province,
        window_phrase(&report.meta)
    );

    if report.empty_window {
        println!("No draw data in this window. Import more history first.");
        return;
    }
    if report.results.is_empty() {
        println!("No numbers to report.");
        return;
    }

    let unit = report.results[0].unit;
    let mut table = new_table(vec!["Number", "Last seen", "Current gap", "Max gap", "Category"]);
    for result in &report.results {
        let color = match result.category {
            GanCategory::CucGan => Color::Red,
            GanCategory::GanLon => Color::Yellow,
            GanCategory::GanThuong => Color::White,
        };
        table.add_row(vec![
            Cell::new(&result.number),
            Cell::new(result.last_seen),
            Cell::new(format!("{} {}", result.current_gap, unit)),
            Cell::new(format!("{} {}", result.max_gap, unit)),
            Cell::new(result.category.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

fn streak_table(results: &[StreakResult], current: bool) -> Table {
    let mut table = new_table(vec!["Number", "Streak", "Through"]);
    for result in results {
        let (streak, end) = if current {
            (result.current_streak, result.current_end)
        } else {
            (result.max_streak, result.max_end)
        };
        table.add_row(vec![
            Cell::new(&result.number).fg(Color::Green),
            Cell::new(format!("{} draws", streak)),
            Cell::new(end),
        ]);
    }
    table
}

pub fn display_streaks(report: &StreakReport, province: &str, meta: &WindowMeta) {
    println!(
        "\n🔥 Streaks — {} — last {}\n",
        province,
        window_phrase(meta)
    );

    if report.empty_window {
        println!("No draw data in this window. Import more history first.");
        return;
    }

    println!("── Active streaks ──");
    if report.current.is_empty() {
        println!("None at the minimum length.");
    } else {
        println!("{}", streak_table(&report.current, true));
    }

    println!("\n── Longest streaks in window ──");
    if report.historical_max.is_empty() {
        println!("None at the minimum length.");
    } else {
        println!("{}", streak_table(&report.historical_max, false));
    }
}
