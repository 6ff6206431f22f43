use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

use crate::models::{DrawRecord, PrizeTier, PrizeValue};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draw_prizes (
    province_id  TEXT NOT NULL,
    draw_date    TEXT NOT NULL,
    tier         TEXT NOT NULL,
    position     INTEGER NOT NULL,
    value        TEXT NOT NULL,
    PRIMARY KEY (province_id, draw_date, tier, position)
);
CREATE INDEX IF NOT EXISTS idx_draw_prizes_window
    ON draw_prizes (province_id, draw_date);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("xoso.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Cannot open database {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("Migration failed")?;
    Ok(())
}

/// Inserts one prize row. Returns false if the row already existed
/// (duplicate imports are ignored, not errors).
pub fn insert_prize(
    conn: &Connection,
    province_id: &str,
    draw_date: NaiveDate,
    tier: PrizeTier,
    position: u32,
    value: &str,
) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO draw_prizes (province_id, draw_date, tier, position, value)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![province_id, draw_date, tier.code(), position, value],
        )
        .context("Insert failed")?;
    Ok(changed > 0)
}

/// Fetches all draws for a province in `[start, end]`, ascending by date,
/// one `DrawRecord` per drawing date. Dates with no rows are simply absent.
pub fn fetch_draws(
    conn: &Connection,
    province_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT draw_date, tier, value
         FROM draw_prizes
         WHERE province_id = ?1 AND draw_date >= ?2 AND draw_date <= ?3
         ORDER BY draw_date ASC, tier ASC, position ASC",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![province_id, start, end], |row| {
            Ok((
                row.get::<_, NaiveDate>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut records: Vec<DrawRecord> = Vec::new();
    for (date, tier_code, value) in rows {
        let tier = PrizeTier::from_code(&tier_code)?;
        let start_new = records.last().map(|r| r.draw_date != date).unwrap_or(true);
        if start_new {
            records.push(DrawRecord {
                province_id: province_id.to_string(),
                draw_date: date,
                prizes: Vec::new(),
            });
        }
        if let Some(rec) = records.last_mut() {
            rec.prizes.push(PrizeValue { tier, value });
        }
    }
    Ok(records)
}

/// Fetches the last `limit` draws for a province, most recent first.
pub fn fetch_last_draws(conn: &Connection, province_id: &str, limit: u32) -> Result<Vec<DrawRecord>> {
    let latest = match latest_draw_date(conn, province_id)? {
        Some(d) => d,
        None => return Ok(Vec::new()),
    };
    let dates: Vec<NaiveDate> = {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT draw_date FROM draw_prizes
             WHERE province_id = ?1 ORDER BY draw_date DESC LIMIT ?2",
        )?;
        let dates = stmt
            .query_map(rusqlite::params![province_id, limit], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        dates
    };
    let earliest = match dates.last() {
        Some(d) => *d,
        None => return Ok(Vec::new()),
    };
    let mut records = fetch_draws(conn, province_id, earliest, latest)?;
    records.reverse();
    Ok(records)
}

pub fn latest_draw_date(conn: &Connection, province_id: &str) -> Result<Option<NaiveDate>> {
    let date = conn
        .query_row(
            "SELECT MAX(draw_date) FROM draw_prizes WHERE province_id = ?1",
            [province_id],
            |row| row.get::<_, Option<NaiveDate>>(0),
        )
        .context("Latest-date query failed")?;
    Ok(date)
}

/// Number of distinct drawing dates stored for a province.
pub fn count_draws(conn: &Connection, province_id: &str) -> Result<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(DISTINCT draw_date) FROM draw_prizes WHERE province_id = ?1",
        [province_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Provinces present in storage with their draw counts, alphabetical.
pub fn list_provinces(conn: &Connection) -> Result<Vec<(String, u32)>> {
    let mut stmt = conn.prepare(
        "SELECT province_id, COUNT(DISTINCT draw_date)
         FROM draw_prizes GROUP BY province_id ORDER BY province_id ASC",
    )?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn seed(conn: &Connection, province: &str, day: &str, values: &[(&str, &str)]) {
        for (i, (tier, value)) in values.iter().enumerate() {
            insert_prize(
                conn,
                province,
                date(day),
                PrizeTier::from_code(tier).unwrap(),
                i as u32,
                value,
            )
            .unwrap();
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_draws(&conn, "mien-bac").unwrap(), 0);

        seed(&conn, "mien-bac", "2025-08-20", &[("DB", "95123"), ("G1", "44210")]);
        assert_eq!(count_draws(&conn, "mien-bac").unwrap(), 1);

        seed(&conn, "mien-bac", "2025-08-21", &[("DB", "10007")]);
        assert_eq!(count_draws(&conn, "mien-bac").unwrap(), 2);
    }

    #[test]
    fn test_duplicate_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let inserted =
            insert_prize(&conn, "tp-hcm", date("2025-08-18"), PrizeTier::DacBiet, 0, "123456")
                .unwrap();
        assert!(inserted);
        let inserted =
            insert_prize(&conn, "tp-hcm", date("2025-08-18"), PrizeTier::DacBiet, 0, "123456")
                .unwrap();
        assert!(!inserted);
        assert_eq!(count_draws(&conn, "tp-hcm").unwrap(), 1);
    }

    #[test]
    fn test_fetch_draws_grouped_ascending() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        seed(&conn, "mien-bac", "2025-08-22", &[("DB", "95123")]);
        seed(&conn, "mien-bac", "2025-08-20", &[("DB", "11111"), ("G1", "22222")]);
        seed(&conn, "mien-bac", "2025-08-21", &[("DB", "33333")]);
        // Another province must not leak into the result.
        seed(&conn, "tp-hcm", "2025-08-21", &[("DB", "999999")]);

        let records =
            fetch_draws(&conn, "mien-bac", date("2025-08-20"), date("2025-08-22")).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].draw_date, date("2025-08-20"));
        assert_eq!(records[0].prizes.len(), 2);
        assert_eq!(records[1].draw_date, date("2025-08-21"));
        assert_eq!(records[2].draw_date, date("2025-08-22"));
    }

    #[test]
    fn test_fetch_draws_window_bounds_inclusive() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        seed(&conn, "mien-bac", "2025-08-19", &[("DB", "1")]);
        seed(&conn, "mien-bac", "2025-08-20", &[("DB", "2")]);
        seed(&conn, "mien-bac", "2025-08-23", &[("DB", "3")]);

        let records =
            fetch_draws(&conn, "mien-bac", date("2025-08-20"), date("2025-08-23")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].draw_date, date("2025-08-20"));
        assert_eq!(records[1].draw_date, date("2025-08-23"));
    }

    #[test]
    fn test_fetch_last_draws_order() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        seed(&conn, "mien-bac", "2025-08-18", &[("DB", "1")]);
        seed(&conn, "mien-bac", "2025-08-19", &[("DB", "2")]);
        seed(&conn, "mien-bac", "2025-08-20", &[("DB", "3")]);

        let records = fetch_last_draws(&conn, "mien-bac", 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].draw_date, date("2025-08-20"));
        assert_eq!(records[1].draw_date, date("2025-08-19"));
    }

    #[test]
    fn test_latest_draw_date_empty() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert!(latest_draw_date(&conn, "mien-bac").unwrap().is_none());
    }

    #[test]
    fn test_list_provinces() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        seed(&conn, "tp-hcm", "2025-08-18", &[("DB", "1")]);
        seed(&conn, "mien-bac", "2025-08-18", &[("DB", "1")]);
        seed(&conn, "mien-bac", "2025-08-19", &[("DB", "1")]);

        let provinces = list_provinces(&conn).unwrap();
        assert_eq!(provinces, vec![("mien-bac".to_string(), 2), ("tp-hcm".to_string(), 1)]);
    }
}
