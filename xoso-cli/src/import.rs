use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use xoso_db::db::insert_prize;
use xoso_db::models::{validate_prize_value, PrizeTier};
use xoso_db::rusqlite::Connection;

/// One CSV row: `province_id;date;tier;position;value` with a dd/mm/yyyy
/// date, one row per published prize value.
struct PrizeRow {
    province_id: String,
    draw_date: NaiveDate,
    tier: PrizeTier,
    position: u32,
    value: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .with_context(|| format!("Invalid date: '{}'", raw))
}

fn parse_record(record: &csv::StringRecord) -> Result<PrizeRow> {
    let get = |idx: usize| -> Result<String> {
        match record.get(idx) {
            Some(s) => Ok(s.trim().to_string()),
            None => bail!("Missing field at index {}", idx),
        }
    };

    let province_id = get(0)?;
    if province_id.is_empty() {
        bail!("Empty province id");
    }
    let draw_date = parse_date(&get(1)?)?;
    let tier = PrizeTier::from_code(&get(2)?)?;
    let position_str = get(3)?;
    let position: u32 = position_str
        .parse()
        .with_context(|| format!("Invalid position: '{}'", position_str))?;
    let value = get(4)?;
    validate_prize_value(&value)?;

    Ok(PrizeRow {
        province_id,
        draw_date,
        tier,
        position,
        value,
    })
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Cannot open {:?}", path))?;

    let tx = conn
        .unchecked_transaction()
        .context("Cannot start transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(row) => {
                    match insert_prize(
                        &tx,
                        &row.province_id,
                        row.draw_date,
                        row.tier,
                        row.position,
                        &row.value,
                    ) {
                        Ok(true) => result.inserted += 1,
                        Ok(false) => result.skipped += 1,
                        Err(e) => {
                            eprintln!("Insert error on line {}: {}", result.total_records, e);
                            result.errors += 1;
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Parse error on line {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Read error on line {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Commit failed")?;
    Ok(result)
}
