use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use xoso_db::models::{DrawRecord, PrizeTier};

/// Number of trailing digits analyzed: 2-digit (lô 2 số) or 3-digit
/// (lô 3 số) play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitWidth {
    Two,
    Three,
}

impl DigitWidth {
    pub fn len(&self) -> usize {
        match self {
            DigitWidth::Two => 2,
            DigitWidth::Three => 3,
        }
    }
}

impl std::fmt::Display for DigitWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigitWidth::Two => write!(f, "2-digit"),
            DigitWidth::Three => write!(f, "3-digit"),
        }
    }
}

/// Trailing suffix of a prize value, or None when the value is too short
/// or malformed. Short values are a different prize shape, not a lot
/// number; they are skipped, never zero-padded.
fn suffix(value: &str, width: DigitWidth) -> Option<&str> {
    let n = width.len();
    if value.len() < n || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(&value[value.len() - n..])
}

/// Every extractable number in one draw, tagged with the prize tier it came
/// from. Keeps multiplicity: a number hit in three tiers yields three
/// entries.
pub fn extract_tagged(record: &DrawRecord, width: DigitWidth) -> Vec<(PrizeTier, String)> {
    record
        .prizes
        .iter()
        .filter_map(|p| suffix(&p.value, width).map(|s| (p.tier, s.to_string())))
        .collect()
}

/// Occurrences with multiplicity, for frequency counting.
pub fn extract_occurrences(record: &DrawRecord, width: DigitWidth) -> Vec<String> {
    extract_tagged(record, width)
        .into_iter()
        .map(|(_, number)| number)
        .collect()
}

/// De-duplicated presence set for one draw, for gap and streak analyses.
pub fn extract(record: &DrawRecord, width: DigitWidth) -> BTreeSet<String> {
    extract_occurrences(record, width).into_iter().collect()
}

/// Presence sets keyed by drawing date, ascending. This is the shared input
/// shape for the gap and streak analyzers.
pub fn presence_by_date(
    records: &[DrawRecord],
    width: DigitWidth,
) -> BTreeMap<NaiveDate, BTreeSet<String>> {
    records
        .iter()
        .map(|r| (r.draw_date, extract(r, width)))
        .collect()
}
