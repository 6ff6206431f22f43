use std::collections::BTreeMap;

use xoso_db::models::DrawRecord;

use crate::extract::{extract_occurrences, DigitWidth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyResult {
    pub number: String,
    pub count: u32,
}

/// Appearance counts across the window, keyed by number, ascending by
/// number. Every individual occurrence counts: a number hit in three prize
/// tiers on one date contributes 3.
pub fn frequencies(records: &[DrawRecord], width: DigitWidth) -> Vec<FrequencyResult> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for record in records {
        for number in extract_occurrences(record, width) {
            *counts.entry(number).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(number, count)| FrequencyResult { number, count })
        .collect()
}

/// Most frequent numbers, descending by count, ties broken by ascending
/// number for determinism.
pub fn hot(records: &[DrawRecord], width: DigitWidth, limit: usize) -> Vec<FrequencyResult> {
    let mut results = frequencies(records, width);
    results.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.number.cmp(&b.number)));
    results.truncate(limit);
    results
}

/// Least frequent numbers that still appeared at least once. Zero-count
/// numbers are "never appeared", a distinct concept this analyzer does not
/// handle.
pub fn cold(records: &[DrawRecord], width: DigitWidth, limit: usize) -> Vec<FrequencyResult> {
    let mut results = frequencies(records, width);
    results.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.number.cmp(&b.number)));
    results.truncate(limit);
    results
}
