use crate::model::{normalize_for_match, WindowRecord};

/// Case-insensitive substring test against the application name or the
/// title. The empty query matches every record, which is how an empty
/// launcher input renders the full window list.
pub fn matches(record: &WindowRecord, query: &str) -> bool {
    let needle = normalize_for_match(query);
    record.normalized_app_name().contains(&needle) || record.normalized_title().contains(&needle)
}

/// Boolean filter only. Result order is enumeration order, not relevance.
pub fn filter<'a>(records: &'a [WindowRecord], query: &str) -> Vec<&'a WindowRecord> {
    records.iter().filter(|record| matches(record, query)).collect()
}
