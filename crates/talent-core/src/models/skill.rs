use std::collections::BTreeSet;

/// Canonical skill identity: lowercased, inner whitespace collapsed to a
/// single space, outer whitespace trimmed.
pub fn normalize_skill(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a skill list into a sorted set. Entries that are empty after
/// normalization are dropped.
pub fn normalize_skills<S: AsRef<str>>(raw: &[S]) -> BTreeSet<String> {
    raw.iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}
