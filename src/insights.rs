//! Aggregation and search over journal entries.
//!
//! Everything here is derived on read; nothing is cached between calls.

use crate::constants::NO_DATA_LABEL;
use crate::journal::JournalEntry;

/// Arithmetic mean of the entries' mood scores.
///
/// Returns `0.0` when there are no entries. Any real average is at least 1,
/// so `0.0` unambiguously means "no data".
///
/// # Examples
///
/// ```
/// use asoka::insights::average_mood_score;
/// use asoka::journal::JournalEntry;
/// use asoka::mood::Mood;
///
/// let entries = [
///     JournalEntry::new(Mood::Happy, "shipped it"),
///     JournalEntry::new(Mood::Sad, "long meeting"),
/// ];
/// assert_eq!(average_mood_score(&entries), 3.5);
/// ```
pub fn average_mood_score<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let (total, count) = entries
        .into_iter()
        .fold((0u32, 0u32), |(total, count), entry| {
            (total + u32::from(entry.mood.score()), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(count)
    }
}

/// Buckets an average score into a label.
///
/// Lower bounds are inclusive: 4.2 and up is the best bucket, then 3.4, 2.6
/// and 1.8. Exactly `0.0` yields the "no data" label.
pub fn mood_label(score: f64) -> &'static str {
    if score == 0.0 {
        NO_DATA_LABEL
    } else if score >= 4.2 {
        "عالی"
    } else if score >= 3.4 {
        "خوب"
    } else if score >= 2.6 {
        "معمولی"
    } else if score >= 1.8 {
        "پایین"
    } else {
        "مضطرب"
    }
}

/// Entries whose text contains `query`, in input order.
///
/// Matching is a plain case-sensitive substring test with no normalization.
/// An empty query matches everything.
pub fn search<'a, K, I>(entries: I, query: &str) -> Vec<(K, &'a JournalEntry)>
where
    I: IntoIterator<Item = (K, &'a JournalEntry)>,
{
    entries
        .into_iter()
        .filter(|(_, entry)| entry.text.contains(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Mood;
    use std::collections::BTreeMap;

    fn sample() -> BTreeMap<u32, JournalEntry> {
        BTreeMap::from([
            (2, JournalEntry::new(Mood::Happy, "Great progress on the project")),
            (5, JournalEntry::new(Mood::Calm, "A long walk")),
            (12, JournalEntry::new(Mood::Stressed, "Heavy project meeting")),
        ])
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        let empty: Vec<JournalEntry> = Vec::new();
        assert_eq!(average_mood_score(&empty), 0.0);
        assert_eq!(mood_label(average_mood_score(&empty)), NO_DATA_LABEL);
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let entries = sample();
        let avg = average_mood_score(entries.values());
        assert!((avg - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_happy_and_sad_average_to_good() {
        let entries = [
            JournalEntry::new(Mood::Happy, "a"),
            JournalEntry::new(Mood::Sad, "b"),
        ];
        let avg = average_mood_score(&entries);
        assert_eq!(avg, 3.5);
        assert_eq!(mood_label(avg), "خوب");
    }

    #[test]
    fn test_label_boundaries_are_inclusive_lower() {
        assert_eq!(mood_label(5.0), "عالی");
        assert_eq!(mood_label(4.2), "عالی");
        assert_eq!(mood_label(4.19), "خوب");
        assert_eq!(mood_label(3.4), "خوب");
        assert_eq!(mood_label(3.39), "معمولی");
        assert_eq!(mood_label(2.6), "معمولی");
        assert_eq!(mood_label(2.59), "پایین");
        assert_eq!(mood_label(1.8), "پایین");
        assert_eq!(mood_label(1.79), "مضطرب");
        assert_eq!(mood_label(1.0), "مضطرب");
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let entries = sample();
        let hits = search(entries.iter().map(|(d, e)| (*d, e)), "");
        assert_eq!(hits.len(), 3);
        let days: Vec<u32> = hits.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![2, 5, 12]);
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let entries = sample();

        let hits = search(entries.iter().map(|(d, e)| (*d, e)), "project");
        let days: Vec<u32> = hits.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![2, 12]);

        let none = search(entries.iter().map(|(d, e)| (*d, e)), "Project");
        assert!(none.is_empty());
    }
}
