use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of days an item was completed on. Serialized as a sorted list of
/// `YYYY-MM-DD` strings; duplicates collapse on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeSet<NaiveDate>);

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.0.remove(&date)
    }

    /// Flip membership of `date`. Returns whether it is now present.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }
}

impl FromIterator<NaiveDate> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        CompletionSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;

    #[test]
    fn toggle_twice_restores_membership() {
        let jan1 = parse_date("2024-01-01").unwrap();
        let jan2 = parse_date("2024-01-02").unwrap();
        let mut set: CompletionSet = [jan1].into_iter().collect();
        let before = set.clone();

        assert!(set.toggle(jan2));
        assert!(set.contains(jan2));
        assert!(set.contains(jan1));
        assert!(!set.toggle(jan2));
        assert_eq!(set, before);

        assert!(!set.toggle(jan1));
        assert!(set.is_empty());
        assert!(set.toggle(jan1));
        assert_eq!(set, before);
    }

    #[test]
    fn serializes_as_sorted_date_strings() {
        let set: CompletionSet = ["2024-01-03", "2024-01-01"]
            .iter()
            .map(|s| parse_date(s).unwrap())
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["2024-01-01","2024-01-03"]"#);

        let dup: CompletionSet = serde_json::from_str(r#"["2024-01-01","2024-01-01"]"#).unwrap();
        assert_eq!(dup.len(), 1);
    }
}
