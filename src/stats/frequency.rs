use std::collections::BTreeMap;

/// Count of records per key. Iterates in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn sorted(&self) -> impl DoubleEndedIterator<Item = (&K, usize)> + ExactSizeIterator {
        self.counts.iter().map(|(k, c)| (k, *c))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.counts.keys()
    }

    pub fn last_key(&self) -> Option<&K> {
        self.counts.keys().next_back()
    }

    /// The `n` most frequent keys. Equal counts keep key order.
    pub fn top(&self, n: usize) -> Vec<(&K, usize)> {
        let mut all: Vec<(&K, usize)> = self.sorted().collect();
        // stable sort keeps ascending keys within a tie
        all.sort_by(|a, b| b.1.cmp(&a.1));
        all.truncate(n);
        all
    }
}

impl<K: Ord> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let t: FrequencyTable<i32> = [2025, 2024, 2024, 2026, 2024].into_iter().collect();
        assert_eq!(t.len(), 3);
        assert_eq!(t.total(), 5);
        assert_eq!(t.get(&2024), 3);
        assert_eq!(t.get(&1999), 0);
        assert_eq!(
            t.sorted().collect::<Vec<_>>(),
            vec![(&2024, 3), (&2025, 1), (&2026, 1)]
        );
        assert_eq!(t.last_key(), Some(&2026));
    }

    #[test]
    fn test_top_breaks_ties_by_key() {
        let t: FrequencyTable<&str> = ["kigali", "addis", "kigali", "nairobi", "addis", "juba"]
            .into_iter()
            .collect();
        assert_eq!(
            t.top(3),
            vec![(&"addis", 2), (&"kigali", 2), (&"juba", 1)]
        );
        assert_eq!(t.top(10).len(), 4);
        assert!(t.top(0).is_empty());
    }

    #[test]
    fn test_empty() {
        let t: FrequencyTable<String> = FrequencyTable::new();
        assert!(t.is_empty());
        assert_eq!(t.total(), 0);
        assert_eq!(t.last_key(), None);
        assert!(t.top(5).is_empty());
    }
}
