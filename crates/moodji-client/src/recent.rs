use std::collections::{HashSet, VecDeque};

/// Maximum number of recent words kept.
pub const RECENT_CAPACITY: usize = 5;

/// Most-recent-first list of distinct words the user looked up.
///
/// Words are compared exactly as typed, so "Rain" and "rain" are two entries.
#[derive(Debug, Default, Clone)]
pub struct RecentWords {
    words: VecDeque<String>,
    index: HashSet<String>,
}

impl RecentWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `word` to the front, adding it if it wasn't there.
    pub fn record(&mut self, word: &str) {
        if self.index.contains(word) {
            self.words.retain(|w| w != word);
        } else {
            self.index.insert(word.to_string());
        }

        self.words.push_front(word.to_string());

        while self.words.len() > RECENT_CAPACITY {
            if let Some(evicted) = self.words.pop_back() {
                self.index.remove(&evicted);
            }
        }
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.index.clear();
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(recent: &RecentWords) -> Vec<&str> {
        recent.iter().collect()
    }

    #[test]
    fn most_recent_first() {
        let mut recent = RecentWords::new();
        recent.record("rain");
        recent.record("coffee");

        assert_eq!(words(&recent), vec!["coffee", "rain"]);
    }

    #[test]
    fn re_recording_promotes_without_growing() {
        let mut recent = RecentWords::new();
        recent.record("sunshine");
        recent.record("rain");
        recent.record("coffee");
        recent.record("sunshine");

        assert_eq!(words(&recent), vec!["sunshine", "coffee", "rain"]);
        assert_eq!(recent.len(), 3);
    }

    #[test]
    fn case_sensitive() {
        let mut recent = RecentWords::new();
        recent.record("Rain");
        recent.record("rain");

        assert_eq!(words(&recent), vec!["rain", "Rain"]);
    }

    #[test]
    fn evicts_least_recent() {
        let mut recent = RecentWords::new();
        for w in ["a", "b", "c", "d", "e", "f"] {
            recent.record(w);
        }

        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(words(&recent), vec!["f", "e", "d", "c", "b"]);
        assert!(!recent.contains("a"));

        // an evicted word comes back as a fresh entry
        recent.record("a");
        assert_eq!(words(&recent), vec!["a", "f", "e", "d", "c"]);
        assert!(!recent.contains("b"));
    }

    #[test]
    fn clear_empties_index_too() {
        let mut recent = RecentWords::new();
        recent.record("peace");
        recent.clear();

        assert!(recent.is_empty());
        assert!(!recent.contains("peace"));
    }
}
