//! Session history of completed predictions.

use std::collections::VecDeque;

use serde::Serialize;
use time::{OffsetDateTime, macros::format_description};

use crate::result::{PredictionResult, Sentiment};

/// Maximum number of entries kept.
pub const HISTORY_CAPACITY: usize = 10;

/// One completed prediction. Never changes after it's created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub word: String,
    pub emoji: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(word: impl Into<String>, result: &PredictionResult, timestamp: String) -> Self {
        Self {
            word: word.into(),
            emoji: result.emoji.clone(),
            sentiment: result.sentiment,
            confidence: result.confidence,
            timestamp,
        }
    }
}

/// Local wall-clock time as `HH:MM:SS`.
///
/// Falls back to UTC when the local offset can't be determined (common in
/// multi-threaded processes on unix).
pub fn timestamp_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let format = format_description!("[hour]:[minute]:[second]");

    now.format(&format).unwrap_or_default()
}

/// Newest-first log of predictions, capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Default, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the front, evicting the oldest one when full.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Share of positive entries as a rounded percentage; 0 for an empty log.
    pub fn positive_rate(&self) -> u32 {
        if self.entries.is_empty() {
            return 0;
        }

        let positive = self
            .entries
            .iter()
            .filter(|e| e.sentiment == Sentiment::Positive)
            .count();

        (positive as f64 / self.entries.len() as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, sentiment: Sentiment) -> HistoryEntry {
        HistoryEntry {
            word: word.to_string(),
            emoji: "🙂".to_string(),
            sentiment,
            confidence: 0.5,
            timestamp: "12:00:00".to_string(),
        }
    }

    #[test]
    fn newest_first() {
        let mut log = HistoryLog::new();
        log.append(entry("first", Sentiment::Neutral));
        log.append(entry("second", Sentiment::Neutral));

        let words: Vec<_> = log.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["second", "first"]);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut log = HistoryLog::new();
        for i in 0..=HISTORY_CAPACITY {
            log.append(entry(&format!("word{i}"), Sentiment::Neutral));
        }

        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.get(0).unwrap().word, "word10");
        assert!(log.iter().all(|e| e.word != "word0"));
    }

    #[test]
    fn positive_rate() {
        let mut log = HistoryLog::new();
        assert_eq!(log.positive_rate(), 0);

        log.append(entry("a", Sentiment::Positive));
        log.append(entry("b", Sentiment::Positive));
        log.append(entry("c", Sentiment::Positive));
        log.append(entry("d", Sentiment::Negative));
        assert_eq!(log.positive_rate(), 75);

        log.append(entry("e", Sentiment::Neutral));
        log.append(entry("f", Sentiment::Neutral));
        // 3 / 6
        assert_eq!(log.positive_rate(), 50);
    }

    #[test]
    fn positive_rate_rounds() {
        let mut log = HistoryLog::new();
        log.append(entry("a", Sentiment::Positive));
        log.append(entry("b", Sentiment::Negative));
        log.append(entry("c", Sentiment::Negative));
        assert_eq!(log.positive_rate(), 33);

        log.clear();
        log.append(entry("a", Sentiment::Positive));
        log.append(entry("b", Sentiment::Positive));
        log.append(entry("c", Sentiment::Negative));
        assert_eq!(log.positive_rate(), 67);
    }

    #[test]
    fn timestamp_shape() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.matches(':').count(), 2);
    }
}
