//! Bounded in-memory list of recent submissions, newest first.

use crate::model::{Priority, Submission};

/// Entries kept before the oldest submission is evicted.
pub const MAX_RECENT: usize = 5;

#[derive(Debug, Default)]
pub struct RecentSubmissions {
    entries: Vec<Submission>,
}

impl RecentSubmissions {
    /// Remember a successful submit. Inserts at the front and evicts the
    /// oldest entry once the list would exceed [`MAX_RECENT`].
    pub fn record(&mut self, ingestion_id: String, ids: Vec<i64>, priority: Priority) {
        let timestamp_utc = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into());
        self.entries.insert(
            0,
            Submission {
                ingestion_id,
                ids,
                priority,
                timestamp_utc,
            },
        );
        self.entries.truncate(MAX_RECENT);
    }

    /// Submissions in display order (newest first).
    pub fn entries(&self) -> &[Submission] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently recorded ingestion id, if any.
    pub fn latest_id(&self) -> Option<&str> {
        self.entries.first().map(|s| s.ingestion_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_n(tracker: &mut RecentSubmissions, n: usize) {
        for i in 0..n {
            tracker.record(format!("ing-{i}"), vec![i as i64], Priority::Medium);
        }
    }

    #[test]
    fn newest_entry_is_first() {
        let mut tracker = RecentSubmissions::default();
        record_n(&mut tracker, 3);
        let ids: Vec<&str> = tracker
            .entries()
            .iter()
            .map(|s| s.ingestion_id.as_str())
            .collect();
        assert_eq!(ids, vec!["ing-2", "ing-1", "ing-0"]);
        assert_eq!(tracker.latest_id(), Some("ing-2"));
    }

    #[test]
    fn sixth_record_evicts_the_oldest() {
        let mut tracker = RecentSubmissions::default();
        record_n(&mut tracker, 6);
        assert_eq!(tracker.entries().len(), MAX_RECENT);
        let ids: Vec<&str> = tracker
            .entries()
            .iter()
            .map(|s| s.ingestion_id.as_str())
            .collect();
        assert_eq!(ids, vec!["ing-5", "ing-4", "ing-3", "ing-2", "ing-1"]);
    }

    #[test]
    fn record_stamps_a_timestamp() {
        let mut tracker = RecentSubmissions::default();
        tracker.record("ing-0".into(), vec![7], Priority::High);
        let entry = &tracker.entries()[0];
        assert!(entry.timestamp_utc.contains('T'));
        assert_eq!(entry.ids, vec![7]);
        assert_eq!(entry.priority, Priority::High);
    }
}
