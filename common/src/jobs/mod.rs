//! Completion tracking for server-side document generation.
//!
//! `POST /documents/{id}/generate` only enqueues a job; the document flips
//! out of `DRAFT` when the worker has produced the new version. The editor
//! polls the document with the schedule below and feeds each read into a
//! [`GenerationWatch`].

use crate::model::document::DocumentStatus;

/// Delay before the first poll, giving the worker a head start.
pub const FIRST_POLL_DELAY_MS: u32 = 1_500;
pub const POLL_INTERVAL_MS: u32 = 2_000;
pub const MAX_POLL_ATTEMPTS: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Still waiting. Carries the number of polls made so far.
    InProgress(u32),
    Completed,
    /// Polling gave up; the version will show up once the worker finishes.
    TimedOut,
}

#[derive(Clone, Debug)]
pub struct GenerationWatch {
    attempts: u32,
    max_attempts: u32,
}

impl Default for GenerationWatch {
    fn default() -> Self {
        Self::new(MAX_POLL_ATTEMPTS)
    }
}

impl GenerationWatch {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn next_delay_ms(&self) -> u32 {
        if self.attempts == 0 {
            FIRST_POLL_DELAY_MS
        } else {
            POLL_INTERVAL_MS
        }
    }

    /// Records one poll. `observed` is the status read back, or `None` when
    /// the poll itself failed; failures count as attempts.
    pub fn record(&mut self, observed: Option<DocumentStatus>) -> JobStatus {
        self.attempts += 1;
        match observed {
            Some(status) if !status.is_draft() => JobStatus::Completed,
            _ if self.attempts >= self.max_attempts => JobStatus::TimedOut,
            _ => JobStatus::InProgress(self.attempts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_poll_waits_less_than_the_rest() {
        let mut watch = GenerationWatch::default();
        assert_eq!(watch.next_delay_ms(), FIRST_POLL_DELAY_MS);
        watch.record(Some(DocumentStatus::Draft));
        assert_eq!(watch.next_delay_ms(), POLL_INTERVAL_MS);
    }

    #[test]
    fn completes_when_status_leaves_draft() {
        let mut watch = GenerationWatch::default();
        assert_eq!(watch.record(Some(DocumentStatus::Draft)), JobStatus::InProgress(1));
        assert_eq!(watch.record(None), JobStatus::InProgress(2));
        assert_eq!(watch.record(Some(DocumentStatus::Generated)), JobStatus::Completed);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut watch = GenerationWatch::new(3);
        watch.record(None);
        watch.record(Some(DocumentStatus::Draft));
        assert_eq!(watch.record(Some(DocumentStatus::Draft)), JobStatus::TimedOut);
        assert_eq!(watch.attempts(), 3);
    }

    #[test]
    fn completion_on_last_attempt_wins_over_timeout() {
        let mut watch = GenerationWatch::new(1);
        assert_eq!(watch.record(Some(DocumentStatus::Generated)), JobStatus::Completed);
    }
}
