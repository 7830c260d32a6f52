//! In-memory execution history.
//!
//! The log lives for one session only; nothing is persisted. The session
//! thread is the only writer. The SIGINT observer thread holds the other
//! `Arc` so it can render the final report before shutdown.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

/// Handle shared between the session loop and the interrupt observer.
pub type SharedHistory = Arc<Mutex<HistoryLog>>;

/// Metadata for one finished pipeline run. Created once, never mutated.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Normalized pipeline text (stages joined by ` | `).
    pub command: String,
    /// Process id of the last pipeline stage (0 if no stage spawned).
    pub pid: u32,
    /// Wall-clock time just before the first spawn.
    pub started: DateTime<Local>,
    /// Whole seconds from first spawn to last reap.
    pub duration_secs: u64,
}

/// Bounded FIFO log of history entries. Once at capacity, recording a new
/// entry evicts the oldest one.
#[derive(Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command texts in insertion order, for the `history` builtin.
    pub fn list_commands(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.command.clone()).collect()
    }

    /// Full report shown on `exit` and on SIGINT.
    pub fn render_detail(&self) -> String {
        let mut out = String::from("--- Command Execution History ---\n");
        for (i, e) in self.entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "[{}] PID: {} | Start: {} | Duration: {} sec | Command: {}",
                i + 1,
                e.pid,
                e.started.format("%a %b %e %H:%M:%S %Y"),
                e.duration_secs,
                e.command,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cmd: &str) -> HistoryEntry {
        HistoryEntry {
            command: cmd.to_string(),
            pid: 4242,
            started: Local::now(),
            duration_secs: 1,
        }
    }

    #[test]
    fn test_record_below_capacity() {
        let mut log = HistoryLog::with_capacity(3);
        log.record(entry("a"));
        log.record(entry("b"));
        assert_eq!(log.list_commands(), vec!["a", "b"]);
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut log = HistoryLog::with_capacity(3);
        for cmd in ["a", "b", "c", "d", "e"] {
            log.record(entry(cmd));
        }
        // Last 3 entries survive, in original relative order.
        assert_eq!(log.list_commands(), vec!["c", "d", "e"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut log = HistoryLog::with_capacity(10);
        log.record(entry("echo hi"));
        log.record(entry("ls -la"));
        assert_eq!(log.list_commands(), log.list_commands());
        assert_eq!(log.render_detail(), log.render_detail());
    }

    #[test]
    fn test_render_detail_fields() {
        let mut log = HistoryLog::with_capacity(10);
        log.record(entry("sleep 1"));
        let detail = log.render_detail();
        assert!(detail.starts_with("--- Command Execution History ---\n"));
        assert!(detail.contains("[1] PID: 4242"));
        assert!(detail.contains("Duration: 1 sec"));
        assert!(detail.contains("Command: sleep 1"));
    }

    #[test]
    fn test_render_detail_empty_log() {
        let log = HistoryLog::with_capacity(10);
        assert_eq!(log.render_detail(), "--- Command Execution History ---\n");
    }
}
