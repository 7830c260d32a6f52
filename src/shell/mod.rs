//! Shell core module

pub mod error;
pub mod executor;
pub mod history;
pub mod parser;

use std::sync::{Arc, Mutex};

use colored::Colorize;

use self::history::{HistoryLog, SharedHistory};

/// Configurable bounds. Defaults match the traditional fixed buffers these
/// limits replace.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum pipeline stages per line.
    pub max_stages: usize,
    /// Input lines longer than this are truncated by the read layer.
    pub max_line_bytes: usize,
    /// History entries kept before FIFO eviction starts.
    pub history_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_stages: 16,
            max_line_bytes: 1024,
            history_capacity: 100,
        }
    }
}

/// Main shell state
pub struct Shell {
    /// Session history, shared with the SIGINT observer.
    pub history: SharedHistory,
    /// Configured bounds.
    pub limits: Limits,
    /// Last pipeline's final-stage exit status (for `-c` mode).
    pub last_status: i32,
    /// Should exit
    pub should_exit: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            history: Arc::new(Mutex::new(HistoryLog::with_capacity(
                limits.history_capacity,
            ))),
            limits,
            last_status: 0,
            should_exit: false,
        }
    }

    /// Execute one input line: dispatch the builtins, otherwise parse and
    /// run it as a pipeline. Errors are reported here and never propagate;
    /// the session always continues.
    pub fn execute(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match line {
            "exit" => {
                print!("\n{}", self.lock_history().render_detail());
                self.should_exit = true;
            }
            "history" => {
                for (i, cmd) in self.lock_history().list_commands().iter().enumerate() {
                    println!("{}  {}", i + 1, cmd);
                }
            }
            _ => self.run_pipeline(line),
        }
    }

    fn run_pipeline(&mut self, line: &str) {
        let pipeline = match parser::split_pipeline(line, self.limits.max_stages) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{}: {}", "pipesh".red(), e);
                return;
            }
        };

        match executor::run(&pipeline) {
            Ok(report) => {
                self.last_status = report.last_status;
                self.lock_history().record(report.entry);
            }
            Err(e) => {
                eprintln!("{}: {}", "pipesh".red(), e);
                self.last_status = 1;
            }
        }
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, HistoryLog> {
        self.history.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_records_nothing() {
        let mut shell = Shell::new();
        shell.execute("");
        shell.execute("   ");
        assert!(shell.lock_history().is_empty());
        assert!(!shell.should_exit);
    }

    #[test]
    fn test_history_builtin_records_nothing() {
        let mut shell = Shell::new();
        shell.execute("history");
        assert!(shell.lock_history().is_empty());
    }

    #[test]
    fn test_command_is_recorded() {
        let mut shell = Shell::new();
        shell.execute("true");
        assert_eq!(shell.lock_history().list_commands(), vec!["true"]);
        assert_eq!(shell.last_status, 0);
    }

    #[test]
    fn test_parse_error_skips_command() {
        let mut shell = Shell::new();
        shell.execute("ls | | wc");
        assert!(shell.lock_history().is_empty());
        assert!(!shell.should_exit);
    }

    #[test]
    fn test_exit_sets_flag_without_recording() {
        let mut shell = Shell::new();
        shell.execute("exit");
        assert!(shell.should_exit);
        assert!(shell.lock_history().is_empty());
    }

    #[test]
    fn test_missing_program_still_recorded() {
        let mut shell = Shell::new();
        shell.execute("definitely-not-a-real-command-xyz");
        assert_eq!(shell.lock_history().len(), 1);
    }
}
