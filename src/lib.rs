//! pipesh - minimal pipeline shell
//!
//! Features:
//! - External commands joined by `|`, wired with real OS pipes
//! - Bounded in-memory execution history (`history`, `exit` report)
//! - Ctrl+C dumps the history report and exits cleanly

pub mod interrupt;
pub mod shell;

pub use shell::Shell;
