//! Interrupt handling (Ctrl+C).
//!
//! A dedicated observer thread waits on SIGINT. On the first delivery it
//! renders the full history report and terminates the whole process with
//! status 0 — the same report the graceful `exit` path prints, reached
//! asynchronously. The handler never returns into shell logic and does not
//! await in-flight children; they get reparented (accepted limitation).

use std::thread;

use anyhow::{Context, Result};
use signal_hook::consts::SIGINT;
use signal_hook::iterator::Signals;

use crate::shell::history::SharedHistory;

/// Register the SIGINT observer. Call once, before the session loop starts.
pub fn install(history: SharedHistory) -> Result<()> {
    let mut signals = Signals::new([SIGINT]).context("failed to register SIGINT handler")?;

    thread::spawn(move || {
        if signals.forever().next().is_some() {
            let log = history.lock().unwrap_or_else(|p| p.into_inner());
            println!("\nExecution stopped using Ctrl+C");
            print!("{}", log.render_detail());
            std::process::exit(0);
        }
    });

    Ok(())
}
