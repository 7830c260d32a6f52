//! Pipeline execution: process launching, pipe wiring, reaping.

use std::collections::VecDeque;
use std::io;
use std::process::{Child, Command as OsCommand, Stdio};
use std::time::Instant;

use chrono::Local;
use colored::Colorize;
use os_pipe::{PipeReader, PipeWriter};

use super::error::ShellError;
use super::history::HistoryEntry;
use super::parser::{Command, Pipeline};

/// Where a stage reads from.
#[derive(Debug)]
pub enum StageInput {
    Inherit,
    Pipe(PipeReader),
}

impl StageInput {
    fn into_stdio(self) -> Stdio {
        match self {
            StageInput::Inherit => Stdio::inherit(),
            StageInput::Pipe(r) => Stdio::from(r),
        }
    }
}

/// Where a stage writes to.
#[derive(Debug)]
pub enum StageOutput {
    Inherit,
    Pipe(PipeWriter),
}

impl StageOutput {
    fn into_stdio(self) -> Stdio {
        match self {
            StageOutput::Inherit => Stdio::inherit(),
            StageOutput::Pipe(w) => Stdio::from(w),
        }
    }
}

/// Result of running one pipeline: the history entry to record plus the
/// exit code of the last stage (kept for `-c` mode; never treated as a
/// shell-level error).
#[derive(Debug)]
pub struct RunReport {
    pub entry: HistoryEntry,
    pub last_status: i32,
}

/// Launch one stage. The program is resolved via PATH.
///
/// Converting a pipe end into `Stdio` consumes it, so the parent's copy of
/// every descriptor handed to this stage is closed by the time `spawn`
/// returns; readers on the other side can observe end-of-stream.
pub fn spawn_stage(
    cmd: &Command,
    stdin: StageInput,
    stdout: StageOutput,
) -> Result<Child, ShellError> {
    OsCommand::new(cmd.program())
        .args(cmd.args())
        .stdin(stdin.into_stdio())
        .stdout(stdout.into_stdio())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                ShellError::CommandNotFound {
                    name: cmd.program().to_string(),
                }
            }
            _ => ShellError::Spawn {
                name: cmd.program().to_string(),
                source: e,
            },
        })
}

/// Run a whole pipeline: allocate the N-1 pipes up front, spawn all stages
/// wired in sequence, reap every child, and measure wall-clock duration.
///
/// Individual exit statuses never become shell errors. A stage that cannot
/// be found is reported and skipped while the rest of the pipeline runs, and
/// the run still yields a history entry; only pipe allocation failures and
/// hard spawn failures abandon the attempt.
pub fn run(pipeline: &Pipeline) -> Result<RunReport, ShellError> {
    let started = Local::now();
    let clock = Instant::now();

    // Pipe i connects stage i's stdout to stage i+1's stdin.
    let mut readers: VecDeque<PipeReader> = VecDeque::new();
    let mut writers: VecDeque<PipeWriter> = VecDeque::new();
    for _ in 1..pipeline.len() {
        let (r, w) = os_pipe::pipe().map_err(ShellError::Pipe)?;
        readers.push_back(r);
        writers.push_back(w);
    }

    let mut children: Vec<Child> = Vec::with_capacity(pipeline.len());
    let mut last_pid = 0u32;

    for (idx, stage) in pipeline.stages().iter().enumerate() {
        let is_last = idx + 1 == pipeline.len();

        let stdin = if idx == 0 {
            StageInput::Inherit
        } else {
            readers.pop_front().map_or(StageInput::Inherit, StageInput::Pipe)
        };
        let stdout = if is_last {
            StageOutput::Inherit
        } else {
            writers.pop_front().map_or(StageOutput::Inherit, StageOutput::Pipe)
        };

        match spawn_stage(stage, stdin, stdout) {
            Ok(child) => {
                last_pid = child.id();
                children.push(child);
            }
            Err(e) if !e.abandons_pipeline() => {
                // Mirror a failed exec inside a forked child: report it and
                // let the neighbors run. The stage's pipe ends were dropped,
                // so its reader sees EOF. The run still records history.
                eprintln!("{}: {}", "pipesh".red(), e);
            }
            Err(e) => {
                // Abandon the attempt, but do not leave zombies behind.
                for child in &mut children {
                    let _ = child.kill();
                    let _ = child.wait();
                }
                return Err(e);
            }
        }
    }

    // Reap all children. Order does not matter; statuses are collected for
    // the last stage only and never surfaced as errors. When nothing spawned
    // at all, the status is what a failed exec child would have exited with.
    let mut last_status = if children.is_empty() { 1 } else { 0 };
    for child in &mut children {
        match child.wait() {
            Ok(status) => last_status = status.code().unwrap_or(-1),
            Err(_) => last_status = -1,
        }
    }

    let entry = HistoryEntry {
        command: pipeline.text(),
        pid: last_pid,
        started,
        duration_secs: clock.elapsed().as_secs(),
    };

    Ok(RunReport { entry, last_status })
}
