//! pipesh - minimal pipeline shell
//!
//! Usage:
//!   pipesh                  Interactive session
//!   pipesh -c "command"     Execute single command

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use pipesh::interrupt;
use pipesh::Shell;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "-c" => {
                if args.len() < 3 {
                    eprintln!("pipesh: -c requires an argument");
                    std::process::exit(1);
                }
                let cmd = args[2..].join(" ");
                let code = execute_command(&cmd);
                std::process::exit(code);
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                println!("pipesh v{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {
                eprintln!("pipesh: unknown option: {}", args[1]);
                std::process::exit(1);
            }
        }
    }

    let code = run_repl()?;
    std::process::exit(code);
}

fn print_help() {
    println!("{}", "pipesh - minimal pipeline shell".bold());
    println!();
    println!("Usage:");
    println!("  pipesh                  Start interactive session");
    println!("  pipesh -c \"command\"     Execute single command");
    println!("  pipesh -h, --help       Show this help");
    println!("  pipesh -v, --version    Show version");
    println!();
    println!("At the prompt: `history` lists past commands, `exit` prints the");
    println!("execution report and quits, Ctrl+C prints the report and quits.");
}

fn execute_command(cmd: &str) -> i32 {
    let mut shell = Shell::new();
    shell.execute(cmd);
    shell.last_status
}

/// Cap a line at `max` bytes without splitting a character. Longer input is
/// truncated, not rejected.
fn truncate_line(mut line: String, max: usize) -> String {
    if line.len() <= max {
        return line;
    }
    let mut cut = max;
    while !line.is_char_boundary(cut) {
        cut -= 1;
    }
    line.truncate(cut);
    line
}

fn run_repl() -> Result<i32> {
    let mut shell = Shell::new();
    interrupt::install(Arc::clone(&shell.history))?;

    let prompt = format!("{}{} ", "pipesh".bright_cyan().bold(), ">".white());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", prompt);
        io::stdout().flush()?;

        // End-of-input terminates quietly; only `exit` and Ctrl+C print the
        // detail report.
        let Some(line) = lines.next() else { break };
        let line = truncate_line(line?, shell.limits.max_line_bytes);

        shell.execute(&line);
        if shell.should_exit {
            break;
        }
    }

    Ok(0)
}
