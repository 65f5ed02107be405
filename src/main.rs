// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Thetis CLI entrypoint.
//!
//! - `fmt` parses graph text and prints it in canonical form (diagnostics go to stderr).
//! - `replay` drives a headless session from a JSON-lines intent script and prints the final
//!   snapshot as JSON.
//! - `schema` prints the JSON schema of one replay script line.

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use thetis::format::mermaid::{export_flowchart, parse_flowchart_with};
use thetis::model::sample_graph;
use thetis::sync::script;
use thetis::{SyncConfig, SyncController};

/// Keep a diagram and its Mermaid text in sync
#[derive(Debug, Parser)]
#[command(name = "thetis", version)]
struct Cli {
    /// JSON config file (all keys optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse graph text and print it in canonical form
    Fmt {
        /// Input file, or `-` / nothing for stdin
        file: Option<PathBuf>,
    },
    /// Replay an intent script against a headless session
    Replay {
        script: PathBuf,
        /// Start from the built-in three-node sample instead of an empty diagram
        #[arg(long)]
        sample: bool,
        /// Extra wait after the last step before the final snapshot is taken
        #[arg(long, default_value_t = 0)]
        settle_ms: u64,
    },
    /// Print the JSON schema of a replay script line
    Schema,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn read_input(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::default(),
    };

    match cli.command {
        Command::Fmt { file } => {
            let input = read_input(file.as_deref())?;
            let parsed = parse_flowchart_with(&input, &config.layout);
            for warning in &parsed.warnings {
                tracing::warn!(line_no = warning.line_no, "{warning}");
            }
            print!("{}", export_flowchart(&parsed.graph));
        }
        Command::Replay {
            script: path,
            sample,
            settle_ms,
        } => {
            let steps = script::load_script(&path)?;
            let controller = if sample {
                SyncController::with_graph(config, sample_graph())
            } else {
                SyncController::new(config)
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let controller = runtime.block_on(script::replay(
                controller,
                &steps,
                Duration::from_millis(settle_ms),
            ))?;
            println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
        }
        Command::Schema => {
            let schema = script::script_step_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("thetis: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use tracing::Level;

    use super::{log_level, Cli, Command};

    #[test]
    fn parses_replay_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "thetis",
            "replay",
            "steps.jsonl",
            "--settle-ms",
            "1500",
            "--config",
            "thetis.json",
            "-vv",
        ])
        .expect("parse args");

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(Path::new("thetis.json")));
        match cli.command {
            Command::Replay {
                script,
                sample,
                settle_ms,
            } => {
                assert_eq!(script, PathBuf::from("steps.jsonl"));
                assert!(!sample);
                assert_eq!(settle_ms, 1500);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn fmt_file_is_optional() {
        let cli = Cli::try_parse_from(["thetis", "fmt"]).expect("parse args");
        assert!(matches!(cli.command, Command::Fmt { file: None }));
    }

    #[test]
    fn rejects_missing_subcommand() {
        Cli::try_parse_from(["thetis"]).unwrap_err();
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(5), Level::TRACE);
    }
}
