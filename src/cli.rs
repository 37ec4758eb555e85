// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `vssmock`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vssmock",
    version,
    about = "Mock vehicle signals: react to actuation requests and clock ticks with scripted values.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the mock configuration (TOML).
    ///
    /// Default: `vssmock.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "vssmock.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `VSSMOCK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print datapoints and behaviors, but don't start the engine.
    #[arg(long)]
    pub dry_run: bool,

    /// Don't read commands from stdin.
    #[arg(long)]
    pub no_console: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
