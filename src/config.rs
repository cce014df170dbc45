// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command line and environment configuration.
//!
//! | Flag | Environment | Default |
//! |------|-------------|---------|
//! | `--dir` | `REPOGEN_DIR` | `.` |
//! | `--snapshot` | `REPOGEN_SNAPSHOT` | `repogen.snapshot.json` |
//! | `--formatter` | `REPOGEN_FORMATTER` | `goimports` |
//! | `--no-format` | | off |

use std::path::PathBuf;

use clap::Parser;

/// Snapshot file name looked up in every package directory.
pub const DEFAULT_SNAPSHOT: &str = "repogen.snapshot.json";

/// Formatter generated code is piped through.
pub const DEFAULT_FORMATTER: &str = "goimports";

/// Generate repositories, search data, setters, id parsers and ORM wrappers
/// from annotated declarations.
#[derive(Debug, Parser)]
#[command(name = "repogen", version, about)]
pub struct Cli {
    /// Package directory to generate into
    #[arg(long, env = "REPOGEN_DIR", value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Package snapshot file name inside a package directory
    #[arg(long, env = "REPOGEN_SNAPSHOT", value_name = "FILE", default_value = DEFAULT_SNAPSHOT)]
    pub snapshot: String,

    /// Formatter command reading code on stdin and writing it to stdout
    #[arg(long, env = "REPOGEN_FORMATTER", value_name = "CMD", default_value = DEFAULT_FORMATTER)]
    pub formatter: String,

    /// Write generated code without formatting it
    #[arg(long)]
    pub no_format: bool
}

/// External formatter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Program to run.
    pub program: String,
    /// Arguments passed before any input.
    pub args:    Vec<String>
}

impl Formatter {
    /// Split a command line on whitespace, `None` when it is blank.
    #[must_use]
    pub fn parse(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_owned);
        Some(Self {
            program: words.next()?,
            args:    words.collect()
        })
    }
}

/// Settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Package directory.
    pub dir:       PathBuf,
    /// Snapshot file name inside a package directory.
    pub snapshot:  String,
    /// Formatter, `None` to write unformatted code.
    pub formatter: Option<Formatter>
}

impl Config {
    /// Configuration for `dir` with default snapshot name and formatter.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:       dir.into(),
            snapshot:  DEFAULT_SNAPSHOT.to_owned(),
            formatter: Formatter::parse(DEFAULT_FORMATTER)
        }
    }

    /// Replace the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let formatter = if cli.no_format {
            None
        } else {
            Formatter::parse(&cli.formatter)
        };
        Self {
            dir: cli.dir,
            snapshot: cli.snapshot,
            formatter
        }
    }
}
