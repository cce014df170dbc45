// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Errors of a generator run.
//!
//! Configuration errors come from [`repogen_core::Error`]; everything that
//! touches the outside world (snapshots, templates, files, the formatter)
//! is added here. A run reports every failing generator at once:
//!
//! ```text
//! models.go:12:6: crud: Widget: need at least one pk
//! search: formatter failed: <stdin>:3:1: expected declaration
//! ```

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for generator runs.
pub type Result<T> = std::result::Result<T, Error>;

/// Generator run error.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid annotations or types.
    #[error(transparent)]
    Core(#[from] repogen_core::Error),

    /// A package snapshot could not be parsed.
    #[error("{}: invalid package snapshot: {source}", .path.display())]
    Snapshot {
        /// Snapshot file.
        path:   PathBuf,
        /// Parse failure.
        source: serde_json::Error
    },

    /// Template compilation or rendering failed.
    #[error("template {template}: {source}")]
    Render {
        /// Template name.
        template: &'static str,
        /// Tera failure.
        source:   tera::Error
    },

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File involved.
        path:   PathBuf,
        /// Underlying failure.
        source: io::Error
    },

    /// The formatter could not be run.
    #[error("{module}: cannot run formatter {program:?}: {source}")]
    Spawn {
        /// Generator module.
        module:  &'static str,
        /// Formatter program.
        program: String,
        /// Underlying failure.
        source:  io::Error
    },

    /// The formatter rejected the generated code.
    ///
    /// The unformatted output has been written for inspection.
    #[error("{module}: formatter failed: {stderr}")]
    Format {
        /// Generator module.
        module: &'static str,
        /// Formatter diagnostics.
        stderr: String
    },

    /// Several generators failed.
    #[error("{}", join(.0))]
    Errors(Vec<Error>)
}

impl Error {
    /// I/O error on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source
        }
    }

    /// Collapse collected errors into one, `None` when there are none.
    #[must_use]
    pub fn join_all(mut errors: Vec<Error>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Errors(errors))
        }
    }
}

fn join(errors: &[Error]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}
