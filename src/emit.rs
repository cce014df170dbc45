// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Output files.
//!
//! Rendered text goes through the configured formatter before it is
//! written. A formatter failure still leaves the unformatted text on disk so
//! it can be inspected.

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::{Command, Stdio},
    thread
};

use tracing::{debug, warn};

use crate::{
    config::Formatter,
    error::{Error, Result}
};

/// Remove a previously generated file.
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file exists but cannot be removed.
pub fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale output");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Error::io(path, err))
    }
}

/// Format `text` and write it to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be written,
/// [`Error::Spawn`] when the formatter cannot be started and
/// [`Error::Format`] with the formatter's diagnostics when it fails.
pub fn write(module: &'static str, path: &Path, text: &str, formatter: Option<&Formatter>) -> Result<()> {
    let Some(formatter) = formatter else {
        return write_file(path, text);
    };

    match format(module, formatter, text) {
        Ok(formatted) => write_file(path, &formatted),
        Err(Error::Format {
            module,
            stderr
        }) => {
            warn!(module, path = %path.display(), "formatter failed, writing unformatted output");
            write_file(path, text)?;
            Err(Error::Format {
                module,
                stderr
            })
        }
        Err(err) => Err(err)
    }
}

/// Pipe `text` through `formatter` and collect its output.
///
/// Standard input is fed from a separate thread while the output streams
/// are drained, so neither side blocks on a full pipe.
///
/// # Errors
///
/// Returns [`Error::Spawn`] when the formatter cannot be started and
/// [`Error::Format`] when it exits unsuccessfully or reports anything on
/// standard error.
pub fn format(module: &'static str, formatter: &Formatter, text: &str) -> Result<String> {
    let spawn = |source| Error::Spawn {
        module,
        program: formatter.program.clone(),
        source
    };

    let mut child = Command::new(&formatter.program)
        .args(&formatter.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn)?;

    let stdin = child.stdin.take();
    let output = thread::scope(|scope| {
        if let Some(mut stdin) = stdin {
            scope.spawn(move || {
                let _ = stdin.write_all(text.as_bytes());
            });
        }
        child.wait_with_output()
    })
    .map_err(spawn)?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_owned();
    if !stderr.is_empty() {
        return Err(Error::Format {
            module,
            stderr
        });
    }
    if !output.status.success() {
        return Err(Error::Format {
            module,
            stderr: output.status.to_string()
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::io(path, source))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str) -> Formatter {
        Formatter {
            program: "sh".into(),
            args:    vec!["-c".into(), script.into()]
        }
    }

    #[test]
    fn write_without_formatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");

        write("crud", &path, "package repo\n", None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "package repo\n");
    }

    #[test]
    fn formatter_output_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");

        write("crud", &path, "package repo\n", Some(&shell("tr a-z A-Z"))).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "PACKAGE REPO\n");
    }

    #[test]
    fn formatter_passes_large_input_through() {
        let text = "x".repeat(1 << 20);
        let formatter = Formatter {
            program: "cat".into(),
            args:    vec![]
        };
        assert_eq!(format("crud", &formatter, &text).unwrap().len(), text.len());
    }

    #[test]
    fn failing_formatter_keeps_unformatted_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");

        let err = write("search", &path, "package repo\n", Some(&shell("cat >/dev/null; echo bad >&2; exit 1"))).unwrap_err();
        assert_eq!(err.to_string(), "search: formatter failed: bad");
        assert_eq!(fs::read_to_string(&path).unwrap(), "package repo\n");
    }

    #[test]
    fn silent_nonzero_exit_is_a_failure() {
        let err = format("setter", &shell("cat >/dev/null; exit 3"), "x").unwrap_err();
        assert!(matches!(err, Error::Format { module: "setter", .. }));
    }

    #[test]
    fn missing_formatter() {
        let formatter = Formatter {
            program: "repogen-no-such-formatter".into(),
            args:    vec![]
        };
        let err = format("crud", &formatter, "x").unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn remove_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.go");

        remove(&path).unwrap();
        fs::write(&path, "stale").unwrap();
        remove(&path).unwrap();
        assert!(!path.exists());
    }
}
