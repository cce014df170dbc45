// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `repogen` command line.

use std::process::ExitCode;

use clap::Parser;
use repogen::{Cli, Config, SnapshotLoader};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repogen=info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Cli::parse());
    let loader = SnapshotLoader::new(config.snapshot.clone());

    match repogen::run(&config, &loader) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
