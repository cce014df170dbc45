// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # repogen
//!
//! Directive-driven generator for repository interfaces, search criteria,
//! setters, identifier parsers and ORM model wrappers.
//!
//! ## Quick Start
//!
//! Annotate declarations in the target package:
//!
//! ```go
//! //repogen:crud
//! //repogen:search
//! //repogen:setter
//! type Widget struct {
//!     ID   WidgetID `repogen:"pk"`
//!     Name string   `repogen:"search"`
//! }
//!
//! //repogen:parseid
//! type WidgetID int64
//! ```
//!
//! Export a package snapshot next to the sources and run `repogen` in that
//! directory. It writes `crud.repogen.go`, `search.repogen.go`,
//! `setter.repogen.go` and `parse_id.repogen.go`, plus
//! `<models>/bob.repogen.go` for every `//repogen:bob:models <models>`
//! comment.
//!
//! ## Waves
//!
//! ```text
//! load ──► parseid ┐
//!      ├─► crud    │ parallel, all awaited
//!      ├─► search  │
//!      └─► setter  ┘
//!                  │ any failure stops here
//! reload ──► bob (per models package)
//! ```
//!
//! The ORM wrappers reference generated setters, so they see a fresh
//! snapshot taken after the first wave has written its files.

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod loader;
pub mod render;

use rayon::prelude::*;
use repogen_core::{Context, DirectiveIndex, Primitives, module::bob};
use tracing::{debug, info};

pub use crate::{
    config::{Cli, Config, Formatter},
    error::{Error, Result},
    generator::{Bob, Generator, Outcome},
    loader::{PackageLoader, SnapshotLoader}
};
use crate::render::Renderer;

/// Run every generator over the package in `config.dir`.
///
/// Returns one [`Outcome`] per emitted or removed file, first wave first.
///
/// # Errors
///
/// Returns the failure of a single generator as is, and several failures
/// as [`Error::Errors`].
pub fn run(config: &Config, loader: &dyn PackageLoader) -> Result<Vec<Outcome>> {
    let renderer = Renderer::new()?;
    let primitives = Primitives::new()?;

    let mut outcomes = first_wave(config, loader, &renderer, &primitives)?;
    outcomes.extend(second_wave(config, loader, &renderer, &primitives)?);

    info!(files = outcomes.len(), "done");
    Ok(outcomes)
}

fn first_wave(
    config: &Config,
    loader: &dyn PackageLoader,
    renderer: &Renderer,
    primitives: &Primitives
) -> Result<Vec<Outcome>> {
    let package = loader.load(&config.dir)?;
    let index = DirectiveIndex::new(&package);
    let ctx = Context::new(&index, primitives);

    let results: Vec<Result<Outcome>> = generator::first_wave()
        .par_iter()
        .map(|generator| {
            debug!(module = generator.module(), "generating");
            generator.generate(&ctx, renderer, config)
        })
        .collect();

    collect(results)
}

fn second_wave(
    config: &Config,
    loader: &dyn PackageLoader,
    renderer: &Renderer,
    primitives: &Primitives
) -> Result<Vec<Outcome>> {
    let package = loader.load(&config.dir)?;
    let index = DirectiveIndex::new(&package);
    let ctx = Context::new(&index, primitives);

    let results = bob::models_directives(&index)
        .into_iter()
        .map(|directive| -> Result<Outcome> {
            let models_dir = config.dir.join(&directive.dir);
            let models = loader.load(&models_dir).map_err(|err| {
                repogen_core::Error::directive(
                    bob::MODULE,
                    directive.pos.clone(),
                    format!("cannot load models package {:?}: {err}", directive.dir)
                )
            })?;
            Bob.generate(&ctx, &models, &models_dir, renderer, config)
        })
        .collect();

    collect(results)
}

fn collect(results: Vec<Result<Outcome>>) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => errors.push(err)
        }
    }

    match Error::join_all(errors) {
        Some(err) => Err(err),
        None => Ok(outcomes)
    }
}
