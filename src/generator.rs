// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generators.
//!
//! A generator builds one entity model from the scanned package, renders it
//! and emits a single file. The first-wave generators only read the scanned
//! package and run in parallel; [`Bob`] additionally loads a models package
//! and runs afterwards.
//!
//! | Generator | Template | Output |
//! |-----------|----------|--------|
//! | [`Crud`] | `crud.go.tera` | `crud.repogen.go` |
//! | [`Search`] | `search.go.tera` | `search.repogen.go` |
//! | [`Setter`] | `setter.go.tera` | `setter.repogen.go` |
//! | [`ParseId`] | `parse_id.go.tera` | `parse_id.repogen.go` |
//! | [`Bob`] | `bob.go.tera` | `<models>/bob.repogen.go` |

use std::path::{Path, PathBuf};

use repogen_core::{
    Context, Package,
    module::{bob, crud, parseid, search, setter}
};
use serde::Serialize;
use tracing::info;

use crate::{
    config::Config,
    emit,
    error::Result,
    render::{self, Renderer}
};

/// A rendered entity model.
pub trait Model: Serialize {
    /// Number of generated entities.
    fn len(&self) -> usize;

    /// Whether the output file should be removed instead of written.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Model for crud::Data {
    fn len(&self) -> usize {
        self.entities.len()
    }
}

impl Model for search::Data {
    fn len(&self) -> usize {
        self.entities.len()
    }
}

impl Model for setter::Data {
    fn len(&self) -> usize {
        self.entities.len()
    }
}

impl Model for parseid::Data {
    fn len(&self) -> usize {
        self.ids.len()
    }
}

impl Model for bob::Data {
    fn len(&self) -> usize {
        self.entities.len()
    }
}

/// Result of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Generator module.
    pub module:   &'static str,
    /// Output file.
    pub path:     PathBuf,
    /// Number of generated entities, zero when the file was removed.
    pub entities: usize
}

/// A first-wave generator.
pub trait Generator: Sync {
    /// Module name used in directives and diagnostics.
    fn module(&self) -> &'static str;

    /// File name of the output, relative to the scanned package.
    fn file_name(&self) -> &'static str;

    /// Build, render and emit the output for the scanned package.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error, or a render or emit error.
    fn generate(&self, ctx: &Context<'_>, renderer: &Renderer, config: &Config) -> Result<Outcome>;
}

/// Repository interfaces.
#[derive(Debug, Clone, Copy)]
pub struct Crud;

/// Search criteria structs.
#[derive(Debug, Clone, Copy)]
pub struct Search;

/// Setter structs.
#[derive(Debug, Clone, Copy)]
pub struct Setter;

/// Identifier parse functions.
#[derive(Debug, Clone, Copy)]
pub struct ParseId;

static CRUD: Crud = Crud;
static SEARCH: Search = Search;
static SETTER: Setter = Setter;
static PARSE_ID: ParseId = ParseId;

/// Generators that only read the scanned package.
#[must_use]
pub fn first_wave() -> [&'static dyn Generator; 4] {
    [&PARSE_ID, &CRUD, &SEARCH, &SETTER]
}

impl Generator for Crud {
    fn module(&self) -> &'static str {
        crud::MODULE
    }

    fn file_name(&self) -> &'static str {
        "crud.repogen.go"
    }

    fn generate(&self, ctx: &Context<'_>, renderer: &Renderer, config: &Config) -> Result<Outcome> {
        let data = crud::build(ctx)?;
        emit_model(self.module(), render::CRUD, config.dir.join(self.file_name()), &data, renderer, config)
    }
}

impl Generator for Search {
    fn module(&self) -> &'static str {
        search::MODULE
    }

    fn file_name(&self) -> &'static str {
        "search.repogen.go"
    }

    fn generate(&self, ctx: &Context<'_>, renderer: &Renderer, config: &Config) -> Result<Outcome> {
        let data = search::build(ctx)?;
        emit_model(self.module(), render::SEARCH, config.dir.join(self.file_name()), &data, renderer, config)
    }
}

impl Generator for Setter {
    fn module(&self) -> &'static str {
        setter::MODULE
    }

    fn file_name(&self) -> &'static str {
        "setter.repogen.go"
    }

    fn generate(&self, ctx: &Context<'_>, renderer: &Renderer, config: &Config) -> Result<Outcome> {
        let data = setter::build(ctx)?;
        emit_model(self.module(), render::SETTER, config.dir.join(self.file_name()), &data, renderer, config)
    }
}

impl Generator for ParseId {
    fn module(&self) -> &'static str {
        parseid::MODULE
    }

    fn file_name(&self) -> &'static str {
        "parse_id.repogen.go"
    }

    fn generate(&self, ctx: &Context<'_>, renderer: &Renderer, config: &Config) -> Result<Outcome> {
        let data = parseid::build(ctx)?;
        emit_model(self.module(), render::PARSE_ID, config.dir.join(self.file_name()), &data, renderer, config)
    }
}

/// ORM model wrappers, emitted into the models package.
#[derive(Debug, Clone, Copy)]
pub struct Bob;

impl Bob {
    /// File name of the output, relative to the models package.
    pub const FILE_NAME: &'static str = "bob.repogen.go";

    /// Build, render and emit the wrappers between the scanned package and
    /// the models package loaded from `models_dir`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error, or a render or emit error.
    pub fn generate(
        &self,
        ctx: &Context<'_>,
        models: &Package,
        models_dir: &Path,
        renderer: &Renderer,
        config: &Config
    ) -> Result<Outcome> {
        let data = bob::build(ctx, models)?;
        emit_model(bob::MODULE, render::BOB, models_dir.join(Self::FILE_NAME), &data, renderer, config)
    }
}

fn emit_model<M: Model>(
    module: &'static str,
    template: &'static str,
    path: PathBuf,
    data: &M,
    renderer: &Renderer,
    config: &Config
) -> Result<Outcome> {
    if data.is_empty() {
        emit::remove(&path)?;
        info!(module, path = %path.display(), "nothing to generate");
        return Ok(Outcome {
            module,
            path,
            entities: 0
        });
    }

    let text = renderer.render(template, data)?;
    emit::write(module, &path, &text, config.formatter.as_ref())?;
    info!(module, path = %path.display(), entities = data.len(), "generated");
    Ok(Outcome {
        module,
        path,
        entities: data.len()
    })
}
