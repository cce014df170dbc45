// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Template rendering.
//!
//! All templates are compiled into the binary and parsed once into a
//! [`Renderer`] that every generator borrows.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{Error, Result};

/// Repository interfaces.
pub const CRUD: &str = "crud.go.tera";
/// Search criteria structs.
pub const SEARCH: &str = "search.go.tera";
/// Setter structs.
pub const SETTER: &str = "setter.go.tera";
/// Identifier parse functions.
pub const PARSE_ID: &str = "parse_id.go.tera";
/// ORM model wrappers.
pub const BOB: &str = "bob.go.tera";

const TEMPLATES: [(&str, &str); 5] = [
    (CRUD, include_str!("../templates/crud.go.tera")),
    (SEARCH, include_str!("../templates/search.go.tera")),
    (SETTER, include_str!("../templates/setter.go.tera")),
    (PARSE_ID, include_str!("../templates/parse_id.go.tera")),
    (BOB, include_str!("../templates/bob.go.tera"))
];

/// Compiled generator templates.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera
}

impl Renderer {
    /// Compile every embedded template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when a template does not parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        for (name, source) in TEMPLATES {
            tera.add_raw_template(name, source).map_err(|source| Error::Render {
                template: name,
                source
            })?;
        }
        tera.autoescape_on(Vec::new());
        Ok(Self {
            tera
        })
    }

    /// Render `template` with the fields of `data` as variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when `data` does not serialize to a map or
    /// the template fails.
    pub fn render<T: Serialize>(&self, template: &'static str, data: &T) -> Result<String> {
        let render = |source| Error::Render {
            template,
            source
        };
        let context = Context::from_serialize(data).map_err(render)?;
        self.tera.render(template, &context).map_err(render)
    }
}
