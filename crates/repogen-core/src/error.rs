// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Errors raised while building entity models.
//!
//! Every configuration error is attributed to a source position so the
//! message reads like a compiler diagnostic:
//!
//! ```text
//! models.go:12:6: crud: Widget: need at least one pk
//! └─ position ─┘ └ module ┘ └ decl ┘ └── message ──┘
//! ```

use thiserror::Error;

use crate::package::{Position, TypeDecl};

/// Result alias for model building.
pub type Result<T> = std::result::Result<T, Error>;

/// Model building error.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration of one annotated declaration.
    ///
    /// No entity is produced for the declaration.
    #[error("{pos}: {module}: {decl}: {message}")]
    Declaration {
        /// Position of the declaration.
        pos:     Position,
        /// Generator module that rejected it.
        module:  &'static str,
        /// Declared name.
        decl:    String,
        /// What is wrong.
        message: String
    },

    /// Invalid package-level directive.
    #[error("{pos}: {module}: {message}")]
    Directive {
        /// Position of the directive comment.
        pos:     Position,
        /// Generator module that rejected it.
        module:  &'static str,
        /// What is wrong.
        message: String
    },

    /// The primitive type pattern failed to compile.
    #[error("invalid primitive type pattern: {0}")]
    Pattern(#[from] regex::Error)
}

impl Error {
    /// Configuration error attributed to `decl`.
    pub fn declaration(module: &'static str, decl: &TypeDecl, message: impl Into<String>) -> Self {
        Self::Declaration {
            pos: decl.pos.clone(),
            module,
            decl: decl.name.clone(),
            message: message.into()
        }
    }

    /// Error attributed to a package-level directive at `pos`.
    pub fn directive(module: &'static str, pos: Position, message: impl Into<String>) -> Self {
        Self::Directive {
            pos,
            module,
            message: message.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Type;

    #[test]
    fn declaration_error_display() {
        let decl = TypeDecl {
            name: "Widget".into(),
            pos:  Position::new("models.go", 12, 6),
            ty:   Type::record(vec![])
        };
        let err = Error::declaration("crud", &decl, "need at least one pk");
        assert_eq!(err.to_string(), "models.go:12:6: crud: Widget: need at least one pk");
    }

    #[test]
    fn directive_error_display() {
        let err = Error::directive("bob", Position::new("doc.go", 3, 1), "models: no such package");
        assert_eq!(err.to_string(), "doc.go:3:1: bob: models: no such package");
    }
}
