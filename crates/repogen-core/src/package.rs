// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Package snapshot model.
//!
//! A [`Package`] is an immutable, fully type-checked picture of one source
//! package as produced by the loader. Every generator reads the same
//! snapshot; nothing in it is mutated after loading.
//!
//! # Structure
//!
//! ```text
//! Package
//! ├── name: String            (short identifier, e.g. "repo")
//! ├── path: String            (unique import path)
//! ├── files: Vec<SourceFile>
//! │   └── comments: Vec<CommentGroup>
//! │       └── comments: Vec<Comment { text, line }>
//! └── decls: Vec<TypeDecl>    (declaration order)
//!     ├── name: String
//!     ├── pos: Position
//!     └── ty: Type            (the definition, see [`Type`])
//! ```
//!
//! Snapshots are plain serde data so the loader can hand them over as JSON.

mod basic;
mod ty;

use std::fmt;

pub use basic::BasicKind;
use serde::{Deserialize, Serialize};
pub use ty::{Field, NamedType, StructType, Type};

/// Source position of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Path of the file, as reported by the loader.
    pub file:   String,
    /// One-based line.
    pub line:   u32,
    /// One-based column.
    pub column: u32
}

impl Position {
    /// Create a position.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single line comment, including its `//` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Raw comment text, e.g. `//repogen:crud`.
    pub text: String,
    /// Line the comment starts on.
    pub line: u32
}

/// Consecutive comments with no blank line or code between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentGroup {
    /// Comments in source order.
    pub comments: Vec<Comment>
}

impl CommentGroup {
    /// Line of the last comment in the group.
    #[must_use]
    pub fn end_line(&self) -> Option<u32> {
        self.comments.last().map(|c| c.line)
    }

    /// Iterate over the raw comment texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.comments.iter().map(|c| c.text.as_str())
    }
}

/// One file of the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the file, matching [`Position::file`] of its declarations.
    pub path:     String,
    /// Every comment group in the file, in source order.
    #[serde(default)]
    pub comments: Vec<CommentGroup>
}

/// Identity of a package as seen from a type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    /// Unique import path.
    pub path: String,
    /// Short name used to qualify identifiers.
    pub name: String
}

impl PackageRef {
    /// Create a package reference.
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into()
        }
    }
}

/// Top-level type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Declared name.
    pub name: String,
    /// Position of the declared name.
    pub pos:  Position,
    /// Definition of the declared type.
    #[serde(rename = "type")]
    pub ty:   Type
}

/// Loaded and type-checked package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Short package name.
    pub name:  String,
    /// Unique import path.
    pub path:  String,
    /// Source files of the package.
    #[serde(default)]
    pub files: Vec<SourceFile>,
    /// Top-level type declarations in declaration order.
    #[serde(default)]
    pub decls: Vec<TypeDecl>
}

impl Package {
    /// Reference to this package, for qualifying and comparing type owners.
    #[must_use]
    pub fn reference(&self) -> PackageRef {
        PackageRef::new(&self.path, &self.name)
    }

    /// Find a top-level declaration by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.iter().find(|d| d.name == name)
    }

    /// Underlying type of a named type.
    ///
    /// Uses the inline underlying type when the loader provided one,
    /// otherwise the declaration of the same name when the named type is
    /// owned by this package.
    #[must_use]
    pub fn underlying<'a>(&'a self, named: &'a NamedType) -> Option<&'a Type> {
        if let Some(underlying) = named.underlying.as_deref() {
            return Some(underlying);
        }

        let owner = named.package.as_ref()?;
        if owner.path != self.path {
            return None;
        }

        self.lookup(&named.name).map(|d| &d.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> Package {
        Package {
            name:  "repo".into(),
            path:  "example.com/app/repo".into(),
            files: vec![],
            decls: vec![TypeDecl {
                name: "UserID".into(),
                pos:  Position::new("ids.go", 3, 6),
                ty:   Type::basic(BasicKind::Int64)
            }]
        }
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new("a.go", 4, 2).to_string(), "a.go:4:2");
    }

    #[test]
    fn underlying_falls_back_to_own_declaration() {
        let pkg = package();
        let named = NamedType::new(Some(pkg.reference()), "UserID");
        assert_eq!(pkg.underlying(&named), Some(&Type::basic(BasicKind::Int64)));
    }

    #[test]
    fn underlying_of_foreign_type_is_unknown() {
        let pkg = package();
        let named = NamedType::new(Some(PackageRef::new("time", "time")), "UserID");
        assert_eq!(pkg.underlying(&named), None);
    }

    #[test]
    fn inline_underlying_wins() {
        let pkg = package();
        let named = NamedType {
            underlying: Some(Box::new(Type::basic(BasicKind::String))),
            ..NamedType::new(Some(PackageRef::new("time", "time")), "UserID")
        };
        assert_eq!(pkg.underlying(&named), Some(&Type::basic(BasicKind::String)));
    }

    #[test]
    fn comment_group_end_line() {
        let group = CommentGroup {
            comments: vec![
                Comment {
                    text: "//repogen:crud".into(),
                    line: 4
                },
                Comment {
                    text: "//repogen:search".into(),
                    line: 5
                }
            ]
        };
        assert_eq!(group.end_line(), Some(5));
        assert_eq!(CommentGroup::default().end_line(), None);
    }
}
