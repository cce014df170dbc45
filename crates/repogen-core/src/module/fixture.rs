// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Package snapshots for builder tests.

use super::Context;
use crate::{
    correlate::DirectiveIndex,
    package::{Comment, CommentGroup, Package, PackageRef, Position, SourceFile, Type, TypeDecl},
    settyp::Primitives
};

pub const FILE: &str = "models.go";
pub const REPO: &str = "example.com/app/repo";
pub const MODELS: &str = "example.com/app/models";

/// Lays declarations out one after another in a single file, each with its
/// comment block right above it and a blank line in between.
pub struct PackageBuilder {
    package: Package,
    line:    u32
}

impl PackageBuilder {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            package: Package {
                name:  name.into(),
                path:  path.into(),
                files: vec![SourceFile {
                    path:     FILE.into(),
                    comments: vec![]
                }],
                decls: vec![]
            },
            line:    1
        }
    }

    pub fn repo() -> Self {
        Self::new(REPO, "repo")
    }

    pub fn models() -> Self {
        Self::new(MODELS, "models")
    }

    pub fn reference(&self) -> PackageRef {
        self.package.reference()
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.line += 2;
        self.push_group(&[text]);
        self
    }

    pub fn decl(mut self, comments: &[&str], name: &str, ty: Type) -> Self {
        self.line += 1;
        self.push_group(comments);
        self.line += 1;
        self.package.decls.push(TypeDecl {
            name: name.into(),
            pos:  Position::new(FILE, self.line, 6),
            ty
        });
        self
    }

    pub fn build(self) -> Package {
        self.package
    }

    fn push_group(&mut self, texts: &[&str]) {
        if texts.is_empty() {
            return;
        }
        let mut comments = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            if i > 0 {
                self.line += 1;
            }
            comments.push(Comment {
                text: (*text).into(),
                line: self.line
            });
        }
        self.package.files[0].comments.push(CommentGroup {
            comments
        });
    }
}

/// Run `f` against a context over `package`.
pub fn with_context<T>(package: &Package, f: impl FnOnce(&Context<'_>) -> T) -> T {
    let index = DirectiveIndex::new(package);
    let primitives = Primitives::new().unwrap();
    f(&Context::new(&index, &primitives))
}
