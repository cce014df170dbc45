// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Comment-to-declaration correlation.
//!
//! A comment block annotates a declaration only when its last line sits
//! exactly one line above the declaration:
//!
//! ```text
//!  9 │ //repogen:crud          ← block ends on line 10
//! 10 │ //repogen:search
//! 11 │ type Widget struct {    ← declaration on line 11: annotated
//!
//! 20 │ //repogen:crud          ← block ends on line 20
//! 21 │
//! 22 │ type Gadget struct {    ← blank line between: not annotated
//! ```
//!
//! [`DirectiveIndex`] builds the `(file, end line) → block` table once per
//! package so each lookup is a single hash probe.

use std::collections::HashMap;

use crate::{
    directive::Directive,
    package::{CommentGroup, Package, Position, TypeDecl}
};

/// Line-indexed view of every comment block in a package.
#[derive(Debug)]
pub struct DirectiveIndex<'p> {
    package: &'p Package,
    by_end:  HashMap<(&'p str, u32), &'p CommentGroup>
}

impl<'p> DirectiveIndex<'p> {
    /// Index every comment block of `package` by file and last line.
    ///
    /// When two blocks end on the same line the first one in source order
    /// is kept.
    #[must_use]
    pub fn new(package: &'p Package) -> Self {
        let mut by_end = HashMap::new();

        for file in &package.files {
            for group in &file.comments {
                if let Some(end) = group.end_line() {
                    by_end.entry((file.path.as_str(), end)).or_insert(group);
                }
            }
        }

        Self {
            package,
            by_end
        }
    }

    /// The indexed package.
    #[must_use]
    pub fn package(&self) -> &'p Package {
        self.package
    }

    /// Comment block ending on the line right above `pos`.
    #[must_use]
    pub fn block_before(&self, pos: &Position) -> Option<&'p CommentGroup> {
        let line = pos.line.checked_sub(1)?;
        self.by_end.get(&(pos.file.as_str(), line)).copied()
    }

    /// Directives for `module` attached to whatever is declared at `pos`.
    ///
    /// Returns an empty list when no block is adjacent or none of its
    /// directives targets `module`. Original order is preserved.
    #[must_use]
    pub fn directives_at(&self, pos: &Position, module: &str) -> Vec<Directive> {
        let Some(block) = self.block_before(pos) else {
            return Vec::new();
        };

        Directive::parse_all(block.texts())
            .into_iter()
            .filter(|d| d.module == module)
            .collect()
    }

    /// Directives for `module` attached to `decl`.
    #[must_use]
    pub fn directives(&self, decl: &TypeDecl, module: &str) -> Vec<Directive> {
        self.directives_at(&decl.pos, module)
    }

    /// Every `module:directive` comment anywhere in the package.
    ///
    /// Used for package-level directives that are not tied to a
    /// declaration. Each result carries the position of its comment.
    #[must_use]
    pub fn package_directives(&self, module: &str, directive: &str) -> Vec<(Position, Directive)> {
        let mut found = Vec::new();

        for file in &self.package.files {
            for comment in file.comments.iter().flat_map(|g| &g.comments) {
                let Some(dir) = Directive::parse(&comment.text) else {
                    continue;
                };
                if dir.module == module && dir.directive == directive {
                    found.push((Position::new(&file.path, comment.line, 1), dir));
                }
            }
        }

        found
    }
}
