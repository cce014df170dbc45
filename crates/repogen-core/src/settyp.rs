// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Setter type selection.
//!
//! The type a setter exposes for a field comes from either the field's
//! declared type or an explicit `settyp` tag:
//!
//! ```text
//! Owner  *Account `repogen:"rel:'Owner'"`          → *AccountSetter
//! Tags   []string `repogen:"settyp:'[]Tag'"`       → []repo.Tag (printed from models)
//! Score  float64  `repogen:"settyp:'*float32'"`    → *float32
//! ```
//!
//! Override strings are qualified with the tag's package only when they are
//! unqualified, the tag's package is not the printing package and they do
//! not name a primitive.

use regex::Regex;
use serde::Serialize;

use crate::{
    error::Result,
    package::{PackageRef, Type},
    resolve::qualified_name,
    tag::FieldTag
};

/// Primitive type names, optionally behind a pointer and a slice.
const PRIMITIVE_PATTERN: &str =
    r"^\*?(?:\[\])?(?:bool|string|u?int(?:8|16|32|64)?|float(?:32|64)|complex(?:64|128))$";

/// Suffix appended to relation field types.
pub const SETTER_SUFFIX: &str = "Setter";

/// Compiled primitive type matcher.
///
/// Built once per run and shared by every generator.
#[derive(Debug, Clone)]
pub struct Primitives {
    pattern: Regex
}

impl Primitives {
    /// Compile the primitive pattern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Pattern`] if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(PRIMITIVE_PATTERN)?
        })
    }

    /// Check if `ty` spells a primitive type.
    #[must_use]
    pub fn is_primitive(&self, ty: &str) -> bool {
        self.pattern.is_match(ty)
    }
}

/// Type a setter uses for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetterType {
    /// Full printable type.
    #[serde(rename = "type")]
    pub ty:       String,
    /// Outermost layer is a pointer.
    pub is_ptr:   bool,
    /// A slice layer, directly or right behind the pointer.
    pub is_slice: bool
}

impl SetterType {
    /// Select the setter type of a field.
    ///
    /// `printing` is the package the generated code lives in, `tag_pkg` the
    /// package whose field carries `tag`. Returns `None` when no override
    /// is given and the declared type cannot be printed.
    #[must_use]
    pub fn select(
        primitives: &Primitives,
        printing: &str,
        tag_pkg: &PackageRef,
        tag: &FieldTag,
        field_ty: &Type
    ) -> Option<Self> {
        let settyp = tag.value("settyp");
        if !settyp.is_empty() {
            return Some(Self::from_override(primitives, printing, tag_pkg, settyp));
        }

        let mut ty = qualified_name(field_ty, printing)?;
        if !tag.value("rel").is_empty() {
            ty.push_str(SETTER_SUFFIX);
        }

        Some(Self {
            ty,
            is_ptr: field_ty.is_pointer(),
            is_slice: field_ty.is_slice()
        })
    }

    /// Interpret an explicit `settyp` override.
    fn from_override(primitives: &Primitives, printing: &str, tag_pkg: &PackageRef, settyp: &str) -> Self {
        let is_ptr = settyp.starts_with('*');
        let unptr = settyp.strip_prefix('*').unwrap_or(settyp);
        let is_slice = unptr.starts_with("[]");

        let qualify = !settyp.contains('.') && tag_pkg.path != printing && !primitives.is_primitive(settyp);
        let ty = if qualify {
            let bare = unptr.strip_prefix("[]").unwrap_or(unptr);
            let mut ty = String::with_capacity(settyp.len() + tag_pkg.name.len() + 1);
            if is_ptr {
                ty.push('*');
            }
            if is_slice {
                ty.push_str("[]");
            }
            ty.push_str(&tag_pkg.name);
            ty.push('.');
            ty.push_str(bare);
            ty
        } else {
            settyp.to_owned()
        };

        Self {
            ty,
            is_ptr,
            is_slice
        }
    }

    /// Type without its pointer layer.
    #[must_use]
    pub fn unptr(&self) -> &str {
        if self.is_ptr { &self.ty[1..] } else { &self.ty }
    }

    /// Type without its pointer and slice layers.
    #[must_use]
    pub fn unslice(&self) -> &str {
        match (self.is_slice, self.is_ptr) {
            (true, true) => &self.ty[3..],
            (true, false) => &self.ty[2..],
            _ => &self.ty
        }
    }

    /// Element type: slice element first, pointee second.
    #[must_use]
    pub fn elem(&self) -> &str {
        if self.is_slice {
            self.unslice()
        } else if self.is_ptr {
            self.unptr()
        } else {
            &self.ty
        }
    }

    /// Optional-value container the setter field is declared with.
    ///
    /// Pointers become `omitnull.Val[T]`, everything else `omit.Val[T]`.
    #[must_use]
    pub fn option_type(&self) -> String {
        if self.is_ptr {
            format!("omitnull.Val[{}]", self.unptr())
        } else {
            format!("omit.Val[{}]", self.ty)
        }
    }
}
