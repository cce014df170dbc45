// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity model builders.
//!
//! Every generator turns the annotated declarations of one package into a
//! serializable model that a template renders. They share one algorithm:
//!
//! ```text
//! for decl in package.decls          (declaration order)
//! ├── directives(decl, module)       skip when empty
//! ├── record(decl)                   must be a struct
//! ├── seed defaults                  <Name>Repository, <Name>s, ...
//! ├── apply directives               unknown sub-directive is fatal
//! ├── walk fields                    tag, audit exclusion, type
//! └── validate                       at least one eligible field
//! ```
//!
//! # Modules
//!
//! | Module | Output | Entity |
//! |--------|--------|--------|
//! | [`crud`] | `crud.repogen.go` | repository interface |
//! | [`search`] | `search.repogen.go` | search criteria struct |
//! | [`setter`] | `setter.repogen.go` | optional-field setter struct |
//! | [`parseid`] | `parse_id.repogen.go` | identifier parse function |
//! | [`bob`] | `<models>/bob.repogen.go` | ORM model wrapper |
//!
//! Builders are pure: they read a [`Context`] and return a model or the
//! first configuration error, attributed to the offending declaration.

pub mod bob;
pub mod crud;
pub mod parseid;
pub mod search;
pub mod setter;

#[cfg(test)]
pub(crate) mod fixture;

use crate::{
    correlate::DirectiveIndex,
    directive::Directive,
    error::{Error, Result},
    package::{Field, Package, StructType, Type, TypeDecl},
    resolve::{base_type, struct_of},
    settyp::Primitives,
    tag::FieldTag
};

/// Identity and audit fields left out of mutate-style outputs by default.
pub const AUDIT_FIELDS: [&str; 10] = [
    "ID",
    "CreatedAt",
    "CreatedBy",
    "CreatedByID",
    "UpdatedAt",
    "UpdatedBy",
    "UpdatedByID",
    "DeletedAt",
    "DeletedBy",
    "DeletedByID"
];

/// Check if `name` is an identity or audit field.
#[must_use]
pub fn is_audit_field(name: &str) -> bool {
    AUDIT_FIELDS.contains(&name)
}

/// Shared, read-only inputs of every builder.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Directive lookup over the scanned package.
    pub index:      &'a DirectiveIndex<'a>,
    /// Primitive type matcher for `settyp` qualification.
    pub primitives: &'a Primitives
}

impl<'a> Context<'a> {
    /// Bundle an index and a primitive matcher.
    #[must_use]
    pub fn new(index: &'a DirectiveIndex<'a>, primitives: &'a Primitives) -> Self {
        Self {
            index,
            primitives
        }
    }

    /// The scanned package.
    #[must_use]
    pub fn package(&self) -> &'a Package {
        self.index.package()
    }

    /// Declarations carrying at least one directive for `module`.
    ///
    /// Yields in package declaration order.
    pub fn annotated(&self, module: &str) -> impl Iterator<Item = (&'a TypeDecl, Vec<Directive>)> {
        let index = self.index;
        self.package()
            .decls
            .iter()
            .map(move |decl| (decl, index.directives(decl, module)))
            .filter(|(_, dirs)| !dirs.is_empty())
    }
}

/// Struct definition behind `decl`.
///
/// # Errors
///
/// Fails when the declaration's base type is not a struct.
pub fn record<'p>(module: &'static str, package: &'p Package, decl: &'p TypeDecl) -> Result<&'p StructType> {
    match base_type(&decl.ty, package) {
        Type::Struct(record) => Ok(record),
        _ => Err(Error::declaration(module, decl, "cannot generate code for non-struct type"))
    }
}

/// Parsed `repogen` tag of `field`.
///
/// # Errors
///
/// Fails when the tag is malformed.
pub fn field_tag(module: &'static str, decl: &TypeDecl, field: &Field) -> Result<FieldTag> {
    FieldTag::from_struct_tag(&field.tag).ok_or_else(|| {
        Error::declaration(module, decl, format!("{}: malformed repogen tag {:?}", field.name, field.tag))
    })
}

/// Field holding the relations record of a model.
pub const RELATIONS_FIELD: &str = "R";

/// Relations record reached through the `R` field of `record`.
#[must_use]
pub fn relations<'p>(package: &'p Package, record: &'p StructType) -> Option<&'p StructType> {
    struct_of(&record.field(RELATIONS_FIELD)?.ty, package)
}

/// Field `rel` of the relations record, attributed to `field` when absent.
///
/// # Errors
///
/// Fails when there is no relations record or it lacks `rel`.
pub fn relation<'p>(
    module: &'static str,
    decl: &TypeDecl,
    relations: Option<&'p StructType>,
    field: &str,
    rel: &str
) -> Result<&'p Field> {
    let Some(relations) = relations else {
        return Err(Error::declaration(
            module,
            decl,
            format!("{field}: field declared as relation, but model has no field \".{RELATIONS_FIELD}\"")
        ));
    };
    relations.field(rel).ok_or_else(|| {
        Error::declaration(
            module,
            decl,
            format!("{field}: field declared as relation, but model has no field \".{RELATIONS_FIELD}.{rel}\"")
        )
    })
}

/// Split `extra <Name> <Type>` arguments.
///
/// A missing type leaves it empty.
#[must_use]
pub fn split_extra(args: &str) -> (&str, &str) {
    args.split_once(' ').unwrap_or((args, ""))
}
