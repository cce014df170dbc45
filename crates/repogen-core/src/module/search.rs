// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Search criteria model.
//!
//! ```text
//! //repogen:search [<SearchType>]
//! //repogen:search:extra <Name> <Type>
//! type Widget struct {
//!     Name      string     `repogen:"search"`                       → Name
//!     CreatedAt time.Time  `repogen:"search:'range'"`               → CreatedAtFrom, CreatedAtUntil
//!     Price     *int64     `repogen:"search:'range Min Max'"`       → Min, Max
//!     Owner     *User      `repogen:"search rel:'Owner'"`           → Owner, checked against R.Owner
//! }
//! ```
//!
//! Pointer fields are searched as `omitnull.Val[T]`, everything else as
//! `omit.Val[T]`. Extra fields come first, then tagged fields in field
//! order.

use serde::Serialize;
use tracing::debug;

use super::{Context, field_tag, record, relation, relations, split_extra};
use crate::{
    error::{Error, Result},
    package::{Field as StructField, Package, StructType, TypeDecl},
    resolve::unptr
};

/// Module name of the generator.
pub const MODULE: &str = "search";

/// Model of `search.repogen.go`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Data {
    /// Package the file is generated into.
    pub package:  String,
    /// Search entities in declaration order.
    pub entities: Vec<Entity>
}

/// Search criteria struct of one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Struct name, `<Name>SearchData` by default.
    pub search_type: String,
    /// Criteria fields.
    pub fields:      Vec<Field>
}

/// One search criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Criterion name.
    pub name: String,
    /// Printable criterion type.
    #[serde(rename = "type")]
    pub ty:   String,
    /// Relation on the model's `R` record, empty if none.
    pub rel:  String
}

impl Field {
    fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty:   ty.into(),
            rel:  String::new()
        }
    }
}

/// Build the search model of the scanned package.
///
/// # Errors
///
/// Returns the first configuration error of any annotated declaration.
pub fn build(ctx: &Context<'_>) -> Result<Data> {
    let package = ctx.package();

    let mut entities = Vec::new();
    for (decl, dirs) in ctx.annotated(MODULE) {
        let record = record(MODULE, package, decl)?;

        let mut entity = Entity {
            search_type: format!("{}SearchData", decl.name),
            fields:      Vec::new()
        };

        for dir in dirs {
            match dir.directive.as_str() {
                "" => {
                    if !dir.args.is_empty() {
                        entity.search_type = dir.args;
                    }
                }
                "extra" => {
                    let (name, ty) = split_extra(&dir.args);
                    entity.fields.push(Field::new(name, ty));
                }
                other => {
                    return Err(Error::declaration(MODULE, decl, format!("unrecognized directive {other:?}")));
                }
            }
        }

        entity.fields.extend(search_fields(package, decl, record)?);
        if entity.fields.is_empty() {
            return Err(Error::declaration(MODULE, decl, "need at least one search field"));
        }

        debug!(entity = %decl.name, search_type = %entity.search_type, fields = entity.fields.len(), "search entity");
        entities.push(entity);
    }

    Ok(Data {
        package: package.name.clone(),
        entities
    })
}

fn search_fields(package: &Package, decl: &TypeDecl, record: &StructType) -> Result<Vec<Field>> {
    let relations = relations(package, record);

    let mut fields = Vec::new();
    for field in &record.fields {
        let tag = field_tag(MODULE, decl, field)?;
        let Some(search) = tag.get("search") else {
            continue;
        };

        let ty = option_type(package, decl, field)?;
        let rel = tag.value("rel");
        if !rel.is_empty() {
            relation(MODULE, decl, relations, &field.name, rel)?;
        }

        let words: Vec<&str> = search.split(' ').collect();
        let names = match words.as_slice() {
            [""] => vec![field.name.clone()],
            ["range"] => vec![format!("{}From", field.name), format!("{}Until", field.name)],
            ["range", from, until] => vec![(*from).to_owned(), (*until).to_owned()],
            ["range", ..] => {
                return Err(Error::declaration(
                    MODULE,
                    decl,
                    format!("{}: invalid range directive, need two or no names after range", field.name)
                ));
            }
            _ => {
                return Err(Error::declaration(
                    MODULE,
                    decl,
                    format!("{}: invalid search directive {search:?}", field.name)
                ));
            }
        };

        fields.extend(names.into_iter().map(|name| Field {
            name,
            ty: ty.clone(),
            rel: rel.to_owned()
        }));
    }
    Ok(fields)
}

fn option_type(package: &Package, decl: &TypeDecl, field: &StructField) -> Result<String> {
    let unptr = unptr(&field.ty, &package.path).ok_or_else(|| {
        Error::declaration(MODULE, decl, format!("{}: cannot search for unnamed type", field.name))
    })?;
    Ok(if unptr.is_pointer {
        format!("omitnull.Val[{}]", unptr.name)
    } else {
        format!("omit.Val[{}]", unptr.name)
    })
}
