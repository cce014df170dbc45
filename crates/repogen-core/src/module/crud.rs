// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository interface model.
//!
//! # Directives
//!
//! ```text
//! //repogen:crud [create] [get] [search] [edit] [delete]   (empty = all)
//! //repogen:crud:extra <method line>
//! //repogen:crud:search <SearchType>
//! //repogen:crud:repository <Name>
//! //repogen:crud:plural <Plural>
//! //repogen:crud:*by <Type>
//! //repogen:crud:createdby <Type>
//! //repogen:crud:updatedby <Type>
//! //repogen:crud:deletedby <Type>
//! //repogen:plural <Plural>
//! ```
//!
//! Package-wide `//repogen:repo:extra` and `//repogen:repo:base` comments
//! feed the file-level [`Data::extra`] and [`Data::base`] lists.
//!
//! # Fields
//!
//! Fields tagged `pk` become the primary key parameters, named in
//! lowerCamel case. At least one is required.

use convert_case::{Case, Casing};
use serde::Serialize;
use tracing::debug;

use super::{Context, field_tag, record};
use crate::{
    directive::Directive,
    error::{Error, Result},
    package::{Package, StructType, TypeDecl},
    resolve::qualified_name
};

/// Module name of the generator.
pub const MODULE: &str = "crud";

/// Module of the standalone plural directive.
pub const PLURAL_MODULE: &str = "plural";

/// Module of the package-wide repository directives.
pub const REPO_MODULE: &str = "repo";

/// Model of `crud.repogen.go`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Data {
    /// Package the file is generated into.
    pub package:  String,
    /// Repository entities in declaration order.
    pub entities: Vec<Entity>,
    /// Extra lines for the shared repository interface.
    pub extra:    Vec<String>,
    /// Interfaces embedded into the shared repository interface.
    pub base:     Vec<String>
}

/// Repository interface of one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Interface name, `<Name>Repository` by default.
    pub repository:      String,
    /// Declared name.
    pub singular:        String,
    /// Plural used in method names, `<Name>s` by default.
    pub plural:          String,
    /// Generate `Create<Name>`.
    pub create:          bool,
    /// Generate `<Name>`.
    pub get:             bool,
    /// Generate `Search<Plural>`.
    pub search:          bool,
    /// Generate `Edit<Name>`.
    pub edit:            bool,
    /// Generate `Delete<Name>`.
    pub delete:          bool,
    /// Type of the creating user.
    pub created_by_type: String,
    /// Type of the updating user.
    pub updated_by_type: String,
    /// Type of the deleting user.
    pub deleted_by_type: String,
    /// Extra interface method lines.
    pub extra:           Vec<String>,
    /// Search criteria type, `<Name>SearchData` by default.
    pub search_type:     String,
    /// Primary key parameters in field order.
    pub pks:             Vec<Param>
}

impl Entity {
    fn new(name: &str) -> Self {
        Self {
            repository: format!("{name}Repository"),
            singular: name.to_owned(),
            plural: format!("{name}s"),
            search_type: format!("{name}SearchData"),
            ..Self::default()
        }
    }

    fn enable_ops(&mut self, decl: &TypeDecl, dir: &Directive) -> Result<()> {
        if dir.args.is_empty() {
            self.create = true;
            self.get = true;
            self.search = true;
            self.edit = true;
            self.delete = true;
            return Ok(());
        }

        for op in dir.words() {
            match op {
                "create" => self.create = true,
                "get" => self.get = true,
                "search" => self.search = true,
                "edit" => self.edit = true,
                "delete" => self.delete = true,
                _ => return Err(Error::declaration(MODULE, decl, format!("unknown crud operation {op:?}")))
            }
        }
        Ok(())
    }
}

/// Primary key parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Parameter name in lowerCamel case.
    pub name: String,
    /// Printable parameter type.
    #[serde(rename = "type")]
    pub ty:   String
}

/// Build the repository model of the scanned package.
///
/// # Errors
///
/// Returns the first configuration error of any annotated declaration.
pub fn build(ctx: &Context<'_>) -> Result<Data> {
    let package = ctx.package();

    let mut entities = Vec::new();
    for (decl, dirs) in ctx.annotated(MODULE) {
        let record = record(MODULE, package, decl)?;

        let mut entity = Entity::new(&decl.name);
        if let Some(plural) = ctx.index.directives(decl, PLURAL_MODULE).pop() {
            entity.plural = plural.args;
        }

        for dir in dirs {
            if dir.is_primary() {
                entity.enable_ops(decl, &dir)?;
                continue;
            }
            match dir.directive.as_str() {
                "extra" => entity.extra.push(dir.args),
                "search" => entity.search_type = dir.args,
                "repository" => entity.repository = dir.args,
                "plural" => entity.plural = dir.args,
                "*by" => {
                    entity.created_by_type.clone_from(&dir.args);
                    entity.updated_by_type.clone_from(&dir.args);
                    entity.deleted_by_type = dir.args;
                }
                "createdby" => entity.created_by_type = dir.args,
                "updatedby" => entity.updated_by_type = dir.args,
                "deletedby" => entity.deleted_by_type = dir.args,
                other => {
                    return Err(Error::declaration(MODULE, decl, format!("unrecognized directive {other:?}")));
                }
            }
        }

        entity.pks = primary_keys(package, decl, record)?;
        if entity.pks.is_empty() {
            return Err(Error::declaration(MODULE, decl, "need at least one pk"));
        }

        if entity.created_by_type.is_empty() {
            entity.created_by_type = audit_by_type(package, decl, record, "CreatedBy")?;
        }
        if entity.updated_by_type.is_empty() {
            entity.updated_by_type = audit_by_type(package, decl, record, "UpdatedBy")?;
        }
        if entity.deleted_by_type.is_empty() {
            entity.deleted_by_type = audit_by_type(package, decl, record, "DeletedBy")?;
        }

        debug!(entity = %decl.name, repository = %entity.repository, pks = entity.pks.len(), "crud entity");
        entities.push(entity);
    }

    Ok(Data {
        package: package.name.clone(),
        entities,
        extra: package_lines(ctx, "extra"),
        base: package_lines(ctx, "base")
    })
}

fn primary_keys(package: &Package, decl: &TypeDecl, record: &StructType) -> Result<Vec<Param>> {
    let mut pks = Vec::new();
    for field in &record.fields {
        if !field_tag(MODULE, decl, field)?.contains("pk") {
            continue;
        }

        let ty = qualified_name(&field.ty, &package.path)
            .ok_or_else(|| Error::declaration(MODULE, decl, format!("{}: pk must be a named type", field.name)))?;
        pks.push(Param {
            name: field.name.to_case(Case::Camel),
            ty
        });
    }
    Ok(pks)
}

/// Type of the `CreatedBy`-style field `name`, empty when there is none.
///
/// An `unrel` tag names the type explicitly.
fn audit_by_type(package: &Package, decl: &TypeDecl, record: &StructType, name: &str) -> Result<String> {
    let Some(field) = record.field(name) else {
        return Ok(String::new());
    };

    let tag = field_tag(MODULE, decl, field)?;
    let unrel = tag.value("unrel");
    if !unrel.is_empty() {
        return Ok(unrel.to_owned());
    }

    qualified_name(&field.ty, &package.path)
        .ok_or_else(|| Error::declaration(MODULE, decl, format!("{name} must be a named type")))
}

fn package_lines(ctx: &Context<'_>, directive: &str) -> Vec<String> {
    ctx.index
        .package_directives(REPO_MODULE, directive)
        .into_iter()
        .map(|(_, dir)| dir.args)
        .collect()
}

#[cfg(test)]
mod tests;
