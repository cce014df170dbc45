// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Setter struct model.
//!
//! A setter carries one optional value per mutable field:
//!
//! ```text
//! //repogen:setter [<SetterType>]
//! //repogen:setter:extra <Name> <Type>
//! type Widget struct {
//!     ID        int64                                   skipped, audit field
//!     Name      string                                  → Name omit.Val[string]
//!     Note      *string   `repogen:"set:'Comment'"`      → Comment omitnull.Val[string]
//!     Owner     *User     `repogen:"rel:'Owner'"`        → Owner omitnull.Val[UserSetter]
//!     Secret    string    `repogen:"set:'-'"`            skipped
//! }
//! ```
//!
//! The value type follows the `settyp` rules of [`SetterType`].

use serde::Serialize;
use tracing::debug;

use super::{Context, field_tag, is_audit_field, record, split_extra};
use crate::{
    error::{Error, Result},
    package::{StructType, TypeDecl},
    settyp::SetterType
};

/// Module name of the generator.
pub const MODULE: &str = "setter";

/// Tag key renaming or skipping a setter field.
pub const TAG: &str = "set";

/// Model of `setter.repogen.go`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Data {
    /// Package the file is generated into.
    pub package:  String,
    /// Setter entities in declaration order.
    pub entities: Vec<Entity>
}

/// Setter struct of one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Struct name, `<Name>Setter` by default.
    pub setter_type: String,
    /// Setter fields, extras last.
    pub fields:      Vec<Field>
}

/// One setter field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Printable optional-value type.
    #[serde(rename = "type")]
    pub ty:   String
}

/// Setter field name of a struct field, `None` when it gets no setter.
///
/// `set` absent or empty keeps the name unless it is an audit field, `-`
/// skips, anything else renames.
#[must_use]
pub fn setter_name<'a>(field: &'a str, set: &'a str) -> Option<&'a str> {
    match set {
        "" if is_audit_field(field) => None,
        "" => Some(field),
        "-" => None,
        renamed => Some(renamed)
    }
}

/// Build the setter model of the scanned package.
///
/// # Errors
///
/// Returns the first configuration error of any annotated declaration.
pub fn build(ctx: &Context<'_>) -> Result<Data> {
    let package = ctx.package();

    let mut entities = Vec::new();
    for (decl, dirs) in ctx.annotated(MODULE) {
        let record = record(MODULE, package, decl)?;

        let mut setter_type = format!("{}Setter", decl.name);
        let mut extra = Vec::new();
        for dir in dirs {
            match dir.directive.as_str() {
                "" => {
                    if !dir.args.is_empty() {
                        setter_type = dir.args;
                    }
                }
                "extra" => {
                    let (name, ty) = split_extra(&dir.args);
                    extra.push(Field {
                        name: name.to_owned(),
                        ty:   ty.to_owned()
                    });
                }
                other => {
                    return Err(Error::declaration(MODULE, decl, format!("unrecognized directive {other:?}")));
                }
            }
        }

        let mut fields = setter_fields(ctx, decl, record)?;
        fields.extend(extra);
        if fields.is_empty() {
            return Err(Error::declaration(MODULE, decl, "need at least one settable field"));
        }

        debug!(entity = %decl.name, setter_type = %setter_type, fields = fields.len(), "setter entity");
        entities.push(Entity {
            setter_type,
            fields
        });
    }

    Ok(Data {
        package: package.name.clone(),
        entities
    })
}

fn setter_fields(ctx: &Context<'_>, decl: &TypeDecl, record: &StructType) -> Result<Vec<Field>> {
    let package = ctx.package();
    let owner = package.reference();

    let mut fields = Vec::new();
    for field in &record.fields {
        let tag = field_tag(MODULE, decl, field)?;
        let Some(name) = setter_name(&field.name, tag.value(TAG)) else {
            continue;
        };

        let ty = SetterType::select(ctx.primitives, &package.path, &owner, &tag, &field.ty).ok_or_else(|| {
            Error::declaration(MODULE, decl, format!("{}: cannot set unnamed type", field.name))
        })?;
        fields.push(Field {
            name: name.to_owned(),
            ty:   ty.option_type()
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        module::fixture::{PackageBuilder, with_context},
        package::{BasicKind, Field as StructField, PackageRef, Type}
    };

    fn pairs(entity: &Entity) -> Vec<(&str, &str)> {
        entity.fields.iter().map(|f| (f.name.as_str(), f.ty.as_str())).collect()
    }

    #[test]
    fn names() {
        assert_eq!(setter_name("Name", ""), Some("Name"));
        assert_eq!(setter_name("CreatedAt", ""), None);
        assert_eq!(setter_name("CreatedAt", "Created"), Some("Created"));
        assert_eq!(setter_name("Name", "-"), None);
    }

    #[test]
    fn widget_setter() {
        let pkg = PackageBuilder::repo();
        let user = Type::named(Some(pkg.reference()), "User");
        let ty = Type::record(vec![
            StructField::new("ID", Type::basic(BasicKind::Int64)),
            StructField::new("Name", Type::basic(BasicKind::String)),
            StructField::new("Note", Type::pointer(Type::basic(BasicKind::String))).tagged(r#"repogen:"set:'Comment'""#),
            StructField::new("Owner", Type::pointer(user)).tagged(r#"repogen:"rel:'Owner'""#),
            StructField::new("Secret", Type::basic(BasicKind::String)).tagged(r#"repogen:"set:'-'""#),
            StructField::new("UpdatedAt", Type::named(Some(PackageRef::new("time", "time")), "Time"))
        ]);
        let pkg = pkg.decl(&["//repogen:setter", "//repogen:setter:extra Touch bool"], "Widget", ty).build();

        let data = with_context(&pkg, build).unwrap();
        let e = &data.entities[0];
        assert_eq!(e.setter_type, "WidgetSetter");
        assert_eq!(
            pairs(e),
            [
                ("Name", "omit.Val[string]"),
                ("Comment", "omitnull.Val[string]"),
                ("Owner", "omitnull.Val[UserSetter]"),
                ("Touch", "bool")
            ]
        );
    }

    #[test]
    fn type_override() {
        let ty = Type::record(vec![
            StructField::new("Tags", Type::slice(Type::basic(BasicKind::String))).tagged(r#"repogen:"settyp:'[]Tag'""#)
        ]);
        let pkg = PackageBuilder::repo().decl(&["//repogen:setter WidgetPatch"], "Widget", ty).build();

        let data = with_context(&pkg, build).unwrap();
        let e = &data.entities[0];
        assert_eq!(e.setter_type, "WidgetPatch");
        assert_eq!(pairs(e), [("Tags", "omit.Val[[]Tag]")]);
    }

    #[test]
    fn only_audit_fields() {
        let ty = Type::record(vec![
            StructField::new("ID", Type::basic(BasicKind::Int64)),
            StructField::new("CreatedByID", Type::basic(BasicKind::Int64))
        ]);
        let pkg = PackageBuilder::repo().decl(&["//repogen:setter"], "Widget", ty).build();

        let err = with_context(&pkg, build).unwrap_err();
        assert_eq!(err.to_string(), "models.go:3:6: setter: Widget: need at least one settable field");
    }

    #[test]
    fn unnamed_type() {
        let ty = Type::record(vec![StructField::new("Hook", Type::Func)]);
        let pkg = PackageBuilder::repo().decl(&["//repogen:setter"], "Widget", ty).build();

        let err = with_context(&pkg, build).unwrap_err();
        assert!(err.to_string().ends_with("Hook: cannot set unnamed type"));
    }

    #[test]
    fn search_directives_are_ignored() {
        let ty = Type::record(vec![StructField::new("Name", Type::basic(BasicKind::String))]);
        let pkg = PackageBuilder::repo().decl(&["//repogen:search"], "Widget", ty).build();

        assert!(with_context(&pkg, build).unwrap().entities.is_empty());
    }
}
