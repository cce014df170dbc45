// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Identifier parser model.
//!
//! ```text
//! //repogen:parseid              → func ParseWidgetID(s string) (WidgetID, error)
//! type WidgetID int64
//!
//! //repogen:parseid ParseSlot    → func ParseSlot(s string) (SlotID, error)
//! type SlotID uint16
//! ```

use serde::Serialize;
use tracing::debug;

use super::Context;
use crate::{
    error::{Error, Result},
    package::Type,
    resolve::base_type
};

/// Module name of the generator.
pub const MODULE: &str = "parseid";

/// Model of `parse_id.repogen.go`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Data {
    /// Package the file is generated into.
    pub package: String,
    /// Identifier types in declaration order.
    pub ids:     Vec<Id>
}

/// Parse function of one identifier type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Id {
    /// Declared identifier type.
    #[serde(rename = "type")]
    pub ty:        String,
    /// Parse function name, `Parse<Name>` by default.
    pub func_name: String,
    /// Whether the integer is signed.
    pub signed:    bool,
    /// Integer bit size.
    pub bits:      u8
}

/// Build the identifier parser model of the scanned package.
///
/// # Errors
///
/// Fails when a declaration carries more than one directive or is not
/// based on a sized integer type.
pub fn build(ctx: &Context<'_>) -> Result<Data> {
    let package = ctx.package();

    let mut ids = Vec::new();
    for (decl, mut dirs) in ctx.annotated(MODULE) {
        if dirs.len() > 1 {
            return Err(Error::declaration(
                MODULE,
                decl,
                "conflicting directives, only use a single parseid directive"
            ));
        }

        let kind = match base_type(&decl.ty, package) {
            Type::Basic {
                name
            } => Some(*name),
            _ => None
        };
        let Some((kind, bits)) = kind.and_then(|kind| Some((kind, kind.integer_bits()?))) else {
            return Err(Error::declaration(MODULE, decl, "type must be `(int|uint)(8|16|32|64)?`"));
        };

        let args = dirs.pop().map(|dir| dir.args).unwrap_or_default();
        let func_name = if args.is_empty() {
            format!("Parse{}", decl.name)
        } else {
            args
        };

        debug!(entity = %decl.name, func = %func_name, bits, "parseid entity");
        ids.push(Id {
            ty: decl.name.clone(),
            func_name,
            signed: !kind.is_unsigned(),
            bits
        });
    }

    Ok(Data {
        package: package.name.clone(),
        ids
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        module::fixture::{PackageBuilder, with_context},
        package::{BasicKind, Field}
    };

    fn id(ty: &str, func_name: &str, signed: bool, bits: u8) -> Id {
        Id {
            ty: ty.into(),
            func_name: func_name.into(),
            signed,
            bits
        }
    }

    #[test]
    fn integer_identifiers() {
        let pkg = PackageBuilder::repo()
            .decl(&["//repogen:parseid"], "WidgetID", Type::basic(BasicKind::Int64))
            .decl(&["//repogen:parseid ParseSlot"], "SlotID", Type::basic(BasicKind::Uint16))
            .decl(&["//repogen:parseid"], "Code", Type::basic(BasicKind::Byte))
            .decl(&["//repogen:parseid"], "Count", Type::basic(BasicKind::Int))
            .build();

        let data = with_context(&pkg, build).unwrap();
        assert_eq!(data.package, "repo");
        assert_eq!(
            data.ids,
            [
                id("WidgetID", "ParseWidgetID", true, 64),
                id("SlotID", "ParseSlot", false, 16),
                id("Code", "ParseCode", false, 8),
                id("Count", "ParseCount", true, 64)
            ]
        );
    }

    #[test]
    fn through_named_declaration() {
        let pkg = PackageBuilder::repo();
        let base = Type::named(Some(pkg.reference()), "BaseID");
        let pkg = pkg
            .decl(&[], "BaseID", Type::basic(BasicKind::Int32))
            .decl(&["//repogen:parseid"], "UserID", base)
            .build();

        let data = with_context(&pkg, build).unwrap();
        assert_eq!(data.ids, [id("UserID", "ParseUserID", true, 32)]);
    }

    #[test]
    fn non_integer() {
        for ty in [
            Type::basic(BasicKind::String),
            Type::basic(BasicKind::Uintptr),
            Type::record(vec![Field::new("V", Type::basic(BasicKind::Int))])
        ] {
            let pkg = PackageBuilder::repo().decl(&["//repogen:parseid"], "WidgetID", ty).build();
            let err = with_context(&pkg, build).unwrap_err();
            assert_eq!(
                err.to_string(),
                "models.go:3:6: parseid: WidgetID: type must be `(int|uint)(8|16|32|64)?`"
            );
        }
    }

    #[test]
    fn conflicting_directives() {
        let pkg = PackageBuilder::repo()
            .decl(&["//repogen:parseid", "//repogen:parseid ParseIt"], "WidgetID", Type::basic(BasicKind::Int64))
            .build();

        let err = with_context(&pkg, build).unwrap_err();
        assert!(err.to_string().ends_with("conflicting directives, only use a single parseid directive"));
    }

    #[test]
    fn nothing_annotated() {
        let pkg = PackageBuilder::repo().decl(&[], "WidgetID", Type::basic(BasicKind::Int64)).build();
        assert!(with_context(&pkg, build).unwrap().ids.is_empty());
    }
}
