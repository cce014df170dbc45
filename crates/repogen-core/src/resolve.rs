// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type resolution.
//!
//! Collapses a [`Type`] into the printable strings the templates need.
//!
//! # Printing
//!
//! Composite layers print as prefixes, named types are qualified with their
//! package's short name when they live outside the generating package:
//!
//! | Type | Printed in `repo` |
//! |------|-------------------|
//! | `Slice(Pointer(repo.Widget))` | `[]*Widget` |
//! | `Array(4, int8)` | `[4]int8` |
//! | `Pointer(time.Time)` | `*time.Time` |
//! | `omit.Val[string]` | `omit.Val[string]` |
//! | `func()` | unresolved |
//!
//! # Descriptors
//!
//! [`TypeDescriptor`] additionally strips one array or nullable layer
//! (`element_qualified_name`) and all of them (`true_element_qualified_name`).
//! A `null.Val[T]` wrapper is unwrapped to `T` and flagged nullable.

use serde::Serialize;

use crate::package::{NamedType, Package, StructType, Type};

/// Package name of the nullable wrapper convention.
pub const NULLABLE_PACKAGE: &str = "null";

/// Type name of the nullable wrapper convention.
pub const NULLABLE_TYPE: &str = "Val";

/// Bound on named-to-underlying hops, so a malformed snapshot cannot loop.
const MAX_DEPTH: usize = 64;

/// Printable form of `ty` as seen from the package at import path `current`.
///
/// Returns `None` when the type has no printable named or basic terminal,
/// e.g. functions, interfaces, maps, channels and unnamed structs.
#[must_use]
pub fn qualified_name(ty: &Type, current: &str) -> Option<String> {
    let mut out = String::new();
    let mut ty = ty;

    loop {
        match ty {
            Type::Slice {
                elem
            } => {
                out.push_str("[]");
                ty = elem;
            }
            Type::Array {
                len,
                elem
            } => {
                out.push('[');
                out.push_str(&len.to_string());
                out.push(']');
                ty = elem;
            }
            Type::Pointer {
                elem
            } => {
                out.push('*');
                ty = elem;
            }
            Type::Named(named) => {
                out.push_str(&qualify(named, current)?);
                return Some(out);
            }
            Type::Basic {
                name
            } => {
                out.push_str(name.name());
                return Some(out);
            }
            _ => return None
        }
    }
}

/// Name of a named type, prefixed with its package when foreign.
///
/// Generic arguments are printed in brackets.
fn qualify(named: &NamedType, current: &str) -> Option<String> {
    let mut out = match &named.package {
        Some(owner) if owner.path != current => format!("{}.{}", owner.name, named.name),
        _ => named.name.clone()
    };

    if !named.args.is_empty() {
        let args = named
            .args
            .iter()
            .map(|arg| qualified_name(arg, current))
            .collect::<Option<Vec<_>>>()?;
        out.push('[');
        out.push_str(&args.join(", "));
        out.push(']');
    }

    Some(out)
}

/// Result of stripping one pointer layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unptr {
    /// Printable pointee, or the type itself when not a pointer.
    pub name:       String,
    /// Whether a pointer layer was stripped.
    pub is_pointer: bool
}

/// Strip a single pointer layer and print the rest.
///
/// Only the immediate pointee is reported; `**T` yields `*T`.
#[must_use]
pub fn unptr(ty: &Type, current: &str) -> Option<Unptr> {
    match ty {
        Type::Pointer {
            elem
        } => qualified_name(elem, current).map(|name| Unptr {
            name,
            is_pointer: true
        }),
        _ => qualified_name(ty, current).map(|name| Unptr {
            name,
            is_pointer: false
        })
    }
}

/// Innermost element below any slice, array and pointer layers.
#[must_use]
pub fn deep_element(ty: &Type) -> &Type {
    let mut ty = ty;
    loop {
        match ty {
            Type::Slice {
                elem
            }
            | Type::Array {
                elem, ..
            }
            | Type::Pointer {
                elem
            } => ty = elem,
            _ => return ty
        }
    }
}

/// Follow named types to their underlying definition.
///
/// Named types whose definition is unknown to `lookup` are returned as is.
#[must_use]
pub fn base_type<'a>(ty: &'a Type, lookup: &'a Package) -> &'a Type {
    let mut ty = ty;
    for _ in 0..MAX_DEPTH {
        let Type::Named(named) = ty else {
            break;
        };
        match lookup.underlying(named) {
            Some(underlying) => ty = underlying,
            None => break
        }
    }
    ty
}

/// Record reached through any composite and named layers.
///
/// `[]*Widget`, `Widget` and `*Widget` all reach the fields of `Widget`
/// as long as `lookup` knows its definition.
#[must_use]
pub fn struct_of<'a>(ty: &'a Type, lookup: &'a Package) -> Option<&'a StructType> {
    let mut ty = ty;
    for _ in 0..MAX_DEPTH {
        match deep_element(ty) {
            Type::Struct(record) => return Some(record),
            Type::Named(named) => ty = lookup.underlying(named)?,
            _ => return None
        }
    }
    None
}

/// Type argument of a `null.Val[T]` wrapper.
#[must_use]
pub fn nullable_inner(ty: &Type) -> Option<&Type> {
    let named = ty.as_named()?;
    let owner = named.package.as_ref()?;
    if owner.name != NULLABLE_PACKAGE || named.name != NULLABLE_TYPE {
        return None;
    }
    match named.args.as_slice() {
        [inner] => Some(inner),
        _ => None
    }
}

/// Canonical shape of a field type for code generation.
///
/// ```text
/// type Tags []string   →  Tags  / string  / string  array
/// []*Widget            →  []*Widget / *Widget / Widget  array
/// null.Val[time.Time]  →  time.Time / time.Time / time.Time  nullable
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Full printable type, wrapper removed.
    pub qualified_name:              String,
    /// One array or one nullable layer stripped.
    pub element_qualified_name:      String,
    /// Every array and pointer layer stripped.
    pub true_element_qualified_name: String,
    /// Nullable through the wrapper convention or a pointer layer.
    pub is_nullable:                 bool,
    /// Slice or array, directly or through a named type.
    pub is_array:                    bool
}

impl TypeDescriptor {
    /// Resolve `ty` as printed from `current`.
    ///
    /// `current` also serves to look up the definition of named types it
    /// declares. Returns `None` when the type cannot be printed.
    ///
    /// # Examples
    ///
    /// ```
    /// use repogen_core::{Package, Type, TypeDescriptor};
    ///
    /// let pkg = Package {
    ///     name:  "repo".into(),
    ///     path:  "example.com/repo".into(),
    ///     files: vec![],
    ///     decls: vec![]
    /// };
    /// let foo = Type::named(Some(pkg.reference()), "Foo");
    /// let desc = TypeDescriptor::resolve(&Type::slice(Type::pointer(foo)), &pkg).unwrap();
    ///
    /// assert_eq!(desc.qualified_name, "[]*Foo");
    /// assert_eq!(desc.element_qualified_name, "*Foo");
    /// assert_eq!(desc.true_element_qualified_name, "Foo");
    /// assert!(desc.is_array);
    /// ```
    #[must_use]
    pub fn resolve(ty: &Type, current: &Package) -> Option<Self> {
        Self::resolve_with(ty, &current.path, current)
    }

    /// Resolve `ty` as printed from the package at import path `printing`,
    /// looking definitions up in `lookup`.
    ///
    /// Used when the generated code lives in a different package than the
    /// declarations it describes.
    #[must_use]
    pub fn resolve_with(ty: &Type, printing: &str, lookup: &Package) -> Option<Self> {
        let path = printing;
        let (ty, wrapped) = match nullable_inner(ty) {
            Some(inner) => (inner, true),
            None => (ty, false)
        };

        let qualified = qualified_name(ty, path)?;
        let layer = match base_type(ty, lookup) {
            Type::Slice {
                elem
            }
            | Type::Array {
                elem, ..
            } => Some((elem.as_ref(), true, false)),
            Type::Pointer {
                elem
            } => Some((elem.as_ref(), false, true)),
            _ => None
        };
        let layer = layer.and_then(|(elem, is_array, is_pointer)| {
            let element = qualified_name(elem, path)?;
            let true_element = qualified_name(deep_element(elem), path)?;
            Some((element, true_element, is_array, is_pointer))
        });

        let descriptor = match layer {
            Some((element, true_element, is_array, is_pointer)) => Self {
                qualified_name: qualified,
                element_qualified_name: element,
                true_element_qualified_name: true_element,
                is_nullable: wrapped || is_pointer,
                is_array
            },
            None => Self {
                element_qualified_name: qualified.clone(),
                true_element_qualified_name: qualified.clone(),
                qualified_name: qualified,
                is_nullable: wrapped,
                is_array: false
            }
        };

        Some(descriptor)
    }
}
