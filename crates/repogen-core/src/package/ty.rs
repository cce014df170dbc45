// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type graph of a package snapshot.

use serde::{Deserialize, Serialize};

use super::{BasicKind, PackageRef};

/// A type as the type checker sees it.
///
/// Composite layers (`Pointer`, `Slice`, `Array`) wrap an element type;
/// `Named` is a declared type that may carry generic arguments and,
/// optionally, its underlying definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// Predeclared type such as `int64` or `string`.
    Basic {
        /// Which basic type.
        name: BasicKind
    },

    /// Declared type, possibly from another package.
    Named(NamedType),

    /// `*Elem`
    Pointer {
        /// Pointee.
        elem: Box<Type>
    },

    /// `[]Elem`
    Slice {
        /// Element type.
        elem: Box<Type>
    },

    /// `[N]Elem`
    Array {
        /// Number of elements.
        len:  u64,
        /// Element type.
        elem: Box<Type>
    },

    /// `map[Key]Value`
    Map {
        /// Key type.
        key:   Box<Type>,
        /// Value type.
        value: Box<Type>
    },

    /// `chan Elem`
    Chan {
        /// Element type.
        elem: Box<Type>
    },

    /// Record with named fields.
    Struct(StructType),

    /// Function signature.
    Func,

    /// Interface type.
    Interface
}

impl Type {
    /// Basic type.
    #[must_use]
    pub fn basic(kind: BasicKind) -> Self {
        Self::Basic {
            name: kind
        }
    }

    /// Named type without type arguments.
    #[must_use]
    pub fn named(package: Option<PackageRef>, name: impl Into<String>) -> Self {
        Self::Named(NamedType::new(package, name))
    }

    /// `*elem`
    #[must_use]
    pub fn pointer(elem: Type) -> Self {
        Self::Pointer {
            elem: Box::new(elem)
        }
    }

    /// `[]elem`
    #[must_use]
    pub fn slice(elem: Type) -> Self {
        Self::Slice {
            elem: Box::new(elem)
        }
    }

    /// `[len]elem`
    #[must_use]
    pub fn array(len: u64, elem: Type) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem)
        }
    }

    /// Struct from its fields.
    #[must_use]
    pub fn record(fields: Vec<Field>) -> Self {
        Self::Struct(StructType {
            fields
        })
    }

    /// Named type, if this is one.
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            _ => None
        }
    }

    /// Check if this is a single pointer layer.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer { .. })
    }

    /// Check if this is a slice.
    #[must_use]
    pub fn is_slice(&self) -> bool {
        matches!(self, Self::Slice { .. })
    }
}

/// A declared type reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    /// Owning package, `None` for universe types such as `error`.
    #[serde(default)]
    pub package:    Option<PackageRef>,
    /// Declared name.
    pub name:       String,
    /// Generic type arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args:       Vec<Type>,
    /// Underlying definition, when the loader inlined it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<Box<Type>>
}

impl NamedType {
    /// Named type without arguments or inline definition.
    #[must_use]
    pub fn new(package: Option<PackageRef>, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
            args: Vec::new(),
            underlying: None
        }
    }

    /// Attach generic type arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Type>) -> Self {
        self.args = args;
        self
    }

}

/// Record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>
}

impl StructType {
    /// Find a field by exact name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Struct field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name:     String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty:       Type,
    /// Raw composite tag string, e.g. `` json:"id" repogen:"pk" ``.
    #[serde(default)]
    pub tag:      String,
    /// Embedded field.
    #[serde(default)]
    pub embedded: bool
}

impl Field {
    /// Field without a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            embedded: false
        }
    }

    /// Attach a raw tag string.
    #[must_use]
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let json = r#"{
            "kind": "slice",
            "elem": {
                "kind": "pointer",
                "elem": {
                    "kind": "named",
                    "package": { "path": "example.com/app/models", "name": "models" },
                    "name": "User"
                }
            }
        }"#;
        let ty: Type = serde_json::from_str(json).unwrap();
        let expected = Type::slice(Type::pointer(Type::named(
            Some(PackageRef::new("example.com/app/models", "models")),
            "User"
        )));
        assert_eq!(ty, expected);
    }

    #[test]
    fn unit_variants_deserialize() {
        let ty: Type = serde_json::from_str(r#"{ "kind": "func" }"#).unwrap();
        assert_eq!(ty, Type::Func);
    }

    #[test]
    fn field_lookup() {
        let record = StructType {
            fields: vec![Field::new("ID", Type::basic(BasicKind::Int64))]
        };
        assert!(record.field("ID").is_some());
        assert!(record.field("id").is_none());
    }
}
