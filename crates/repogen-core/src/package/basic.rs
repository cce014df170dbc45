// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Predeclared basic types.

use serde::{Deserialize, Serialize};

/// Kind of a predeclared basic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `int`
    Int,
    /// `int8`
    Int8,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `uint`
    Uint,
    /// `uint8`
    Uint8,
    /// `uint16`
    Uint16,
    /// `uint32`
    Uint32,
    /// `uint64`
    Uint64,
    /// `uintptr`
    Uintptr,
    /// `byte`, alias of `uint8`
    Byte,
    /// `rune`, alias of `int32`
    Rune,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `complex64`
    Complex64,
    /// `complex128`
    Complex128
}

impl BasicKind {
    /// Printable name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Byte => "byte",
            Self::Rune => "rune",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128"
        }
    }

    /// Check if this is an integer type, `uintptr` included.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.integer_bits().is_some() || matches!(self, Self::Uintptr)
    }

    /// Check if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 | Self::Uintptr | Self::Byte
        )
    }

    /// Bit size of a fixed-size integer.
    ///
    /// `int` and `uint` count as 64 bits. `uintptr` has no portable size and
    /// returns `None`, as do all non-integer kinds.
    #[must_use]
    pub const fn integer_bits(self) -> Option<u8> {
        match self {
            Self::Int8 | Self::Uint8 | Self::Byte => Some(8),
            Self::Int16 | Self::Uint16 => Some(16),
            Self::Int32 | Self::Uint32 | Self::Rune => Some(32),
            Self::Int | Self::Int64 | Self::Uint | Self::Uint64 => Some(64),
            _ => None
        }
    }
}
