// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Annotation parsing, type resolution and entity models for repogen.
//!
//! This crate is the pure half of the generator: it reads a loaded
//! [`Package`] snapshot and turns annotated declarations into serializable
//! models. Loading packages, rendering templates and writing files live in
//! the `repogen` crate.
//!
//! # Pipeline
//!
//! ```text
//! Package snapshot
//! │
//! ├── DirectiveIndex      comment block right above each declaration
//! │   └── Directive       //repogen:<module>[:<directive>] [<args>]
//! ├── FieldTag            repogen:"pk set:'Name' search:'range'"
//! ├── TypeDescriptor      []*Foo → *Foo → Foo, nullable, array
//! └── module::*::build    crud, search, setter, parseid, bob
//!     └── Data            handed to the renderer
//! ```
//!
//! # Example
//!
//! ```
//! use repogen_core::{Directive, FieldTag};
//!
//! let dir = Directive::parse("//repogen:crud get delete").unwrap();
//! assert_eq!(dir.module, "crud");
//! assert_eq!(dir.args, "get delete");
//!
//! let tag = FieldTag::from_struct_tag(r#"json:"id" repogen:"pk""#).unwrap();
//! assert!(tag.contains("pk"));
//! ```

pub mod correlate;
pub mod directive;
pub mod error;
pub mod module;
pub mod package;
pub mod resolve;
pub mod settyp;
pub mod tag;

pub use correlate::DirectiveIndex;
pub use directive::Directive;
pub use error::{Error, Result};
pub use module::Context;
pub use package::{
    BasicKind, Comment, CommentGroup, Field, NamedType, Package, PackageRef, Position, SourceFile,
    StructType, Type, TypeDecl
};
pub use resolve::{TypeDescriptor, qualified_name};
pub use settyp::{Primitives, SetterType};
pub use tag::FieldTag;
