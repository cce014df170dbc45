// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! ORM wrapper model.
//!
//! Maps repository types onto the generated ORM models of another package.
//! The models package is named once per package:
//!
//! ```text
//! //repogen:bob:models internal/models
//! ```
//!
//! and each wrapped type pairs a getter struct with its setter:
//!
//! ```text
//! //repogen:setter
//! //repogen:bob [<ModelType>]
//! //repogen:bob:ops unwrap|wrap
//! type Widget struct {
//!     ID     int64
//!     Name   string     `repogen:"bob:'Title'"`                 → models.Widget.Title
//!     Owner  *User      `repogen:"rel:'Owner' unwrap:'-'"`      → models.Widget.R.Owner
//!     Cached string     `repogen:"bob:'-'"`                     skipped
//! }
//! ```
//!
//! # Field rules
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `bob:'-'`, or `wrap:'-'` with `unwrap:'-'` | field skipped |
//! | `set:'-'`, `unwrap:'-'`, audit field name | no unwrapping into the setter |
//! | `set:'<Name>'` | setter field name |
//! | `unwrap:'<func>'`, `wrap:'<func>'` | conversion functions |
//! | `wrap:'-'` | no wrapping from the model |
//! | `bob:'<Name>'` | model field name |
//! | `rel:'<Name>'` | relation on the model's `R` record |
//!
//! Slice relations are never unwrapped and have no plain model field.

use serde::Serialize;
use tracing::debug;

use super::{Context, field_tag, record, relation, relations, setter, setter::setter_name};
use crate::{
    correlate::DirectiveIndex,
    directive::Directive,
    error::{Error, Result},
    package::{Field as StructField, Package, Position, StructType, Type, TypeDecl},
    resolve::{TypeDescriptor, base_type, qualified_name},
    settyp::SetterType
};

/// Module name of the generator.
pub const MODULE: &str = "bob";

/// Directive naming a models package.
pub const MODELS_DIRECTIVE: &str = "models";

/// A `//repogen:bob:models <dir>` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelsDirective {
    /// Position of the comment.
    pub pos: Position,
    /// Models package directory, relative to the scanned package.
    pub dir: String
}

/// Every models directive of the scanned package, in source order.
#[must_use]
pub fn models_directives(index: &DirectiveIndex<'_>) -> Vec<ModelsDirective> {
    index
        .package_directives(MODULE, MODELS_DIRECTIVE)
        .into_iter()
        .map(|(pos, dir)| ModelsDirective {
            pos,
            dir: dir.args
        })
        .collect()
}

/// Model of `<models>/bob.repogen.go`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Data {
    /// Package the file is generated into.
    pub models_package: String,
    /// Package of the wrapped getter and setter types.
    pub repo_package:   String,
    /// Import path of the wrapped getter and setter types.
    pub repo_path:      String,
    /// Wrapped types in declaration order.
    pub entities:       Vec<Entity>
}

/// Wrapper of one getter and setter pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Getter struct name.
    pub getter_name:        String,
    /// Getter struct name as printed from the models package.
    pub qual_getter_name:   String,
    /// Setter struct name.
    pub setter_name:        String,
    /// Setter struct name as printed from the models package.
    pub qual_setter_name:   String,
    /// Model type name.
    pub models_getter_name: String,
    /// Model setter type name.
    pub models_setter_name: String,
    /// No setter-to-model conversion.
    pub no_unwrap:          bool,
    /// No model-to-getter conversion.
    pub no_wrap:            bool,
    /// Wrapped fields in getter field order.
    pub fields:             Vec<Field>
}

/// One wrapped field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Getter field name.
    pub getter_name: String,
    /// Getter field type.
    pub getter_type: TypeDescriptor,
    /// Setter field name, empty when not unwrapped.
    pub setter_name: String,
    /// Setter field type.
    pub setter_type: SetterShape,
    /// Model field name, empty for slice relations.
    pub models_name: String,
    /// Model field type.
    pub models_type: TypeDescriptor,
    /// Relation name, empty if none.
    pub rel_name:    String,
    /// Relation type.
    pub rel_type:    TypeDescriptor,
    /// No setter-to-model conversion.
    pub no_unwrap:   bool,
    /// No model-to-getter conversion.
    pub no_wrap:     bool,
    /// Conversion into the model, identity when empty.
    pub unwrap_func: String,
    /// Conversion from the model, identity when empty.
    pub wrap_func:   String
}

/// Setter field type as seen from the models package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetterShape {
    /// Full printable type.
    #[serde(rename = "type")]
    pub ty:          String,
    /// Slice element or pointee.
    pub elem:        String,
    /// Pointer type.
    pub is_nullable: bool,
    /// Slice type.
    pub is_array:    bool
}

impl From<&SetterType> for SetterShape {
    fn from(ty: &SetterType) -> Self {
        Self {
            ty:          ty.ty.clone(),
            elem:        ty.elem().to_owned(),
            is_nullable: ty.is_ptr,
            is_array:    ty.is_slice
        }
    }
}

/// Build the wrapper model of the scanned package against `models`.
///
/// # Errors
///
/// Returns the first configuration error of any annotated declaration.
pub fn build(ctx: &Context<'_>, models: &Package) -> Result<Data> {
    let package = ctx.package();

    let mut entities = Vec::new();
    for (decl, dirs) in ctx.annotated(MODULE) {
        let getter = record(MODULE, package, decl)?;

        let setter_name = ctx
            .index
            .directives(decl, setter::MODULE)
            .into_iter()
            .rev()
            .find(Directive::is_primary)
            .map(|dir| dir.args)
            .filter(|args| !args.is_empty())
            .unwrap_or_else(|| format!("{}Setter", decl.name));
        let Some(setter_decl) = package.lookup(&setter_name) else {
            return Err(Error::declaration(
                MODULE,
                decl,
                format!("found no setter named {setter_name:?} (did you forget a repogen:setter directive?)")
            ));
        };
        let Type::Struct(setter) = base_type(&setter_decl.ty, package) else {
            return Err(Error::declaration(MODULE, setter_decl, "setter must be struct"));
        };

        let mut entity = Entity {
            getter_name: decl.name.clone(),
            qual_getter_name: qualify(package, &decl.name, models),
            qual_setter_name: qualify(package, &setter_name, models),
            setter_name,
            models_getter_name: decl.name.clone(),
            ..Entity::default()
        };

        for dir in dirs {
            match dir.directive.as_str() {
                "" => {
                    if !dir.args.is_empty() {
                        entity.models_getter_name = dir.args;
                    }
                }
                "ops" => {
                    entity.no_wrap = true;
                    entity.no_unwrap = true;
                    for op in dir.words() {
                        match op {
                            "unwrap" => entity.no_unwrap = false,
                            "wrap" => entity.no_wrap = false,
                            _ => return Err(Error::declaration(MODULE, decl, format!("invalid op {op:?}")))
                        }
                    }
                }
                other => {
                    return Err(Error::declaration(MODULE, decl, format!("unrecognized directive {other:?}")));
                }
            }
        }
        entity.models_setter_name = format!("{}Setter", entity.models_getter_name);

        let Some(model_decl) = models.lookup(&entity.models_getter_name) else {
            return Err(Error::declaration(
                MODULE,
                decl,
                format!("found no model type named {:?}", entity.models_getter_name)
            ));
        };
        let Type::Struct(model) = base_type(&model_decl.ty, models) else {
            return Err(Error::declaration(
                MODULE,
                decl,
                format!("expected {}.{} to be struct", models.name, entity.models_getter_name)
            ));
        };

        let shapes = Shapes {
            ctx,
            models,
            decl,
            setter,
            model,
            relations: relations(models, model)
        };
        entity.fields = getter
            .fields
            .iter()
            .map(|field| shapes.field(field))
            .filter_map(Result::transpose)
            .collect::<Result<_>>()?;
        if entity.fields.is_empty() {
            return Err(Error::declaration(MODULE, decl, "need at least one wrapped field"));
        }

        debug!(
            entity = %decl.name,
            model = %entity.models_getter_name,
            fields = entity.fields.len(),
            "bob entity"
        );
        entities.push(entity);
    }

    Ok(Data {
        models_package: models.name.clone(),
        repo_package: package.name.clone(),
        repo_path: package.path.clone(),
        entities
    })
}

/// Name of a declaration of `package` as printed from `models`.
fn qualify(package: &Package, name: &str, models: &Package) -> String {
    let ty = Type::named(Some(package.reference()), name);
    qualified_name(&ty, &models.path).unwrap_or_else(|| name.to_owned())
}

/// Everything one getter field is matched against.
struct Shapes<'a> {
    ctx:       &'a Context<'a>,
    models:    &'a Package,
    decl:      &'a TypeDecl,
    setter:    &'a StructType,
    model:     &'a StructType,
    relations: Option<&'a StructType>
}

impl Shapes<'_> {
    fn error(&self, field: &str, message: impl std::fmt::Display) -> Error {
        Error::declaration(MODULE, self.decl, format!("{field}: {message}"))
    }

    /// Wrapped form of `getter`, `None` when the field is skipped.
    fn field(&self, getter: &StructField) -> Result<Option<Field>> {
        let package = self.ctx.package();
        let tag = field_tag(MODULE, self.decl, getter)?;
        if tag.value("bob") == "-" || (tag.value("wrap") == "-" && tag.value("unwrap") == "-") {
            return Ok(None);
        }

        let name = getter.name.as_str();
        let getter_type = TypeDescriptor::resolve_with(&getter.ty, &self.models.path, package)
            .ok_or_else(|| self.error(name, "field must be of named type"))?;

        let mut field = Field {
            getter_name: name.to_owned(),
            getter_type,
            ..Field::default()
        };

        match setter_name(name, tag.value(setter::TAG)) {
            Some(set) => field.setter_name = set.to_owned(),
            None => field.no_unwrap = true
        }
        match tag.value("unwrap") {
            "-" => {
                field.setter_name.clear();
                field.no_unwrap = true;
            }
            func => field.unwrap_func = func.to_owned()
        }

        let rel = tag.value("rel");
        if !field.no_unwrap {
            if self.setter.field(&field.setter_name).is_none() {
                return Err(self.error(name, format!("no field named {:?} on this type's setter", field.setter_name)));
            }

            let settyp = SetterType::select(
                self.ctx.primitives,
                &self.models.path,
                &package.reference(),
                &tag,
                &getter.ty
            )
            .ok_or_else(|| self.error(name, "cannot set unnamed type"))?;
            field.setter_type = SetterShape::from(&settyp);
            if field.setter_type.is_array && !rel.is_empty() {
                field.no_unwrap = true;
            }
        }

        if !(field.setter_type.is_array && !rel.is_empty()) {
            let models_name = match tag.value("bob") {
                "" => name,
                renamed => renamed
            };
            let Some(model_field) = self.model.field(models_name) else {
                return Err(self.error(name, format!("model has no corresponding field named {models_name:?}")));
            };
            field.models_type = TypeDescriptor::resolve(&model_field.ty, self.models).ok_or_else(|| {
                self.error(name, format!("model's corresponding field {models_name:?} is not of named type"))
            })?;
            field.models_name = models_name.to_owned();
        }

        if !rel.is_empty() {
            let rel_field = relation(MODULE, self.decl, self.relations, name, rel)?;
            field.rel_type = TypeDescriptor::resolve(&rel_field.ty, self.models).ok_or_else(|| {
                self.error(name, format!("model's corresponding relation {rel:?} is not of named type"))
            })?;
            field.rel_name = rel.to_owned();
        }

        match tag.value("wrap") {
            "-" => field.no_wrap = true,
            func => field.wrap_func = func.to_owned()
        }

        Ok(Some(field))
    }
}
