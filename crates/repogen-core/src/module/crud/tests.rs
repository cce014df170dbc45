// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use super::*;
use crate::{
    module::fixture::{PackageBuilder, with_context},
    package::{BasicKind, Field, PackageRef, Type}
};

fn int64() -> Type {
    Type::basic(BasicKind::Int64)
}

fn string() -> Type {
    Type::basic(BasicKind::String)
}

fn widget() -> Type {
    Type::record(vec![Field::new("ID", int64()).tagged(r#"repogen:"pk:''""#), Field::new("Name", string())])
}

fn users() -> PackageRef {
    PackageRef::new("example.com/app/users", "users")
}

#[test]
fn widget_defaults() {
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud"], "Widget", widget()).build();
    let data = with_context(&pkg, build).unwrap();

    assert_eq!(data.package, "repo");
    assert_eq!(data.entities.len(), 1);
    let e = &data.entities[0];
    assert_eq!(e.repository, "WidgetRepository");
    assert_eq!(e.singular, "Widget");
    assert_eq!(e.plural, "Widgets");
    assert_eq!(e.search_type, "WidgetSearchData");
    assert_eq!(
        e.pks,
        [Param {
            name: "id".into(),
            ty:   "int64".into()
        }]
    );
    assert!(e.create && e.get && e.search && e.edit && e.delete);
    assert!(e.created_by_type.is_empty());
}

#[test]
fn operation_list() {
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud get delete"], "Widget", widget()).build();
    let e = with_context(&pkg, build).unwrap().entities.remove(0);

    assert!(e.get && e.delete);
    assert!(!e.create && !e.search && !e.edit);
}

#[test]
fn unknown_operation() {
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud get list"], "Widget", widget()).build();
    let err = with_context(&pkg, build).unwrap_err();
    assert_eq!(err.to_string(), "models.go:3:6: crud: Widget: unknown crud operation \"list\"");
}

#[test]
fn no_primary_key() {
    let ty = Type::record(vec![Field::new("Name", string())]);
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud"], "Widget", ty).build();
    let err = with_context(&pkg, build).unwrap_err();
    assert_eq!(err.to_string(), "models.go:3:6: crud: Widget: need at least one pk");
}

#[test]
fn non_struct_declaration() {
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud"], "ID", int64()).build();
    let err = with_context(&pkg, build).unwrap_err();
    assert!(err.to_string().ends_with("crud: ID: cannot generate code for non-struct type"));
}

#[test]
fn directive_overrides() {
    let pkg = PackageBuilder::repo()
        .decl(
            &[
                "//repogen:plural Widgetz",
                "//repogen:crud create",
                "//repogen:crud:repository Widgets",
                "//repogen:crud:search WidgetQuery",
                "//repogen:crud:extra Count(ctx context.Context) (int, error)",
                "//repogen:crud:*by users.ID",
                "//repogen:crud:deletedby *users.ID"
            ],
            "Widget",
            widget()
        )
        .build();
    let e = with_context(&pkg, build).unwrap().entities.remove(0);

    assert_eq!(e.plural, "Widgetz");
    assert_eq!(e.repository, "Widgets");
    assert_eq!(e.search_type, "WidgetQuery");
    assert_eq!(e.extra, ["Count(ctx context.Context) (int, error)"]);
    assert_eq!(e.created_by_type, "users.ID");
    assert_eq!(e.updated_by_type, "users.ID");
    assert_eq!(e.deleted_by_type, "*users.ID");
    assert!(e.create && !e.get);
}

#[test]
fn crud_plural_directive_wins_over_standalone() {
    let pkg = PackageBuilder::repo()
        .decl(&["//repogen:plural Widgetz", "//repogen:crud", "//repogen:crud:plural Widgeten"], "Widget", widget())
        .build();
    let e = with_context(&pkg, build).unwrap().entities.remove(0);
    assert_eq!(e.plural, "Widgeten");
}

#[test]
fn unrecognized_directive() {
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud", "//repogen:crud:table widgets"], "Widget", widget()).build();
    let err = with_context(&pkg, build).unwrap_err();
    assert!(err.to_string().ends_with("crud: Widget: unrecognized directive \"table\""));
}

#[test]
fn audit_types_from_fields() {
    let ty = Type::record(vec![
        Field::new("ID", int64()).tagged(r#"repogen:"pk""#),
        Field::new("CreatedBy", Type::named(Some(users()), "ID")),
        Field::new("UpdatedBy", Type::pointer(Type::named(Some(users()), "User"))).tagged(r#"repogen:"unrel:'users.ID'""#),
        Field::new("DeletedBy", Type::pointer(Type::named(Some(users()), "ID")))
    ]);
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud"], "Widget", ty).build();
    let e = with_context(&pkg, build).unwrap().entities.remove(0);

    assert_eq!(e.created_by_type, "users.ID");
    assert_eq!(e.updated_by_type, "users.ID");
    assert_eq!(e.deleted_by_type, "*users.ID");
}

#[test]
fn composite_primary_key() {
    let pkg = PackageBuilder::repo();
    let owner = Type::named(Some(pkg.reference()), "UserID");
    let ty = Type::record(vec![
        Field::new("UserID", owner).tagged(r#"repogen:"pk""#),
        Field::new("SlotNumber", Type::basic(BasicKind::Int)).tagged(r#"json:"slot" repogen:"pk""#),
        Field::new("Label", string())
    ]);
    let pkg = pkg.decl(&["//repogen:crud"], "Slot", ty).build();
    let e = with_context(&pkg, build).unwrap().entities.remove(0);

    let pks: Vec<_> = e.pks.iter().map(|p| (p.name.as_str(), p.ty.as_str())).collect();
    assert_eq!(pks, [("userId", "UserID"), ("slotNumber", "int")]);
}

#[test]
fn unprintable_primary_key() {
    let ty = Type::record(vec![Field::new("ID", Type::Func).tagged(r#"repogen:"pk""#)]);
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud"], "Widget", ty).build();
    let err = with_context(&pkg, build).unwrap_err();
    assert!(err.to_string().ends_with("crud: Widget: ID: pk must be a named type"));
}

#[test]
fn malformed_tag_is_fatal() {
    let ty = Type::record(vec![Field::new("ID", int64()).tagged(r#"repogen:"pk:id""#)]);
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud"], "Widget", ty).build();
    let err = with_context(&pkg, build).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("models.go:3:6: crud: Widget: ID: malformed repogen tag {:?}", r#"repogen:"pk:id""#)
    );
}

#[test]
fn operation_list_tolerates_repeated_spaces() {
    let pkg = PackageBuilder::repo().decl(&["//repogen:crud get  delete"], "Widget", widget()).build();
    let e = &with_context(&pkg, build).unwrap().entities[0];
    assert!(e.get && e.delete);
    assert!(!e.create && !e.search && !e.edit);
}

#[test]
fn unannotated_and_detached_declarations_are_skipped() {
    let pkg = PackageBuilder::repo()
        .decl(&["// Widget is a widget."], "Widget", widget())
        .decl(&["//repogen:search"], "Gadget", widget())
        .build();
    let data = with_context(&pkg, build).unwrap();
    assert!(data.entities.is_empty());
}

#[test]
fn declaration_order_is_preserved() {
    let pkg = PackageBuilder::repo()
        .decl(&["//repogen:crud"], "Zebra", widget())
        .decl(&["//repogen:crud"], "Apple", widget())
        .build();
    let data = with_context(&pkg, build).unwrap();
    let names: Vec<_> = data.entities.iter().map(|e| e.singular.as_str()).collect();
    assert_eq!(names, ["Zebra", "Apple"]);
}

#[test]
fn package_level_lines() {
    let pkg = PackageBuilder::repo()
        .comment("//repogen:repo:base Transactor")
        .comment("//repogen:repo:extra Close() error")
        .decl(&["//repogen:crud"], "Widget", widget())
        .build();
    let data = with_context(&pkg, build).unwrap();
    assert_eq!(data.base, ["Transactor"]);
    assert_eq!(data.extra, ["Close() error"]);
}
