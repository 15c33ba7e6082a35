//! Shared fixtures: one shop-domain type system, described twice.
//!
//! `semantic_fixture` builds it as a compile-time model (accessibility
//! enums, source positions); `metadata_fixture` builds the equivalent
//! runtime catalogue (flag words, no positions). The equivalence tests
//! intern both and require every derived property to agree.

#![allow(dead_code)]

use std::rc::Rc;

use text_size::TextRange;

use symgraph::backend::metadata::{EntityRecord, MetadataCatalog};
use symgraph::backend::semantic::{SemanticModel, SymbolData};
use symgraph::{Accessibility, AttrValue, AttributeData, Nullability, SourcePos};

pub fn key_attribute() -> AttributeData {
    AttributeData::new("Shop.Codegen.KeyAttribute")
        .with_arg(AttrValue::Int(0))
        .with_named("AutoAssign", AttrValue::Bool(true))
}

pub fn infrastructure_attribute() -> AttributeData {
    AttributeData::new("System.Runtime.CompilerServices.NullableAttribute")
        .with_arg(AttrValue::Int(1))
}

pub fn semantic_fixture() -> Rc<SemanticModel> {
    let model = SemanticModel::new();
    let insert = |data: SymbolData| model.insert(data).unwrap();

    insert(SymbolData::class("System", "Object"));
    insert(SymbolData::class("System", "Int32"));
    insert(SymbolData::class("System", "String"));
    insert(SymbolData::class("System", "Void"));

    insert(SymbolData::interface("Shop", "IAudited"));

    insert(
        SymbolData::class("Shop", "Entity")
            .with_base("System.Object")
            .with_members(["Shop.Entity.Id"])
            .with_position(SourcePos::new("entity.cs", TextRange::new(0.into(), 80.into()))),
    );
    insert(
        SymbolData::field("Shop.Entity", "Id", "System.Int32").with_attribute(key_attribute()),
    );

    insert(
        SymbolData::class("Shop", "Order")
            .with_base("Shop.Entity")
            .with_interfaces(["Shop.IAudited"])
            .with_members([
                "Shop.Order.Total",
                "Shop.Order.Buyer",
                "Shop.Order.Recalculate",
            ])
            .with_attribute(infrastructure_attribute())
            .with_position(SourcePos::new("order.cs", TextRange::new(0.into(), 400.into()))),
    );
    insert(
        SymbolData::property("Shop.Order", "Total", "System.Int32")
            .with_access(Some(Accessibility::Public), Some(Accessibility::Private)),
    );
    insert(SymbolData::field("Shop.Order", "Buyer", "Shop.Customer"));
    insert(
        SymbolData::method("Shop.Order", "Recalculate", "System.Void")
            .with_method_parameters(["System.Boolean"]),
    );

    insert(
        SymbolData::class("Shop", "Customer")
            .with_base("Shop.Entity")
            .with_members(["Shop.Customer.LastOrder"]),
    );
    insert(
        SymbolData::field("Shop.Customer", "LastOrder", "Shop.Order")
            .with_nullability(Nullability::Annotated),
    );

    // A value type with its implicit default constructor.
    insert(
        SymbolData::structure("Shop", "Money")
            .with_members(["Shop.Money.Amount", "Shop.Money..ctor"]),
    );
    insert(SymbolData::field("Shop.Money", "Amount", "System.Int32"));
    insert(SymbolData::constructor("Shop.Money").with_implicit());

    // An enum with its synthesized plumbing.
    insert(
        SymbolData::enumeration("Shop", "Status")
            .with_enum_underlying("System.Int32")
            .with_members([
                "Shop.Status..ctor",
                "Shop.Status.value__",
                "Shop.Status.Pending",
                "Shop.Status.Shipped",
            ]),
    );
    insert(SymbolData::constructor("Shop.Status").with_implicit());
    insert(SymbolData::field("Shop.Status", "value__", "System.Int32").with_implicit());
    insert(
        SymbolData::field("Shop.Status", "Pending", "Shop.Status")
            .with_static()
            .with_access(Some(Accessibility::Public), None),
    );
    insert(
        SymbolData::field("Shop.Status", "Shipped", "Shop.Status")
            .with_static()
            .with_access(Some(Accessibility::Public), None),
    );

    // An open generic definition and one closed instantiation.
    insert(SymbolData::class("Shop", "OrderList").with_generic_params(["T"]));
    insert(SymbolData::type_parameter("Shop.OrderList<T>", "T"));
    insert(
        SymbolData::class("Shop", "OrderList")
            .with_generic_args([("System.Int32", Nullability::Unannotated)])
            .with_original_definition("Shop.OrderList<T>"),
    );

    model.verify().unwrap();
    model
}

pub fn metadata_fixture() -> Rc<MetadataCatalog> {
    let catalog = MetadataCatalog::new();
    let insert = |record: EntityRecord| catalog.insert(record).unwrap();

    insert(EntityRecord::class("System", "Object"));
    insert(EntityRecord::class("System", "Int32"));
    insert(EntityRecord::class("System", "String"));
    insert(EntityRecord::class("System", "Void"));

    insert(EntityRecord::interface("Shop", "IAudited"));

    insert(
        EntityRecord::class("Shop", "Entity")
            .with_base("System.Object")
            .with_members(["Shop.Entity.Id"]),
    );
    insert(
        EntityRecord::field("Shop.Entity", "Id", "System.Int32").with_attribute(key_attribute()),
    );

    insert(
        EntityRecord::class("Shop", "Order")
            .with_base("Shop.Entity")
            .with_interfaces(["Shop.IAudited"])
            .with_members([
                "Shop.Order.Total",
                "Shop.Order.Buyer",
                "Shop.Order.Recalculate",
            ])
            .with_attribute(infrastructure_attribute()),
    );
    insert(
        EntityRecord::property("Shop.Order", "Total", "System.Int32")
            .with_accessors(Some(true), Some(false)),
    );
    insert(EntityRecord::field("Shop.Order", "Buyer", "Shop.Customer"));
    insert(
        EntityRecord::method("Shop.Order", "Recalculate", "System.Void")
            .with_method_parameters(["System.Boolean"]),
    );

    insert(
        EntityRecord::class("Shop", "Customer")
            .with_base("Shop.Entity")
            .with_members(["Shop.Customer.LastOrder"]),
    );
    insert(
        EntityRecord::field("Shop.Customer", "LastOrder", "Shop.Order")
            .with_nullability(Nullability::Annotated),
    );

    insert(
        EntityRecord::value_type("Shop", "Money")
            .with_members(["Shop.Money.Amount", "Shop.Money..ctor"]),
    );
    insert(EntityRecord::field("Shop.Money", "Amount", "System.Int32"));
    insert(EntityRecord::constructor("Shop.Money").with_implicit());

    insert(
        EntityRecord::enumeration("Shop", "Status")
            .with_enum_underlying("System.Int32")
            .with_members([
                "Shop.Status..ctor",
                "Shop.Status.value__",
                "Shop.Status.Pending",
                "Shop.Status.Shipped",
            ]),
    );
    insert(EntityRecord::constructor("Shop.Status").with_implicit());
    insert(EntityRecord::field("Shop.Status", "value__", "System.Int32").with_implicit());
    insert(
        EntityRecord::field("Shop.Status", "Pending", "Shop.Status")
            .with_static()
            .with_literal(),
    );
    insert(
        EntityRecord::field("Shop.Status", "Shipped", "Shop.Status")
            .with_static()
            .with_literal(),
    );

    insert(EntityRecord::class("Shop", "OrderList").with_generic_params(["T"]));
    insert(EntityRecord::generic_parameter("Shop.OrderList<T>", "T"));
    insert(
        EntityRecord::class("Shop", "OrderList")
            .with_generic_args([("System.Int32", Nullability::Unannotated)])
            .with_original_definition("Shop.OrderList<T>"),
    );

    catalog.verify().unwrap();
    catalog
}
