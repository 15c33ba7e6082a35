#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use tokio_util::sync::CancellationToken;

use crate::backend::semantic::{SemanticModel, SymbolData};
use crate::model::{AttrValue, AttributeData, ObjectKind};
use crate::registry::{GraphRegistry, MemberFilter};

fn catalogued_model() -> Rc<SemanticModel> {
    let model = SemanticModel::new();
    model.insert(SymbolData::class("System", "Object")).unwrap();
    model.insert(SymbolData::class("System", "Int32")).unwrap();
    model
        .insert(SymbolData::interface("Shop", "ITracked"))
        .unwrap();
    model
        .insert(
            SymbolData::class("Shop", "Customer").with_interfaces(["Shop.ITracked"]),
        )
        .unwrap();
    model
        .insert(
            SymbolData::class("Shop", "Order")
                .with_base("System.Object")
                .with_members([
                    "Shop.Order.Id",
                    "Shop.Order.Buyer",
                    "Shop.Order.Recalculate",
                ]),
        )
        .unwrap();
    model
        .insert(
            SymbolData::field("Shop.Order", "Id", "System.Int32").with_attribute(
                AttributeData::new("Shop.Codegen.KeyAttribute").with_arg(AttrValue::Int(0)),
            ),
        )
        .unwrap();
    model
        .insert(SymbolData::property("Shop.Order", "Buyer", "Shop.Customer"))
        .unwrap();
    model
        .insert(SymbolData::method("Shop.Order", "Recalculate", "System.Void"))
        .unwrap();
    model.insert(SymbolData::class("System", "Void")).unwrap();
    model.verify().unwrap();
    model
}

#[test]
fn test_unfiltered_query_returns_all_members() {
    let model = catalogued_model();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let members = g
        .members_where(&order, &MemberFilter::new(), &CancellationToken::new())
        .unwrap();
    assert_eq!(members.len(), 3);
}

#[test]
fn test_kind_filter() {
    let model = catalogued_model();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let filter = MemberFilter::new().with_kinds([ObjectKind::Field, ObjectKind::Property]);
    let members = g
        .members_where(&order, &filter, &CancellationToken::new())
        .unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.simple_name().as_ref()).collect();
    assert_eq!(names, vec!["Id", "Buyer"]);
}

#[test]
fn test_attribute_filter() {
    let model = catalogued_model();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let filter = MemberFilter::new().with_attribute("Shop.Codegen.KeyAttribute");
    let members = g
        .members_where(&order, &filter, &CancellationToken::new())
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].simple_name().as_ref(), "Id");
}

#[test]
fn test_interface_filter() {
    let model = catalogued_model();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let filter = MemberFilter::new().with_interface("Shop.ITracked");
    let members = g
        .members_where(&order, &filter, &CancellationToken::new())
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].simple_name().as_ref(), "Buyer");
}

#[test]
fn test_filters_are_anded() {
    let model = catalogued_model();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let filter = MemberFilter::new()
        .with_kinds([ObjectKind::Field])
        .with_interface("Shop.ITracked");
    let members = g
        .members_where(&order, &filter, &CancellationToken::new())
        .unwrap();
    assert!(members.is_empty());
}

#[test]
fn test_cancelled_query_yields_none() {
    let model = catalogued_model();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(g
        .members_where(&order, &MemberFilter::new(), &cancel)
        .is_none());
}
