#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use crate::backend::semantic::{SemanticModel, SymbolData};
use crate::model::deep_equals;
use crate::registry::GraphRegistry;

/// A model with a self-referential type and a mutually recursive pair.
fn recursive_model() -> Rc<SemanticModel> {
    let model = SemanticModel::new();
    model.insert(SymbolData::class("System", "Object")).unwrap();
    model
        .insert(
            SymbolData::class("Shop", "Node")
                .with_base("System.Object")
                .with_members(["Shop.Node.Next"]),
        )
        .unwrap();
    model
        .insert(SymbolData::field("Shop.Node", "Next", "Shop.Node"))
        .unwrap();
    model
        .insert(
            SymbolData::class("Shop", "Order")
                .with_base("System.Object")
                .with_members(["Shop.Order.Customer"]),
        )
        .unwrap();
    model
        .insert(SymbolData::field("Shop.Order", "Customer", "Shop.Customer"))
        .unwrap();
    model
        .insert(
            SymbolData::class("Shop", "Customer")
                .with_base("System.Object")
                .with_members(["Shop.Customer.LastOrder"]),
        )
        .unwrap();
    model
        .insert(SymbolData::field("Shop.Customer", "LastOrder", "Shop.Order"))
        .unwrap();
    model.verify().unwrap();
    model
}

#[test]
fn test_node_equals_itself() {
    let model = recursive_model();
    let g = GraphRegistry::new();
    let node = g.intern(model.handle("Shop.Node").unwrap());
    assert!(deep_equals(&g, &node, &g, &node));
}

#[test]
fn test_self_referential_type_terminates() {
    // Same fixture through two independent registries: the comparison
    // must close the Next -> Node cycle instead of recursing forever.
    let model = recursive_model();
    let ga = GraphRegistry::new();
    let gb = GraphRegistry::new();
    let a = ga.intern(model.handle("Shop.Node").unwrap());
    let b = gb.intern(model.handle("Shop.Node").unwrap());
    assert!(deep_equals(&ga, &a, &gb, &b));
}

#[test]
fn test_mutual_recursion_terminates() {
    let model = recursive_model();
    let ga = GraphRegistry::new();
    let gb = GraphRegistry::new();
    let a = ga.intern(model.handle("Shop.Order").unwrap());
    let b = gb.intern(model.handle("Shop.Order").unwrap());
    assert!(deep_equals(&ga, &a, &gb, &b));
}

#[test]
fn test_structural_difference_detected() {
    let model = recursive_model();
    let ga = GraphRegistry::new();
    let gb = GraphRegistry::new();
    let order = ga.intern(model.handle("Shop.Order").unwrap());
    let customer = gb.intern(model.handle("Shop.Customer").unwrap());
    assert!(!deep_equals(&ga, &order, &gb, &customer));
}

#[test]
fn test_member_count_difference_detected() {
    let model_a = recursive_model();

    let model_b = SemanticModel::new();
    model_b
        .insert(SymbolData::class("System", "Object"))
        .unwrap();
    model_b
        .insert(
            SymbolData::class("Shop", "Node")
                .with_base("System.Object")
                .with_members(["Shop.Node.Next", "Shop.Node.Prev"]),
        )
        .unwrap();
    model_b
        .insert(SymbolData::field("Shop.Node", "Next", "Shop.Node"))
        .unwrap();
    model_b
        .insert(SymbolData::field("Shop.Node", "Prev", "Shop.Node"))
        .unwrap();
    model_b.verify().unwrap();

    let ga = GraphRegistry::new();
    let gb = GraphRegistry::new();
    let a = ga.intern(model_a.handle("Shop.Node").unwrap());
    let b = gb.intern(model_b.handle("Shop.Node").unwrap());
    assert!(!deep_equals(&ga, &a, &gb, &b));
}

#[test]
fn test_member_enumeration_terminates_on_cycles() {
    let model = recursive_model();
    let g = GraphRegistry::new();
    let node = g.intern(model.handle("Shop.Node").unwrap());
    let members = node.all_members(&g);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].full_name().as_ref(), "Shop.Node.Next");
    // Resolving the field's type leads straight back to the same node.
    let next_type = members[0].type_object(&g).unwrap();
    assert!(Rc::ptr_eq(&next_type, &node));
}
