//! End-to-end introspection queries a consumer (a generator, a linter)
//! would make against the graph.

#![allow(clippy::unwrap_used)]

mod helpers;

use symgraph::backend::semantic::{SemanticModel, SymbolData};
use symgraph::{
    AttrValue, GraphRegistry, Nullability, ObjectKind, RegistryOptions,
};

#[test]
fn test_infrastructure_attributes_are_filtered() {
    let model = helpers::semantic_fixture();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    // The only decoration on Order is a compiler-synthesized marker.
    assert!(order.all_attributes(&g).is_empty());
}

#[test]
fn test_attribute_round_trip_through_argument_helper() {
    let model = helpers::semantic_fixture();
    let g = GraphRegistry::new();
    let entity = g.intern(model.handle("Shop.Entity").unwrap());
    let members = entity.all_members(&g);
    let id = &members[0];
    let attrs = id.all_attributes(&g);
    assert_eq!(attrs.len(), 1);
    let key = &attrs[0];
    assert_eq!(key.full_name().as_ref(), "Shop.Codegen.KeyAttribute");
    assert_eq!(key.argument(0, None).unwrap(), &AttrValue::Int(0));
    assert_eq!(
        key.argument(9, Some("AutoAssign")).unwrap(),
        &AttrValue::Bool(true)
    );
    assert!(key.argument(9, Some("Missing")).is_none());
}

#[test]
fn test_method_surface() {
    let model = helpers::semantic_fixture();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    let members = order.all_members(&g);
    let recalc = members
        .iter()
        .find(|m| m.kind() == ObjectKind::Method)
        .unwrap();
    assert!(!recalc.method_is_constructor());
    let params: Vec<&str> = recalc
        .method_parameters()
        .iter()
        .map(|p| p.as_ref())
        .collect();
    assert_eq!(params, vec!["System.Boolean"]);
    let return_type = recalc.type_object(&g).unwrap();
    assert_eq!(return_type.full_name().as_ref(), "System.Void");
    assert!(return_type.is_primitive());
}

#[test]
fn test_nullable_use_site() {
    let model = helpers::semantic_fixture();
    let g = GraphRegistry::new();
    let customer = g.intern(model.handle("Shop.Customer").unwrap());
    let members = customer.all_members(&g);
    let last_order = members
        .iter()
        .find(|m| m.simple_name().as_ref() == "LastOrder")
        .unwrap();
    assert_eq!(last_order.nullability(), Nullability::Annotated);
    let wrapped = last_order.nullable_type(&g).unwrap();
    assert_eq!(wrapped.annotated_name(), "Shop.Order?");
    // The node itself stays unannotated: the annotation lives on the use
    // site, and other use sites of Shop.Order are unaffected.
    let order = g.lookup("Shop.Order").unwrap();
    assert!(std::rc::Rc::ptr_eq(&wrapped.object(&g), &order));
}

#[test]
fn test_array_facts() {
    let model = SemanticModel::new();
    model.insert(SymbolData::class("System", "Int32")).unwrap();
    model
        .insert(SymbolData::class("Shop", "Int32Grid").with_array("System.Int32", 2))
        .unwrap();
    model.verify().unwrap();

    let g = GraphRegistry::new();
    let grid = g.intern(model.handle("Shop.Int32Grid").unwrap());
    assert_eq!(grid.array_rank(), 2);
    let element = grid.array_element(&g).unwrap();
    assert_eq!(element.full_name().as_ref(), "System.Int32");
}

#[test]
fn test_custom_platform_prefixes() {
    let options = RegistryOptions {
        system_namespaces: vec!["Platform".into()],
        infrastructure_prefixes: vec!["Platform.Compiler".into()],
        root_name: "Platform.Any".into(),
    };
    let model = SemanticModel::new();
    model
        .insert(SymbolData::class("Platform", "Any"))
        .unwrap();
    model
        .insert(
            SymbolData::class("App", "Widget")
                .with_base("Platform.Any")
                .with_members(["App.Widget.Name"]),
        )
        .unwrap();
    model
        .insert(SymbolData::field("App.Widget", "Name", "Platform.Text"))
        .unwrap();
    model
        .insert(SymbolData::class("Platform", "Text"))
        .unwrap();
    model.verify().unwrap();

    let g = GraphRegistry::with_options(options);
    let widget = g.intern(model.handle("App.Widget").unwrap());
    assert!(!widget.is_system());
    assert_eq!(widget.all_members(&g).len(), 1);
    let text = g.intern(model.handle("Platform.Text").unwrap());
    assert!(text.is_system());
    assert!(text.all_members(&g).is_empty());
}

#[test]
fn test_lookup_after_transitive_interning() {
    let model = helpers::semantic_fixture();
    let g = GraphRegistry::new();
    let order = g.intern(model.handle("Shop.Order").unwrap());
    // Interning is shallow; related nodes appear as properties resolve.
    assert!(g.lookup("Shop.Order.Total").is_none());
    let _ = order.all_members(&g);
    assert!(g.lookup("Shop.Order.Total").is_some());
    let _ = order.base_object(&g);
    assert!(g.lookup("Shop.Entity").is_some());
}
