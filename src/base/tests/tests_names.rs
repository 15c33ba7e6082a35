#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::base::names::{generic_suffix, qualify, short_display, simple_segment, without_suffix};
use crate::base::short_form;

#[test]
fn test_generic_suffix_empty() {
    assert_eq!(generic_suffix(&[]), "");
}

#[test]
fn test_generic_suffix_parts() {
    assert_eq!(generic_suffix(&["T"]), "<T>");
    assert_eq!(
        generic_suffix(&["System.Int32", "System.String"]),
        "<System.Int32, System.String>"
    );
}

#[test]
fn test_qualify() {
    assert_eq!(qualify("", "Order"), "Order");
    assert_eq!(qualify("Shop", "Order"), "Shop.Order");
    assert_eq!(qualify("Shop.Billing", "Invoice"), "Shop.Billing.Invoice");
}

#[test]
fn test_simple_segment_keeps_suffix_on_last_segment() {
    assert_eq!(simple_segment("Shop.OrderList<System.Int32>"), "OrderList<System.Int32>");
    assert_eq!(simple_segment("Order"), "Order");
}

#[test]
fn test_simple_segment_ignores_dots_inside_suffix() {
    // The dot inside the argument name must not split the segment.
    assert_eq!(simple_segment("List<Shop.Order>"), "List<Shop.Order>");
}

#[test]
fn test_without_suffix() {
    assert_eq!(without_suffix("List<System.Int32>"), "List");
    assert_eq!(without_suffix("Order"), "Order");
}

#[rstest]
#[case("System.Int32", "int")]
#[case("System.String", "string")]
#[case("System.Boolean", "bool")]
#[case("System.Double", "double")]
#[case("System.Object", "object")]
#[case("System.Void", "void")]
fn test_primitive_short_forms(#[case] full: &str, #[case] short: &str) {
    assert_eq!(short_form(full).unwrap(), short);
}

#[test]
fn test_non_primitives_have_no_short_form() {
    assert!(short_form("Shop.Order").is_none());
    assert!(short_form("System.DateTime").is_none());
}

#[test]
fn test_short_display_prefers_primitive_keyword() {
    assert_eq!(short_display("System.Int32"), "int");
    assert_eq!(short_display("Shop.Order"), "Order");
}
