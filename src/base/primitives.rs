//! The fixed table of primitive type names.
//!
//! Maps well-known fully qualified names to their short keyword forms.
//! A match short-circuits node construction in the registry: primitives
//! never have their members or attributes traversed.

/// Look up the short keyword form for a well-known fully qualified name.
///
/// Returns `None` for anything that is not a primitive.
pub fn short_form(full_name: &str) -> Option<&'static str> {
    let short = match full_name {
        "System.Boolean" => "bool",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Char" => "char",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Single" => "float",
        "System.Double" => "double",
        "System.Decimal" => "decimal",
        "System.String" => "string",
        "System.Object" => "object",
        "System.Void" => "void",
        _ => return None,
    };
    Some(short)
}

/// Returns true if the name denotes a primitive type.
pub fn is_primitive(full_name: &str) -> bool {
    short_form(full_name).is_some()
}
