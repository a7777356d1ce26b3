#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Scalar table
// ============================================================================

#[test_case("int", "int", SemanticKind::Int, "PyLong_AsLong", "i", "%d")]
#[test_case("int", "unsigned int", SemanticKind::UnsignedInt, "PyLong_AsUnsignedLong", "I", "%u")]
#[test_case("int8_t", "int8_t", SemanticKind::Int, "PyLong_AsLong", "c", "%d")]
#[test_case("int16_t", "int16_t", SemanticKind::Int, "PyLong_AsLong", "h", "%d")]
#[test_case("int32_t", "int32_t", SemanticKind::Int, "PyLong_AsLong", "l", "%d")]
#[test_case("uint8_t", "uint8_t", SemanticKind::UnsignedInt, "PyLong_AsUnsignedLong", "b", "%u")]
#[test_case("uint16_t", "uint16_t", SemanticKind::UnsignedInt, "PyLong_AsUnsignedLong", "H", "%u")]
#[test_case("uint32_t", "uint32_t", SemanticKind::UnsignedInt, "PyLong_AsUnsignedLong", "k", "%u")]
#[test_case("int64_t", "int64_t", SemanticKind::Int64, "PyLong_AsLongLong", "L", "%ld")]
#[test_case("uint64_t", "uint64_t", SemanticKind::UnsignedInt64, "PyLong_AsUnsignedLongLong", "K", "%lu")]
#[test_case("size_t", "size_t", SemanticKind::Size, "PyLong_AsSsize_t", "n", "%lu")]
#[test_case("float", "float", SemanticKind::Float, "PyFloat_AsDouble", "f", "%f")]
#[test_case("double", "double", SemanticKind::Float, "PyFloat_AsDouble", "d", "%f")]
#[test_case("bool_t", "bool_t", SemanticKind::Bool, "PyInt_AsLong", "i", "%d")]
#[test_case("char", "char", SemanticKind::Int, "PyInt_AsLong", "b", "%08x")]
#[test_case("char", "char *", SemanticKind::String, "PyString_AsString", "z", "\\\"%s\\\"")]
fn resolve___scalar___maps_to_rule(
    basic: &str,
    complete: &str,
    kind: SemanticKind,
    converter: &str,
    pack: &str,
    trace: &str,
) {
    let rule = resolve(basic, complete, &BTreeSet::new(), "linphone");

    assert_eq!(rule.kind, kind);
    assert_eq!(rule.converter, Some(converter));
    assert_eq!(rule.pack_format, pack);
    assert_eq!(rule.trace_format, trace);
}

// ============================================================================
// Enum detection across prefix spellings
// ============================================================================

#[test_case("LinphoneReason")]
#[test_case("linphoneReason")]
#[test_case("Reason")]
fn resolve___enum_spelling___is_enum(basic: &str) {
    let names: BTreeSet<String> = ["Reason".to_string()].into_iter().collect();

    let rule = resolve(basic, basic, &names, "linphone");

    assert_eq!(rule, TypeRule::ENUM);
}
