//! Marshalling rules for native types.
//!
//! Every parameter and return value crossing the boundary is described by a
//! [`TypeRule`]: how to check a Python value, how to convert it, which
//! `PyArg_ParseTuple`/`Py_BuildValue` format tag carries it, and which
//! printf format traces it.
//!
//! # Type Mappings
//!
//! | Basic type | Kind | Pack | Trace |
//! |------------|------|------|-------|
//! | `char` with `*` | string | `z` | `\"%s\"` |
//! | `char` otherwise | int | `b` | `%08x` |
//! | `int` / `unsigned int` | int / unsigned int | `i` / `I` | `%d` / `%u` |
//! | `int8_t`..`int32_t` | int | `c` `h` `l` | `%d` |
//! | `uint8_t`..`uint32_t` | unsigned int | `b` `H` `k` | `%u` |
//! | `int64_t` / `uint64_t` | 64 bits | `L` / `K` | `%ld` / `%lu` |
//! | `size_t` | size_t | `n` | `%lu` |
//! | `float` / `double` | float | `f` / `d` | `%f` |
//! | `bool_t` | bool | `i` | `%d` |
//! | known enum | int | `i` | `%d` |
//! | anything else | opaque object | `O` | `%p` |

use crate::naming::strip_leading_prefix;
use serde::Serialize;
use std::collections::BTreeSet;

/// How a value is represented on the managed side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticKind {
    String,
    Int,
    UnsignedInt,
    Int64,
    UnsignedInt64,
    Size,
    Float,
    Bool,
    EnumAsInt,
    OpaqueObject,
}

impl SemanticKind {
    /// Human readable type name used in generated error messages
    pub fn description(&self) -> &'static str {
        match self {
            SemanticKind::String => "string",
            SemanticKind::Int | SemanticKind::EnumAsInt => "int",
            SemanticKind::UnsignedInt => "unsigned int",
            SemanticKind::Int64 => "64bits int",
            SemanticKind::UnsignedInt64 => "64bits unsigned int",
            SemanticKind::Size => "size_t",
            SemanticKind::Float => "float",
            SemanticKind::Bool => "bool",
            SemanticKind::OpaqueObject => "object",
        }
    }
}

/// Marshalling rule for one native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRule {
    pub kind: SemanticKind,
    /// Python type predicate, `None` for opaque objects
    pub check: Option<&'static str>,
    /// Python to C conversion function, `None` for opaque objects
    pub converter: Option<&'static str>,
    /// `PyArg_ParseTuple` / `Py_BuildValue` format tag
    pub pack_format: &'static str,
    /// printf format used by the trace statements
    pub trace_format: &'static str,
}

impl TypeRule {
    const fn scalar(
        kind: SemanticKind,
        check: &'static str,
        converter: &'static str,
        pack_format: &'static str,
        trace_format: &'static str,
    ) -> Self {
        Self {
            kind,
            check: Some(check),
            converter: Some(converter),
            pack_format,
            trace_format,
        }
    }

    pub const STRING: TypeRule = TypeRule::scalar(
        SemanticKind::String,
        "PyString_Check",
        "PyString_AsString",
        "z",
        "\\\"%s\\\"",
    );

    // Non-pointer chars travel as a byte but keep the int check.
    pub const CHAR: TypeRule =
        TypeRule::scalar(SemanticKind::Int, "PyInt_Check", "PyInt_AsLong", "b", "%08x");

    pub const INT: TypeRule =
        TypeRule::scalar(SemanticKind::Int, "PyLong_Check", "PyLong_AsLong", "i", "%d");

    pub const UNSIGNED_INT: TypeRule = TypeRule::scalar(
        SemanticKind::UnsignedInt,
        "PyLong_Check",
        "PyLong_AsUnsignedLong",
        "I",
        "%u",
    );

    pub const ENUM: TypeRule =
        TypeRule::scalar(SemanticKind::EnumAsInt, "PyInt_Check", "PyInt_AsLong", "i", "%d");

    pub const OPAQUE: TypeRule = TypeRule {
        kind: SemanticKind::OpaqueObject,
        check: None,
        converter: None,
        pack_format: "O",
        trace_format: "%p",
    };

    pub fn is_opaque(&self) -> bool {
        self.kind == SemanticKind::OpaqueObject
    }

    pub fn is_string(&self) -> bool {
        self.kind == SemanticKind::String
    }

    pub fn is_enum(&self) -> bool {
        self.kind == SemanticKind::EnumAsInt
    }
}

/// Fixed-width scalar table, keyed on the basic type token
struct ScalarMapping {
    basic_type: &'static str,
    rule: TypeRule,
}

const SCALAR_MAPPINGS: &[ScalarMapping] = &[
    ScalarMapping {
        basic_type: "int8_t",
        rule: TypeRule::scalar(SemanticKind::Int, "PyLong_Check", "PyLong_AsLong", "c", "%d"),
    },
    ScalarMapping {
        basic_type: "int16_t",
        rule: TypeRule::scalar(SemanticKind::Int, "PyLong_Check", "PyLong_AsLong", "h", "%d"),
    },
    ScalarMapping {
        basic_type: "int32_t",
        rule: TypeRule::scalar(SemanticKind::Int, "PyLong_Check", "PyLong_AsLong", "l", "%d"),
    },
    ScalarMapping {
        basic_type: "uint8_t",
        rule: TypeRule::scalar(
            SemanticKind::UnsignedInt,
            "PyLong_Check",
            "PyLong_AsUnsignedLong",
            "b",
            "%u",
        ),
    },
    ScalarMapping {
        basic_type: "uint16_t",
        rule: TypeRule::scalar(
            SemanticKind::UnsignedInt,
            "PyLong_Check",
            "PyLong_AsUnsignedLong",
            "H",
            "%u",
        ),
    },
    ScalarMapping {
        basic_type: "uint32_t",
        rule: TypeRule::scalar(
            SemanticKind::UnsignedInt,
            "PyLong_Check",
            "PyLong_AsUnsignedLong",
            "k",
            "%u",
        ),
    },
    ScalarMapping {
        basic_type: "int64_t",
        rule: TypeRule::scalar(
            SemanticKind::Int64,
            "PyLong_Check",
            "PyLong_AsLongLong",
            "L",
            "%ld",
        ),
    },
    ScalarMapping {
        basic_type: "uint64_t",
        rule: TypeRule::scalar(
            SemanticKind::UnsignedInt64,
            "PyLong_Check",
            "PyLong_AsUnsignedLongLong",
            "K",
            "%lu",
        ),
    },
    ScalarMapping {
        basic_type: "size_t",
        rule: TypeRule::scalar(SemanticKind::Size, "PyLong_Check", "PyLong_AsSsize_t", "n", "%lu"),
    },
    ScalarMapping {
        basic_type: "float",
        rule: TypeRule::scalar(SemanticKind::Float, "PyFloat_Check", "PyFloat_AsDouble", "f", "%f"),
    },
    ScalarMapping {
        basic_type: "double",
        rule: TypeRule::scalar(SemanticKind::Float, "PyFloat_Check", "PyFloat_AsDouble", "d", "%f"),
    },
    ScalarMapping {
        basic_type: "bool_t",
        rule: TypeRule::scalar(SemanticKind::Bool, "PyBool_Check", "PyInt_AsLong", "i", "%d"),
    },
];

/// Resolve the marshalling rule of a native type.
///
/// `basic_type` is the bare type token (`char`, `LinphoneCall`),
/// `complete_type` its full spelling (`const char *`, `LinphoneCall *`).
/// Known enum names are compared after stripping `library_prefix` and win
/// over every other mapping. Tokens matching nothing resolve to
/// [`TypeRule::OPAQUE`]; whether a class backs them is checked later.
pub fn resolve(
    basic_type: &str,
    complete_type: &str,
    enum_names: &BTreeSet<String>,
    library_prefix: &str,
) -> TypeRule {
    if enum_names.contains(strip_leading_prefix(basic_type, library_prefix)) {
        return TypeRule::ENUM;
    }

    match basic_type {
        "char" => {
            if complete_type.contains('*') {
                TypeRule::STRING
            } else {
                TypeRule::CHAR
            }
        }
        "int" => {
            if complete_type.split_whitespace().any(|t| t == "unsigned") {
                TypeRule::UNSIGNED_INT
            } else {
                TypeRule::INT
            }
        }
        other => SCALAR_MAPPINGS
            .iter()
            .find(|m| m.basic_type == other)
            .map(|m| m.rule)
            .unwrap_or(TypeRule::OPAQUE),
    }
}


#[cfg(test)]
#[path = "type_rule/type_rule_parameterized_tests.rs"]
mod type_rule_parameterized_tests;
