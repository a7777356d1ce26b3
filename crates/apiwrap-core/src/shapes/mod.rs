//! Method body generation.
//!
//! Every generated C function follows the same five-stage pipeline:
//!
//! ```text
//! locals          declarations for the result, self and argument holders
//!   ↓
//! arguments       stale-handle checks, argument parsing and validation
//!   ↓
//! enter trace     ">>> name(args)"
//!   ↓
//! call            the native call and result conversion
//!   ↓
//! exit trace      "<<< name -> result"
//!   + return
//! ```
//!
//! A [`Shape`] is one of the seven call patterns a native API exposes. Each
//! shape fills in the [`Stages`] its own way; [`Shape::render`] assembles them
//! in order.

mod event;
mod lifecycle;
mod plain;
mod setter;

use crate::error::GenResult;
use crate::model::{CallShape, MethodSignature, Param};
use crate::naming::Naming;
use crate::registry::{ClassInfo, Registry};

pub use event::registration_line;

/// Rendered C fragments, one per pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stages {
    pub locals: String,
    pub arguments: String,
    pub enter_trace: String,
    pub call: String,
    pub exit_trace: String,
    pub ret: String,
}

impl Stages {
    /// Concatenate the stages in pipeline order
    pub fn assemble(&self) -> String {
        [
            self.locals.as_str(),
            self.arguments.as_str(),
            self.enter_trace.as_str(),
            self.call.as_str(),
            self.exit_trace.as_str(),
            self.ret.as_str(),
        ]
        .concat()
    }
}

/// A call shape together with the inputs it is generated from.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// `tp_new`: allocate a wrapper with no native object yet
    Constructor { class: &'a ClassInfo },
    /// Wrap an existing native pointer, reusing the user-data slot
    PointerAdopt { class: &'a ClassInfo },
    /// `tp_dealloc`: release the native object by the class discipline
    Destructor { class: &'a ClassInfo },
    /// Type or instance method
    Plain {
        class: &'a ClassInfo,
        signature: &'a MethodSignature,
    },
    PropertyGet {
        class: &'a ClassInfo,
        signature: &'a MethodSignature,
    },
    PropertySet {
        class: &'a ClassInfo,
        signature: &'a MethodSignature,
        attribute: &'a str,
    },
    /// Native callback forwarding to the session's registered callable
    EventCallback {
        central: &'a ClassInfo,
        event: &'a str,
        signature: &'a MethodSignature,
    },
}

impl Shape<'_> {
    pub fn call_shape(&self) -> CallShape {
        match self {
            Shape::Constructor { .. } => CallShape::Constructor,
            Shape::PointerAdopt { .. } => CallShape::PointerAdopt,
            Shape::Destructor { .. } => CallShape::Destructor,
            Shape::Plain { .. } => CallShape::Plain,
            Shape::PropertyGet { .. } => CallShape::PropertyGet,
            Shape::PropertySet { .. } => CallShape::PropertySet,
            Shape::EventCallback { .. } => CallShape::EventCallback,
        }
    }

    /// Fill in the pipeline stages for this shape
    pub fn stages(&self, registry: &Registry) -> GenResult<Stages> {
        let naming = registry.naming();
        match *self {
            Shape::Constructor { class } => Ok(lifecycle::constructor(class, naming)),
            Shape::PointerAdopt { class } => Ok(lifecycle::pointer_adopt(class, naming)),
            Shape::Destructor { class } => Ok(lifecycle::destructor(class, naming)),
            Shape::Plain { class, signature } | Shape::PropertyGet { class, signature } => {
                plain::stages(class, signature, registry)
            }
            Shape::PropertySet {
                class,
                signature,
                attribute,
            } => setter::stages(class, signature, attribute, naming),
            Shape::EventCallback {
                central,
                event,
                signature,
            } => event::stages(central, event, signature, registry),
        }
    }

    /// Render the C output of this shape.
    ///
    /// Event callbacks render a complete function definition; every other
    /// shape renders the function body only.
    pub fn render(&self, registry: &Registry) -> GenResult<String> {
        let body = self.stages(registry)?.assemble();
        match *self {
            Shape::EventCallback {
                central,
                event,
                signature,
            } => Ok(event::definition(central, event, signature, &body, registry.naming())),
            _ => Ok(body),
        }
    }
}

/// `pylinphone_trace(1, "[PYLINPHONE] >>> %s(<fmt>)", __FUNCTION__, <args>);`
fn trace_enter(naming: &Naming, fmt: &str, args: &[String]) -> String {
    format!(
        "{}(1, \"{} >>> %s({})\", __FUNCTION__{});",
        naming.trace_function(),
        naming.trace_tag(),
        fmt,
        trailing_args(args)
    )
}

/// `pylinphone_trace(-1, "[PYLINPHONE] <<< %s<outcome>", __FUNCTION__, <args>);`
fn trace_exit(naming: &Naming, outcome: &str, args: &[String]) -> String {
    format!(
        "{}(-1, \"{} <<< %s{}\", __FUNCTION__{});",
        naming.trace_function(),
        naming.trace_tag(),
        outcome,
        trailing_args(args)
    )
}

fn trailing_args(args: &[String]) -> String {
    args.iter().map(|a| format!(", {a}")).collect()
}

/// Trace format and values for one parameter.
///
/// Opaque objects trace both the wrapper and its native pointer.
fn trace_param(param: &Param, value: String, native: String) -> (&'static str, Vec<String>) {
    if param.rule.is_opaque() {
        ("%p [%p]", vec![value, native])
    } else {
        (param.rule.trace_format, vec![value])
    }
}

/// Resolve `native_ptr` from `self`, failing on a released wrapper
fn self_native_ptr_check(naming: &Naming, class: &str, fail: &str) -> String {
    format!(
        "\tnative_ptr = {get}(self);\n\
         \tif (native_ptr == NULL) {{\n\
         \t\tPyErr_SetString(PyExc_TypeError, \"Invalid {qualified} instance\");\n\
         \t\treturn {fail};\n\
         \t}}\n",
        get = naming.get_native_ptr(class),
        qualified = naming.qualified(class),
    )
}

/// Resolve the native pointer of an opaque argument, failing on a released wrapper
fn arg_native_ptr_check(naming: &Naming, param: &Param, fail: &str) -> String {
    let class = naming.strip(&param.basic_type);
    format!(
        "\tif ((_{name}_native_ptr = {get}(_{name})) == NULL) {{\n\
         \t\tPyErr_SetString(PyExc_TypeError, \"Invalid {qualified} instance\");\n\
         \t\treturn {fail};\n\
         \t}}\n",
        name = param.name,
        get = naming.get_native_ptr(class),
        qualified = naming.qualified(class),
    )
}

/// Wrap `native` in a fresh wrapper stored into `target`, taking a native
/// reference for refcounted classes when `take_ref` is set
fn new_wrapper(
    class: &ClassInfo,
    naming: &Naming,
    target: &str,
    native: &str,
    cast_type: &str,
    take_ref: bool,
    pad: &str,
) -> String {
    let mut code = format!(
        "{pad}{target} = {new}(&{type_object}, {native});\n",
        new = naming.new_from_native_ptr(&class.name),
        type_object = naming.type_object(&class.name),
    );
    if take_ref && class.is_refcountable() {
        code.push_str(&format!(
            "{pad}if ({native} != NULL) {{\n\
             {pad}\t{func}(({cast_type}){native});\n\
             {pad}}}\n",
            func = class.native_function("ref"),
        ));
    }
    code
}
