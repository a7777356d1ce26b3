//! Session callbacks dispatching to Python callables.
//!
//! These functions run on a native call stack. They take the GIL before
//! touching any Python object, look the handler up in the session's
//! `vtable_dict`, report handler exceptions with `PyErr_Print` and release
//! the GIL on the way out. No exception ever crosses back into native code.
//!
//! Opaque arguments are only lent to the callback. A wrapper built here for a
//! class without refcounting is detached from the native pointer before it
//! is released, so its dealloc never frees memory the callback does not own.

use super::{Stages, new_wrapper, trace_enter, trace_exit, trace_param};
use crate::error::GenResult;
use crate::model::{MethodSignature, Param};
use crate::naming::{Naming, remove_const};
use crate::registry::{ClassInfo, Registry};

pub(super) fn stages(
    central: &ClassInfo,
    event: &str,
    signature: &MethodSignature,
    registry: &Registry,
) -> GenResult<Stages> {
    let naming = registry.naming();
    let opaque: Vec<&Param> = signature.params.iter().filter(|p| p.rule.is_opaque()).collect();

    let central_object = naming.object_struct(&central.name);
    let mut locals = format!(
        "\t{central_object} *pylc = ({central_object} *){}(lc);\n\
         \tPyObject *func;\n\
         \tPyObject *args;\n\
         \tPyObject *result;\n\
         \tPyGILState_STATE pygil_state;\n",
        central.native_function("get_user_data")
    );
    let mut borrowed = Vec::new();
    for param in &opaque {
        locals.push_str(&format!("\tPyObject * py{} = NULL;\n", param.name));
        let class = registry.require_class(&param.basic_type)?;
        if !class.is_refcountable() {
            locals.push_str(&format!("\tint py{}_borrowed = 0;\n", param.name));
            borrowed.push((*param, class));
        }
    }

    let mut arguments = format!(
        "\tpygil_state = PyGILState_Ensure();\n\
         \tfunc = (pylc != NULL) ? PyDict_GetItemString(pylc->vtable_dict, \"{event}\") : NULL;\n"
    );
    for param in &opaque {
        let class = registry.require_class(&param.basic_type)?;
        arguments.push_str(&wrap_argument(class, param, naming));
    }

    let mut formats = vec!["%p"];
    let mut trace_args = vec!["lc".to_string()];
    for param in &signature.params {
        let value = if param.rule.is_opaque() {
            format!("py{}", param.name)
        } else {
            param.name.clone()
        };
        let (format, values) = trace_param(param, value, param.name.clone());
        formats.push(format);
        trace_args.extend(values);
    }

    let mut build_format = String::from("O");
    let mut build_args = vec!["pylc".to_string()];
    for param in &signature.params {
        build_format.push_str(param.rule.pack_format);
        if param.rule.is_opaque() {
            build_args.push(format!("py{}", param.name));
        } else {
            build_args.push(param.name.clone());
        }
    }
    let mut call = format!(
        "\tif ((func != NULL) && PyCallable_Check(func)) {{\n\
         \t\targs = Py_BuildValue(\"{build_format}\", {});\n\
         \t\tresult = PyEval_CallObject(func, args);\n\
         \t\tif (result == NULL) {{\n\
         \t\t\tPyErr_Print();\n\
         \t\t}}\n\
         \t\tPy_XDECREF(result);\n\
         \t\tPy_XDECREF(args);\n\
         \t}}\n",
        build_args.join(", ")
    );
    for (param, class) in &borrowed {
        call.push_str(&detach_argument(class, param, naming));
    }
    for param in &opaque {
        call.push_str(&format!("\tPy_XDECREF(py{});\n", param.name));
    }

    Ok(Stages {
        locals,
        arguments,
        enter_trace: format!("\t{}\n", trace_enter(naming, &formats.join(", "), &trace_args)),
        call,
        exit_trace: format!("\t{}\n", trace_exit(naming, "", &[])),
        ret: "\tPyGILState_Release(pygil_state);\n".to_string(),
    })
}

/// Recover the cached wrapper of an opaque callback argument, or build one
fn wrap_argument(class: &ClassInfo, param: &Param, naming: &Naming) -> String {
    let target = format!("py{}", param.name);
    let cast_type = remove_const(&param.complete_type);
    let fresh = |pad: &str| {
        let mut code = new_wrapper(class, naming, &target, &param.name, &cast_type, true, pad);
        if !class.is_refcountable() {
            code.push_str(&format!("{pad}{target}_borrowed = 1;\n"));
        }
        code
    };
    if class.has_user_data {
        format!(
            "\t{target} = (PyObject *){get_user_data}({native});\n\
             \tif ({target} != NULL) {{\n\
             \t\tPy_INCREF({target});\n\
             \t}} else {{\n\
             {wrap}\
             \t}}\n",
            native = param.name,
            get_user_data = class.native_function("get_user_data"),
            wrap = fresh("\t\t"),
        )
    } else {
        fresh("\t")
    }
}

/// Drop a fresh wrapper's hold on a borrowed native pointer before release
fn detach_argument(class: &ClassInfo, param: &Param, naming: &Naming) -> String {
    let target = format!("py{}", param.name);
    let mut code = format!(
        "\tif ({target}_borrowed && PyObject_TypeCheck({target}, &{type_object})) {{\n\
         \t\t(({object} *){target})->native_ptr = NULL;\n",
        type_object = naming.type_object(&class.name),
        object = naming.object_struct(&class.name),
    );
    if class.has_user_data {
        code.push_str(&format!(
            "\t\t{}(({}){}, NULL);\n",
            class.native_function("set_user_data"),
            remove_const(&param.complete_type),
            param.name
        ));
    }
    code.push_str("\t}\n");
    code
}

/// Full callback definition around a rendered body
pub(super) fn definition(
    central: &ClassInfo,
    event: &str,
    signature: &MethodSignature,
    body: &str,
    naming: &Naming,
) -> String {
    let mut arguments = vec![format!("{} * lc", central.c_name)];
    arguments.extend(
        signature
            .params
            .iter()
            .map(|p| format!("{} {}", p.complete_type, p.name)),
    );
    format!(
        "static void {}({}) {{\n{body}}}\n",
        naming.event_callback(&central.name, event),
        arguments.join(", ")
    )
}

/// `_vtable.<event> = pylinphone_Core_callback_<event>;`
pub fn registration_line(naming: &Naming, central_class: &str, event: &str) -> String {
    format!(
        "_vtable.{event} = {};",
        naming.event_callback(central_class, event)
    )
}
