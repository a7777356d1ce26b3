//! Type methods, instance methods and property getters.

use super::{Stages, arg_native_ptr_check, new_wrapper, self_native_ptr_check, trace_enter, trace_exit, trace_param};
use crate::error::GenResult;
use crate::model::{MethodSignature, Param, ReturnDesc};
use crate::naming::{Naming, remove_const};
use crate::registry::{ClassInfo, Registry};

pub(super) fn stages(
    class: &ClassInfo,
    signature: &MethodSignature,
    registry: &Registry,
) -> GenResult<Stages> {
    let naming = registry.naming();
    Ok(Stages {
        locals: locals(
            signature.self_param.as_ref(),
            &signature.params,
            signature.ret.as_ref(),
        ),
        arguments: arguments(class, signature, naming),
        enter_trace: enter_trace(signature, naming),
        call: call(signature, registry)?,
        exit_trace: exit_trace(signature.ret.as_ref(), naming),
        ret: return_result(signature.ret.as_ref()),
    })
}

pub(super) fn locals(self_param: Option<&Param>, params: &[Param], ret: Option<&ReturnDesc>) -> String {
    let mut code = String::new();
    if let Some(ret) = ret {
        code.push_str(&format!("\t{} cresult;\n", ret.complete_type));
        if ret.rule.is_opaque() {
            code.push_str("\tPyObject * pyresult;\n");
        }
        code.push_str("\tPyObject * pyret;\n");
    }
    if let Some(self_param) = self_param {
        code.push_str(&format!("\t{} native_ptr;\n", self_param.complete_type));
    }
    for param in params {
        if param.rule.is_opaque() {
            code.push_str(&format!("\tPyObject * _{};\n", param.name));
            code.push_str(&format!(
                "\t{} _{}_native_ptr;\n",
                param.complete_type, param.name
            ));
        } else {
            code.push_str(&format!("\t{} _{};\n", param.local_type(), param.name));
        }
    }
    code
}

fn arguments(class: &ClassInfo, signature: &MethodSignature, naming: &Naming) -> String {
    let mut code = String::new();
    if signature.self_param.is_some() {
        code.push_str(&self_native_ptr_check(naming, &class.name, "NULL"));
    }
    if !signature.params.is_empty() {
        let format: String = signature
            .params
            .iter()
            .map(|p| p.rule.pack_format)
            .collect();
        let targets = signature
            .params
            .iter()
            .map(|p| format!("&_{}", p.name))
            .collect::<Vec<_>>()
            .join(", ");
        code.push_str(&format!(
            "\tif (!PyArg_ParseTuple(args, \"{format}\", {targets})) {{\n\
             \t\treturn NULL;\n\
             \t}}\n"
        ));
    }
    for param in signature.params.iter().filter(|p| p.rule.is_opaque()) {
        code.push_str(&arg_native_ptr_check(naming, param, "NULL"));
    }
    code
}

pub(super) fn enter_trace(signature: &MethodSignature, naming: &Naming) -> String {
    let mut formats = Vec::new();
    let mut args = Vec::new();
    if signature.self_param.is_some() {
        formats.push("%p [%p]");
        args.push("self".to_string());
        args.push("native_ptr".to_string());
    }
    for param in &signature.params {
        let (format, values) = trace_param(
            param,
            format!("_{}", param.name),
            format!("_{}_native_ptr", param.name),
        );
        formats.push(format);
        args.extend(values);
    }
    format!("\t{}\n", trace_enter(naming, &formats.join(", "), &args))
}

fn call(signature: &MethodSignature, registry: &Registry) -> GenResult<String> {
    let naming = registry.naming();
    let mut call_args = Vec::new();
    if signature.self_param.is_some() {
        call_args.push("native_ptr".to_string());
    }
    for param in &signature.params {
        if param.rule.is_opaque() {
            call_args.push(format!("_{}_native_ptr", param.name));
        } else {
            call_args.push(format!("_{}", param.name));
        }
    }

    let assign = if signature.ret.is_some() { "cresult = " } else { "" };
    let mut code = format!(
        "\t{assign}{}({});\n\t{}();\n",
        signature.native_name,
        call_args.join(", "),
        naming.dispatch_messages()
    );

    if let Some(ret) = &signature.ret {
        if ret.rule.is_opaque() {
            let target = registry.require_class(&ret.basic_type)?;
            // Only instance calls hand back a reference the wrapper must own.
            let owns_reference = !signature.is_static();
            code.push_str(&adopt_result(target, ret, owns_reference, naming));
            code.push_str("\tpyret = Py_BuildValue(\"O\", pyresult);\n");
        } else {
            code.push_str(&format!(
                "\tpyret = Py_BuildValue(\"{}\", cresult);\n",
                ret.rule.pack_format
            ));
        }
    }
    Ok(code)
}

/// Turn `cresult` into `pyresult`, preferring the wrapper cached in the
/// native object's user data
fn adopt_result(target: &ClassInfo, ret: &ReturnDesc, owns_reference: bool, naming: &Naming) -> String {
    let cast_type = remove_const(&ret.complete_type);
    if target.has_user_data {
        let get_user_data = target.native_function("get_user_data");
        format!(
            "\tif ((cresult != NULL) && ({get_user_data}(cresult) != NULL)) {{\n\
             \t\tpyresult = (PyObject *){get_user_data}(cresult);\n\
             \t\tPy_INCREF(pyresult);\n\
             \t}} else {{\n\
             {wrap}\
             \t}}\n",
            wrap = new_wrapper(target, naming, "pyresult", "cresult", &cast_type, owns_reference, "\t\t"),
        )
    } else {
        new_wrapper(target, naming, "pyresult", "cresult", &cast_type, owns_reference, "\t")
    }
}

fn exit_trace(ret: Option<&ReturnDesc>, naming: &Naming) -> String {
    let line = match ret {
        Some(_) => trace_exit(naming, " -> %p", &["pyret".to_string()]),
        None => trace_exit(naming, " -> None", &[]),
    };
    format!("\t{line}\n")
}

fn return_result(ret: Option<&ReturnDesc>) -> String {
    match ret {
        Some(ret) if ret.rule.is_opaque() => "\tPy_DECREF(pyresult);\n\treturn pyret;\n".to_string(),
        Some(_) => "\treturn pyret;\n".to_string(),
        None => "\tPy_RETURN_NONE;\n".to_string(),
    }
}
