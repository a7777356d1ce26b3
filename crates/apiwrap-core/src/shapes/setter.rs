//! Property setters (`int setter(PyObject *self, PyObject *value, void *closure)`).
//!
//! The native setter's own return value is ignored; the generated function
//! returns the `0`/`-1` status CPython expects.

use super::{Stages, plain, self_native_ptr_check, trace_exit};
use crate::error::{GenError, GenResult};
use crate::model::{MethodSignature, Param};
use crate::naming::Naming;
use crate::registry::ClassInfo;

pub(super) fn stages(
    class: &ClassInfo,
    signature: &MethodSignature,
    attribute: &str,
    naming: &Naming,
) -> GenResult<Stages> {
    let value = signature
        .params
        .first()
        .ok_or_else(|| GenError::MissingSetterArgument(signature.native_name.clone()))?;

    let use_native_ptr = if value.rule.is_opaque() { "_native_ptr" } else { "" };

    Ok(Stages {
        locals: plain::locals(signature.self_param.as_ref(), &signature.params, None),
        arguments: arguments(class, value, attribute, naming),
        enter_trace: plain::enter_trace(signature, naming),
        call: format!(
            "\t{}(native_ptr, _{}{use_native_ptr});\n\t{}();\n",
            signature.native_name,
            value.name,
            naming.dispatch_messages()
        ),
        exit_trace: format!("\t{}\n", trace_exit(naming, " -> 0", &[])),
        ret: "\treturn 0;\n".to_string(),
    })
}

fn arguments(class: &ClassInfo, value: &Param, attribute: &str, naming: &Naming) -> String {
    let mut code = self_native_ptr_check(naming, &class.name, "-1");

    code.push_str(&format!(
        "\tif (value == NULL) {{\n\
         \t\tPyErr_SetString(PyExc_TypeError, \"Cannot delete the {attribute} attribute\");\n\
         \t\treturn -1;\n\
         \t}}\n"
    ));

    let name = &value.name;
    if value.rule.is_opaque() {
        let value_class = naming.strip(&value.basic_type);
        code.push_str(&format!(
            "\tif (!PyObject_IsInstance(value, (PyObject *)&{type_object})) {{\n\
             \t\tPyErr_SetString(PyExc_TypeError, \"The {attribute} attribute value must be a {qualified} instance\");\n\
             \t\treturn -1;\n\
             \t}}\n\
             \t_{name} = value;\n\
             \t_{name}_native_ptr = {get}(_{name});\n\
             \tif (_{name}_native_ptr == NULL) {{\n\
             \t\tPyErr_SetString(PyExc_TypeError, \"Invalid {qualified} instance\");\n\
             \t\treturn -1;\n\
             \t}}\n",
            type_object = naming.type_object(value_class),
            qualified = naming.qualified(value_class),
            get = naming.get_native_ptr(value_class),
        ));
        return code;
    }

    if let (Some(check), Some(converter)) = (value.rule.check, value.rule.converter) {
        // Strings accept None, which maps to a NULL pointer.
        let accept_none = if value.rule.is_string() { "(value != Py_None) && " } else { "" };
        code.push_str(&format!(
            "\tif ({accept_none}!{check}(value)) {{\n\
             \t\tPyErr_SetString(PyExc_TypeError, \"The {attribute} attribute value must be a {description}\");\n\
             \t\treturn -1;\n\
             \t}}\n",
            description = value.rule.kind.description(),
        ));
        if value.rule.is_string() {
            code.push_str(&format!(
                "\t_{name} = (value == Py_None) ? NULL : {converter}(value);\n"
            ));
        } else {
            code.push_str(&format!(
                "\t_{name} = ({}){converter}(value);\n",
                value.local_type()
            ));
        }
    }
    code
}
