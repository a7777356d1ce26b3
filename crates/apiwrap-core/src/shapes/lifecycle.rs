//! Wrapper allocation, pointer adoption and teardown.

use super::{Stages, trace_enter, trace_exit};
use crate::naming::Naming;
use crate::registry::{ClassInfo, Release};

/// Two-phase construction: the wrapper starts without a native object
pub(super) fn constructor(class: &ClassInfo, naming: &Naming) -> Stages {
    let object = naming.object_struct(&class.name);
    Stages {
        locals: format!("\t{object} *self = ({object} *)type->tp_alloc(type, 0);\n"),
        arguments: String::new(),
        enter_trace: format!("\t{}\n", trace_enter(naming, "", &[])),
        call: format!(
            "\tif (self == NULL) {{\n\
             \t\t{}\n\
             \t\treturn NULL;\n\
             \t}}\n\
             \tself->native_ptr = NULL;\n",
            trace_exit(naming, " -> NULL", &[])
        ),
        exit_trace: format!("\t{}\n", trace_exit(naming, " -> %p", &["self".to_string()])),
        ret: "\treturn (PyObject *)self;\n".to_string(),
    }
}

/// Wrap an existing native pointer; a NULL pointer yields `None` without allocating
pub(super) fn pointer_adopt(class: &ClassInfo, naming: &Naming) -> Stages {
    let object = naming.object_struct(&class.name);
    let none_trace = trace_exit(naming, " -> None", &[]);

    let mut call = format!(
        "\tif (native_ptr == NULL) {{\n\
         \t\t{none_trace}\n\
         \t\tPy_RETURN_NONE;\n\
         \t}}\n\
         \tself = ({object} *)PyObject_New({object}, type);\n\
         \tif (self == NULL) {{\n\
         \t\t{none_trace}\n\
         \t\tPy_RETURN_NONE;\n\
         \t}}\n\
         \tself->native_ptr = ({c_name} *)native_ptr;\n",
        c_name = class.c_name,
    );
    if class.has_user_data {
        call.push_str(&format!(
            "\t{}(self->native_ptr, self);\n",
            class.native_function("set_user_data")
        ));
    }

    Stages {
        locals: format!("\t{object} *self;\n"),
        arguments: String::new(),
        enter_trace: format!(
            "\t{}\n",
            trace_enter(naming, "%p", &["native_ptr".to_string()])
        ),
        call,
        exit_trace: format!("\t{}\n", trace_exit(naming, " -> %p", &["self".to_string()])),
        ret: "\treturn (PyObject *)self;\n".to_string(),
    }
}

/// Release the native object by the class discipline.
///
/// Releasing a refcounted object can run native callbacks that reach this
/// wrapper again; the wrapper holds an extra reference across the release so
/// it cannot be freed twice. The user-data slot is cleared first so a later
/// lookup never finds this wrapper.
pub(super) fn destructor(class: &ClassInfo, naming: &Naming) -> Stages {
    let mut call = String::new();
    if class.has_user_data {
        call.push_str(&format!(
            "\tif (native_ptr != NULL) {{\n\
             \t\t{}(native_ptr, NULL);\n\
             \t}}\n",
            class.native_function("set_user_data")
        ));
    }
    match class.release {
        Release::Unref => {
            call.push_str(&format!(
                "\tPy_INCREF(self);\n\
                 \tif (native_ptr != NULL) {{\n\
                 \t\t{}(native_ptr);\n\
                 \t}}\n\
                 \tPy_REFCNT(self)--;\n",
                class.native_function("unref")
            ));
        }
        Release::Destroy => {
            call.push_str(&format!(
                "\tif (native_ptr != NULL) {{\n\
                 \t\t{}(native_ptr);\n\
                 \t}}\n",
                class.native_function("destroy")
            ));
        }
        Release::None => {}
    }
    call.push_str(&format!(
        "\t{}();\n\tself->ob_type->tp_free(self);\n",
        naming.dispatch_messages()
    ));

    Stages {
        locals: format!(
            "\t{} * native_ptr = {}(self);\n",
            class.c_name,
            naming.get_native_ptr(&class.name)
        ),
        arguments: String::new(),
        enter_trace: format!(
            "\t{}\n",
            trace_enter(
                naming,
                "%p [%p]",
                &["self".to_string(), "native_ptr".to_string()]
            )
        ),
        call,
        exit_trace: format!("\t{}\n", trace_exit(naming, "", &[])),
        ret: String::new(),
    }
}
