//! Node builders shared by unit tests

use crate::naming::Naming;
use crate::registry::{ClassInfo, Registry, Release};
use crate::tree::ApiNode;

/// `<argument name type completetype>`
pub fn arg(name: &str, basic: &str, complete: &str) -> ApiNode {
    ApiNode::new("argument")
        .with_attr("name", name)
        .with_attr("type", basic)
        .with_attr("completetype", complete)
}

/// A method-like node with a return type and arguments
pub fn method(tag: &str, name: &str, ret: (&str, &str), args: Vec<ApiNode>) -> ApiNode {
    ApiNode::new(tag)
        .with_attr("name", name)
        .with_child(
            ApiNode::new("return")
                .with_attr("type", ret.0)
                .with_attr("completetype", ret.1),
        )
        .with_child(ApiNode::new("arguments").with_children(args))
}

/// Registry with a handful of linphone-like classes and enums
pub fn registry() -> Registry {
    Registry::builder(Naming::default())
        .enum_name("CallState")
        .enum_name("Reason")
        .class(
            ClassInfo::new("Core", "LinphoneCore", "linphone_core_")
                .with_release(Release::Destroy)
                .with_user_data(true),
        )
        .class(
            ClassInfo::new("Call", "LinphoneCall", "linphone_call_")
                .with_release(Release::Unref)
                .with_user_data(true),
        )
        .class(
            ClassInfo::new("Address", "LinphoneAddress", "linphone_address_")
                .with_release(Release::Destroy),
        )
        .class(ClassInfo::new("Foo", "LinphoneFoo", "linphone_foo_"))
        .build()
}
