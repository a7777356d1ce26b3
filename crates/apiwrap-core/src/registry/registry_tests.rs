#![allow(non_snake_case)]

use super::*;
use crate::type_rule::SemanticKind;

fn registry() -> Registry {
    Registry::builder(Naming::default())
        .enum_name("CallState")
        .class(
            ClassInfo::new("Call", "LinphoneCall", "linphone_call_")
                .with_release(Release::Unref)
                .with_user_data(true),
        )
        .class(ClassInfo::new("Core", "LinphoneCore", "linphone_core_").with_release(Release::Destroy))
        .build()
}

// Release tests

#[test]
fn Release___from_flags___refcount_wins_over_destroy() {
    assert_eq!(Release::from_flags(true, true), Release::Unref);
    assert_eq!(Release::from_flags(true, false), Release::Unref);
    assert_eq!(Release::from_flags(false, true), Release::Destroy);
    assert_eq!(Release::from_flags(false, false), Release::None);
}

// ClassInfo tests

#[test]
fn ClassInfo___new___is_plain_without_user_data() {
    let info = ClassInfo::new("Address", "LinphoneAddress", "linphone_address_");

    assert!(!info.is_refcountable());
    assert!(!info.is_destroyable());
    assert!(!info.has_user_data);
}

#[test]
fn ClassInfo___native_function___appends_to_prefix() {
    let info = ClassInfo::new("Call", "LinphoneCall", "linphone_call_");

    assert_eq!(info.native_function("get_user_data"), "linphone_call_get_user_data");
}

// Registry tests

#[test]
fn Registry___class_for_type___strips_library_prefix() {
    let registry = registry();

    let info = registry.class_for_type("LinphoneCall").unwrap();

    assert_eq!(info.name, "Call");
    assert!(info.is_refcountable());
}

#[test]
fn Registry___require_class___unknown_returns_error() {
    let registry = registry();

    let result = registry.require_class("LinphoneBuffer");

    assert!(matches!(result, Err(GenError::UnknownClass(ref t)) if t == "LinphoneBuffer"));
}

#[test]
fn Registry___central___resolves_configured_class() {
    let registry = registry();

    let central = registry.central().unwrap();

    assert_eq!(central.c_name, "LinphoneCore");
}

#[test]
fn Registry___central___missing_class_is_error() {
    let registry = Registry::builder(Naming::default())
        .central_class("Session")
        .build();

    assert!(matches!(registry.central(), Err(GenError::UnknownClass(_))));
}

#[test]
fn Registry___rule___uses_registered_enums() {
    let registry = registry();

    assert_eq!(
        registry.rule("LinphoneCallState", "LinphoneCallState").kind,
        SemanticKind::EnumAsInt
    );
    assert!(registry.rule("LinphoneCall", "LinphoneCall *").is_opaque());
    assert!(registry.is_enum("LinphoneCallState"));
    assert!(!registry.is_enum("LinphoneCall"));
}

#[test]
fn RegistryBuilder___duplicate_class___last_definition_wins() {
    let registry = Registry::builder(Naming::default())
        .class(ClassInfo::new("Call", "LinphoneCall", "linphone_call_"))
        .class(ClassInfo::new("Call", "LinphoneCall", "linphone_call_").with_user_data(true))
        .build();

    assert_eq!(registry.classes().count(), 1);
    assert!(registry.class("Call").unwrap().has_user_data);
}
