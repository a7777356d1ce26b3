//! Descriptors produced by a generation run.
//!
//! Every descriptor is created once, filled with rendered C fragments, and
//! never changed afterwards. The whole [`ModuleDescriptor`] serializes to
//! JSON for the assembly step that writes the final source files.

use crate::error::GenResult;
use crate::registry::{ClassInfo, Registry};
use crate::tree::ApiNode;
use crate::type_rule::TypeRule;
use serde::Serialize;

/// One native parameter with its resolved marshalling rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub basic_type: String,
    pub complete_type: String,
    pub rule: TypeRule,
}

impl Param {
    pub fn new(
        name: impl Into<String>,
        basic_type: impl Into<String>,
        complete_type: impl Into<String>,
        registry: &Registry,
    ) -> Self {
        let basic_type = basic_type.into();
        let complete_type = complete_type.into();
        let rule = registry.rule(&basic_type, &complete_type);
        Self {
            name: name.into(),
            basic_type,
            complete_type,
            rule,
        }
    }

    /// Parse an `<argument name type completetype>` node
    pub fn parse(node: &ApiNode, registry: &Registry) -> GenResult<Self> {
        Ok(Self::new(
            node.required_attr("name")?,
            node.required_attr("type")?,
            node.required_attr("completetype")?,
            registry,
        ))
    }

    /// C type of the local holding this parameter in generated code
    pub fn local_type(&self) -> &str {
        if self.rule.is_enum() {
            "int"
        } else {
            &self.complete_type
        }
    }
}

/// Non-void return value of a native function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnDesc {
    pub basic_type: String,
    pub complete_type: String,
    pub rule: TypeRule,
}

/// Parsed shape of a native function node, before any rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub native_name: String,
    /// The instance argument; absent for class methods
    pub self_param: Option<Param>,
    pub params: Vec<Param>,
    pub ret: Option<ReturnDesc>,
}

impl MethodSignature {
    /// Parse a method-like node (`classmethod`, `instancemethod`, `getter`,
    /// `setter`, `event`).
    ///
    /// Every tag except `classmethod` treats its first argument as the
    /// instance. A `void` return is recorded as `None`.
    pub fn parse(node: &ApiNode, registry: &Registry) -> GenResult<Self> {
        let native_name = node.required_attr("name")?.to_string();

        let ret = match node.find("return")? {
            Some(ret) => {
                let complete_type = ret.required_attr("completetype")?;
                if complete_type == "void" {
                    None
                } else {
                    let basic_type = ret.required_attr("type")?;
                    Some(ReturnDesc {
                        basic_type: basic_type.to_string(),
                        complete_type: complete_type.to_string(),
                        rule: registry.rule(basic_type, complete_type),
                    })
                }
            }
            None => None,
        };

        let mut params = node
            .select("arguments/argument")?
            .into_iter()
            .map(|arg| Param::parse(arg, registry))
            .collect::<GenResult<Vec<_>>>()?;

        let self_param = if node.tag != "classmethod" && !params.is_empty() {
            Some(params.remove(0))
        } else {
            None
        };

        Ok(Self {
            native_name,
            self_param,
            params,
            ret,
        })
    }

    pub fn is_static(&self) -> bool {
        self.self_param.is_none()
    }
}

/// The closed set of method generation patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallShape {
    Constructor,
    PointerAdopt,
    Destructor,
    Plain,
    PropertyGet,
    PropertySet,
    EventCallback,
}

/// One rendered method, getter or setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDescriptor {
    /// Generated name, native function prefix stripped
    pub name: String,
    /// Native call target, absent for lifecycle shapes
    pub native_name: Option<String>,
    pub shape: CallShape,
    pub self_param: Option<Param>,
    pub params: Vec<Param>,
    pub ret: Option<ReturnDesc>,
    pub body: String,
}

impl MemberDescriptor {
    /// Descriptor for a lifecycle body with no native signature
    pub fn lifecycle(name: impl Into<String>, shape: CallShape, body: String) -> Self {
        Self {
            name: name.into(),
            native_name: None,
            shape,
            self_param: None,
            params: Vec::new(),
            ret: None,
            body,
        }
    }

    pub fn from_signature(
        name: impl Into<String>,
        shape: CallShape,
        signature: MethodSignature,
        body: String,
    ) -> Self {
        Self {
            name: name.into(),
            native_name: Some(signature.native_name),
            shape,
            self_param: signature.self_param,
            params: signature.params,
            ret: signature.ret,
            body,
        }
    }

    pub fn is_static(&self) -> bool {
        self.self_param.is_none()
    }
}

/// A Python attribute backed by native accessor functions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    /// Attribute name, shared by both accessors
    pub name: String,
    pub getter: Option<MemberDescriptor>,
    pub setter: Option<MemberDescriptor>,
    /// `PyGetSetDef` getter slot: `(getter)pylinphone_Call_get_state` or `NULL`
    pub getter_reference: String,
    /// `PyGetSetDef` setter slot: `(setter)pylinphone_Call_set_state` or `NULL`
    pub setter_reference: String,
    pub getter_definition_begin: Option<String>,
    pub setter_definition_begin: Option<String>,
}

/// One asynchronous callback of the session class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    /// Native callback type (`LinphoneCoreCallStateChangedCb`)
    pub native_name: String,
    /// Short event name (`call_state_changed`)
    pub name: String,
    pub doc: String,
    /// Callback arguments after the session pointer
    pub params: Vec<Param>,
    /// Complete C callback function definition
    pub callback: String,
    /// Registration-table assignment line
    pub registration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub c_name: String,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDescriptor {
    pub name: String,
    pub c_name: String,
    /// Enum documentation followed by one line per value
    pub doc: String,
    pub values: Vec<EnumValue>,
}

/// Everything generated for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescriptor {
    #[serde(flatten)]
    pub info: ClassInfo,
    pub doc: String,
    /// Extra fields of the wrapper struct
    pub object_members: String,
    pub type_methods: Vec<MemberDescriptor>,
    pub instance_methods: Vec<MemberDescriptor>,
    pub hand_written_type_methods: Vec<String>,
    pub hand_written_instance_methods: Vec<String>,
    pub properties: Vec<PropertyDescriptor>,
    /// Only populated on the session class
    pub events: Vec<EventDescriptor>,
    pub new_method: MemberDescriptor,
    pub new_from_native_ptr: MemberDescriptor,
    pub dealloc: MemberDescriptor,
}

impl ClassDescriptor {
    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Find a generated type or instance method by generated name
    pub fn method(&self, name: &str) -> Option<&MemberDescriptor> {
        self.type_methods
            .iter()
            .chain(self.instance_methods.iter())
            .find(|m| m.name == name)
    }
}

/// The fully rendered module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    pub module_name: String,
    pub enums: Vec<EnumDescriptor>,
    pub classes: Vec<ClassDescriptor>,
}

impl ModuleDescriptor {
    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name() == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Events of every class, in class order
    pub fn events(&self) -> impl Iterator<Item = &EventDescriptor> {
        self.classes.iter().flat_map(|c| c.events.iter())
    }

    pub fn to_json_pretty(&self) -> GenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
