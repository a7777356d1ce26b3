//! Class Model Builder.
//!
//! Building a class happens in two passes. [`ClassBuilder::classify`] walks
//! one `class` node and decides which members are generated, hand-written or
//! skipped, and which capability flags the class carries. Once every class
//! has been classified and the [`Registry`] is frozen, [`ClassPlan::render`]
//! runs the call shapes over the planned members, at which point opaque
//! return types can be resolved against the complete class list.

use crate::config::GeneratorConfig;
use crate::docs::DocFormatter;
use crate::error::{GenError, GenResult};
use crate::model::{
    ClassDescriptor, EventDescriptor, MemberDescriptor, MethodSignature, PropertyDescriptor,
};
use crate::naming::member_name;
use crate::registry::{ClassInfo, Registry, Release};
use crate::shapes::{Shape, registration_line};
use crate::tree::ApiNode;

/// Instance methods that drive the release discipline instead of being exposed
const INTERNAL_INSTANCE_METHODS: &[&str] = &["destroy", "ref", "unref"];

/// Properties that drive capability flags instead of being exposed
const INTERNAL_PROPERTIES: &[&str] = &["user_data"];

/// A member selected for generation, with its description node
#[derive(Debug, Clone)]
struct PlannedMember<'t> {
    name: String,
    node: &'t ApiNode,
}

#[derive(Debug, Clone)]
struct PlannedProperty<'t> {
    name: String,
    getter: Option<PlannedMember<'t>>,
    setter: Option<PlannedMember<'t>>,
}

#[derive(Debug, Clone)]
struct PlannedEvent<'t> {
    native_name: String,
    name: String,
    doc: String,
    node: &'t ApiNode,
}

/// Classification result for one class, ready to render once the registry exists.
#[derive(Debug, Clone)]
pub struct ClassPlan<'t> {
    info: ClassInfo,
    doc: String,
    object_members: String,
    type_methods: Vec<PlannedMember<'t>>,
    instance_methods: Vec<PlannedMember<'t>>,
    hand_written_type_methods: Vec<String>,
    hand_written_instance_methods: Vec<String>,
    properties: Vec<PlannedProperty<'t>>,
    events: Vec<PlannedEvent<'t>>,
}

/// Classifies class nodes against the exclusion and hand-written sets.
pub struct ClassBuilder<'c> {
    config: &'c GeneratorConfig,
    docs: &'c dyn DocFormatter,
}

impl<'c> ClassBuilder<'c> {
    pub fn new(config: &'c GeneratorConfig, docs: &'c dyn DocFormatter) -> Self {
        Self { config, docs }
    }

    /// Classify one `class` node.
    ///
    /// Returns `Ok(None)` for deprecated and blacklisted classes.
    pub fn classify<'t>(&self, node: &'t ApiNode) -> GenResult<Option<ClassPlan<'t>>> {
        let c_name = node.required_attr("name")?;
        if node.is_deprecated() {
            tracing::debug!(class = c_name, "skipping deprecated class");
            return Ok(None);
        }
        if self.config.is_class_excluded(c_name) {
            tracing::debug!(class = c_name, "skipping blacklisted class");
            return Ok(None);
        }

        let naming = &self.config.naming;
        let name = naming.strip(c_name).to_string();
        let prefix = node.required_attr("cfunctionprefix")?;
        let release = Release::from_flags(node.flag("refcountable"), node.flag("destroyable"));

        let is_central = name == self.config.central_class;
        let mut plan = ClassPlan {
            info: ClassInfo::new(name, c_name, prefix).with_release(release),
            doc: self.docs.format(node),
            object_members: if is_central {
                "\tPyObject *vtable_dict;".to_string()
            } else {
                String::new()
            },
            type_methods: Vec::new(),
            instance_methods: Vec::new(),
            hand_written_type_methods: Vec::new(),
            hand_written_instance_methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        };

        if is_central {
            self.classify_events(node, &mut plan)?;
        }
        for method in node.select("classmethods/classmethod")? {
            if let Some((member, hand_written)) = self.classify_method(method, prefix, false)? {
                if hand_written {
                    plan.hand_written_type_methods.push(member.name);
                } else {
                    plan.type_methods.push(member);
                }
            }
        }
        for method in node.select("instancemethods/instancemethod")? {
            if let Some((member, hand_written)) = self.classify_method(method, prefix, true)? {
                if hand_written {
                    plan.hand_written_instance_methods.push(member.name);
                } else {
                    plan.instance_methods.push(member);
                }
            }
        }
        self.classify_properties(node, &mut plan)?;

        Ok(Some(plan))
    }

    fn classify_events<'t>(&self, node: &'t ApiNode, plan: &mut ClassPlan<'t>) -> GenResult<()> {
        for event in node.select("events/event")? {
            let native_name = event.required_attr("name")?;
            if event.is_deprecated() || self.config.is_event_excluded(native_name) {
                tracing::debug!(event = native_name, "skipping event");
                continue;
            }
            plan.events.push(PlannedEvent {
                native_name: native_name.to_string(),
                name: self.config.naming.event_name(native_name),
                doc: self.docs.format(event),
                node: event,
            });
        }
        Ok(())
    }

    /// Returns the planned member and whether it is hand-written
    fn classify_method<'t>(
        &self,
        node: &'t ApiNode,
        prefix: &str,
        instance: bool,
    ) -> GenResult<Option<(PlannedMember<'t>, bool)>> {
        let native_name = node.required_attr("name")?;
        if node.is_deprecated() || self.config.is_function_excluded(native_name) {
            tracing::debug!(function = native_name, "skipping method");
            return Ok(None);
        }
        let name = member_name(native_name, prefix);
        if instance && INTERNAL_INSTANCE_METHODS.contains(&name) {
            return Ok(None);
        }

        let hand_written = self.config.is_hand_written(native_name);
        if hand_written {
            tracing::debug!(function = native_name, "method is hand-written");
        }
        Ok(Some((
            PlannedMember {
                name: name.to_string(),
                node,
            },
            hand_written,
        )))
    }

    fn classify_properties<'t>(&self, node: &'t ApiNode, plan: &mut ClassPlan<'t>) -> GenResult<()> {
        let prefix = plan.info.c_function_prefix.clone();
        for property in node.select("properties/property")? {
            let name = property.required_attr("name")?;
            if name == "user_data" {
                plan.info.has_user_data = true;
            }
            if INTERNAL_PROPERTIES.contains(&name) {
                continue;
            }

            let getter = self.classify_accessor(property.child("getter"), &prefix)?;
            let setter = self.classify_accessor(property.child("setter"), &prefix)?;
            let (getter, setter) = match (getter, setter) {
                (Accessor::Skipped, _) | (_, Accessor::Skipped) => {
                    tracing::debug!(class = %plan.info.name, property = name, "skipping property");
                    continue;
                }
                (Accessor::Absent, Accessor::Absent) => {
                    tracing::warn!(
                        class = %plan.info.name,
                        property = name,
                        "property has neither getter nor setter"
                    );
                    continue;
                }
                (getter, setter) => (getter.into_member(), setter.into_member()),
            };

            plan.properties.push(PlannedProperty {
                name: name.to_string(),
                getter,
                setter,
            });
        }
        Ok(())
    }

    fn classify_accessor<'t>(&self, node: Option<&'t ApiNode>, prefix: &str) -> GenResult<Accessor<'t>> {
        let Some(node) = node else {
            return Ok(Accessor::Absent);
        };
        let native_name = node.required_attr("name")?;
        if node.is_deprecated() || self.config.is_function_excluded(native_name) {
            return Ok(Accessor::Skipped);
        }
        Ok(Accessor::Present(PlannedMember {
            name: member_name(native_name, prefix).to_string(),
            node,
        }))
    }
}

/// Outcome of classifying one property accessor
enum Accessor<'t> {
    Absent,
    /// Deprecated or blacklisted; drops the whole property
    Skipped,
    Present(PlannedMember<'t>),
}

/// How a planned member is rendered
#[derive(Debug, Clone, Copy)]
enum Role<'a> {
    Method,
    Getter,
    /// Setter of the named attribute
    Setter(&'a str),
}

impl<'t> Accessor<'t> {
    fn into_member(self) -> Option<PlannedMember<'t>> {
        match self {
            Accessor::Present(member) => Some(member),
            Accessor::Absent | Accessor::Skipped => None,
        }
    }
}

impl<'t> ClassPlan<'t> {
    pub fn info(&self) -> &ClassInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Number of events harvested from the class (central class only)
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Render the callback definition and registration line of every event.
    pub fn render_events(&self, registry: &Registry) -> GenResult<Vec<EventDescriptor>> {
        let naming = registry.naming();
        self.events
            .iter()
            .map(|event| {
                let signature = MethodSignature::parse(event.node, registry)
                    .map_err(|e| e.in_member(&self.info.name, &event.name))?;
                let callback = Shape::EventCallback {
                    central: &self.info,
                    event: &event.name,
                    signature: &signature,
                }
                .render(registry)
                .map_err(|e| e.in_member(&self.info.name, &event.name))?;

                Ok(EventDescriptor {
                    native_name: event.native_name.clone(),
                    name: event.name.clone(),
                    doc: event.doc.clone(),
                    params: signature.params,
                    callback,
                    registration: registration_line(naming, &self.info.name, &event.name),
                })
            })
            .collect()
    }

    /// Render every lifecycle, method and property body of the class.
    ///
    /// The returned descriptor carries no events; see [`ClassPlan::render_events`].
    pub fn render(&self, registry: &Registry) -> GenResult<ClassDescriptor> {
        let info = &self.info;
        let lifecycle = |member: &str, shape: Shape<'_>| -> GenResult<MemberDescriptor> {
            let body = shape
                .render(registry)
                .map_err(|e| e.in_member(&info.name, member))?;
            Ok(MemberDescriptor::lifecycle(member, shape.call_shape(), body))
        };

        let new_method = lifecycle("new", Shape::Constructor { class: info })?;
        let new_from_native_ptr = lifecycle("new_from_native_ptr", Shape::PointerAdopt { class: info })?;

        let type_methods = self.render_methods(&self.type_methods, registry)?;
        let instance_methods = self.render_methods(&self.instance_methods, registry)?;
        let properties = self
            .properties
            .iter()
            .map(|property| {
                self.render_property(property, registry)
                    .map_err(|e| e.in_member(&info.name, &property.name))
            })
            .collect::<GenResult<Vec<_>>>()?;

        let dealloc = lifecycle("dealloc", Shape::Destructor { class: info })?;

        Ok(ClassDescriptor {
            info: info.clone(),
            doc: self.doc.clone(),
            object_members: self.object_members.clone(),
            type_methods,
            instance_methods,
            hand_written_type_methods: self.hand_written_type_methods.clone(),
            hand_written_instance_methods: self.hand_written_instance_methods.clone(),
            properties,
            events: Vec::new(),
            new_method,
            new_from_native_ptr,
            dealloc,
        })
    }

    fn render_methods(&self, methods: &[PlannedMember<'t>], registry: &Registry) -> GenResult<Vec<MemberDescriptor>> {
        methods
            .iter()
            .map(|method| {
                self.render_member(method, registry, Role::Method)
                    .map_err(|e| e.in_member(&self.info.name, &method.name))
            })
            .collect()
    }

    fn render_member(
        &self,
        member: &PlannedMember<'t>,
        registry: &Registry,
        role: Role<'_>,
    ) -> GenResult<MemberDescriptor> {
        let signature = MethodSignature::parse(member.node, registry)?;
        let class = &self.info;
        let shape = match role {
            Role::Method => Shape::Plain {
                class,
                signature: &signature,
            },
            Role::Getter => Shape::PropertyGet {
                class,
                signature: &signature,
            },
            Role::Setter(attribute) => Shape::PropertySet {
                class,
                signature: &signature,
                attribute,
            },
        };
        let body = shape.render(registry)?;
        let call_shape = shape.call_shape();
        Ok(MemberDescriptor::from_signature(&member.name, call_shape, signature, body))
    }

    fn render_property(&self, property: &PlannedProperty<'t>, registry: &Registry) -> GenResult<PropertyDescriptor> {
        if property.getter.is_none() && property.setter.is_none() {
            return Err(GenError::EmptyProperty(property.name.clone()));
        }
        let naming = registry.naming();
        let class = &self.info;

        let getter = property
            .getter
            .as_ref()
            .map(|getter| self.render_member(getter, registry, Role::Getter))
            .transpose()?;
        let setter = property
            .setter
            .as_ref()
            .map(|setter| self.render_member(setter, registry, Role::Setter(&property.name)))
            .transpose()?;

        let function = |member: &PlannedMember<'_>| naming.member_function(&class.name, &member.name);
        Ok(PropertyDescriptor {
            name: property.name.clone(),
            getter_reference: property
                .getter
                .as_ref()
                .map_or_else(|| "NULL".to_string(), |g| format!("(getter){}", function(g))),
            setter_reference: property
                .setter
                .as_ref()
                .map_or_else(|| "NULL".to_string(), |s| format!("(setter){}", function(s))),
            getter_definition_begin: property.getter.as_ref().map(|g| {
                format!("static PyObject * {}(PyObject *self, void *closure) {{", function(g))
            }),
            setter_definition_begin: property.setter.as_ref().map(|s| {
                format!(
                    "static int {}(PyObject *self, PyObject *value, void *closure) {{",
                    function(s)
                )
            }),
            getter,
            setter,
        })
    }
}
