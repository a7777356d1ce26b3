//! Module Model Builder: the top-level generation driver.
//!
//! A run goes through four passes over the API tree:
//!
//! 1. enums, collecting the enum names the type rules depend on
//! 2. class classification, collecting the capability records
//! 3. event callbacks of the central class
//! 4. every class body, now able to resolve opaque return types
//!
//! The [`Registry`] is frozen between passes 2 and 3.

use crate::class_builder::{ClassBuilder, ClassPlan};
use crate::config::GeneratorConfig;
use crate::docs::{DocFormatter, PlainDocFormatter};
use crate::error::GenResult;
use crate::model::{EnumDescriptor, EnumValue, ModuleDescriptor};
use crate::registry::Registry;
use crate::tree::ApiNode;

/// Builds a [`ModuleDescriptor`] from an API description tree.
pub struct ModuleBuilder<'c> {
    config: &'c GeneratorConfig,
    docs: &'c dyn DocFormatter,
}

impl<'c> ModuleBuilder<'c> {
    /// Create a builder using [`PlainDocFormatter`] for documentation
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            docs: &PlainDocFormatter,
        }
    }

    /// Replace the documentation formatter
    pub fn with_doc_formatter(mut self, docs: &'c dyn DocFormatter) -> Self {
        self.docs = docs;
        self
    }

    /// Run generation over the root `api` node.
    pub fn build(&self, tree: &ApiNode) -> GenResult<ModuleDescriptor> {
        let enums = self.build_enums(tree)?;

        let class_builder = ClassBuilder::new(self.config, self.docs);
        let mut plans: Vec<ClassPlan<'_>> = Vec::new();
        for node in tree.select("classes/class")? {
            if let Some(plan) = class_builder.classify(node)? {
                plans.push(plan);
            }
        }

        let registry = self.registry(&enums, &plans);

        let central = registry.central_class_name();
        let events = match plans.iter().find(|plan| plan.name() == central) {
            Some(plan) => plan.render_events(&registry)?,
            None => {
                tracing::warn!(class = central, "central class not found; no events generated");
                Vec::new()
            }
        };

        let mut classes = plans
            .iter()
            .map(|plan| plan.render(&registry))
            .collect::<GenResult<Vec<_>>>()?;
        if let Some(class) = classes.iter_mut().find(|class| class.name() == central) {
            class.events = events;
        }

        let module = ModuleDescriptor {
            module_name: self.config.naming.module_name.clone(),
            enums,
            classes,
        };
        tracing::info!(
            module = %module.module_name,
            enums = module.enums.len(),
            classes = module.classes.len(),
            events = module.events().count(),
            "module model generated"
        );
        Ok(module)
    }

    fn registry(&self, enums: &[EnumDescriptor], plans: &[ClassPlan<'_>]) -> Registry {
        let mut builder = Registry::builder(self.config.naming.clone())
            .central_class(self.config.central_class.clone());
        for e in enums {
            builder = builder.enum_name(e.name.clone());
        }
        for plan in plans {
            builder = builder.class(plan.info().clone());
        }
        builder.build()
    }

    fn build_enums(&self, tree: &ApiNode) -> GenResult<Vec<EnumDescriptor>> {
        let naming = &self.config.naming;
        let mut enums = Vec::new();
        for node in tree.select("enums/enum")? {
            let c_name = node.required_attr("name")?;
            if node.is_deprecated() {
                tracing::debug!(enumeration = c_name, "skipping deprecated enum");
                continue;
            }

            let mut doc = self.docs.content_of(node);
            doc.push_str("\n\nValues:\n");
            let mut values = Vec::new();
            for value in node.select("values/value")? {
                let value_c_name = value.required_attr("name")?;
                if value.is_deprecated() {
                    continue;
                }
                let value_name = naming.strip(value_c_name);
                doc.push_str(&format!("\t{}: {}\n", value_name, self.docs.content_of(value)));
                values.push(EnumValue {
                    name: value_name.to_string(),
                    c_name: value_c_name.to_string(),
                    doc: self.docs.format(value),
                });
            }

            enums.push(EnumDescriptor {
                name: naming.strip(c_name).to_string(),
                c_name: c_name.to_string(),
                doc: self.docs.escape(&doc),
                values,
            });
        }
        Ok(enums)
    }
}

/// Generate the module model for `tree` with the default documentation formatter.
///
/// # Examples
///
/// ```
/// use apiwrap_core::{ApiNode, GeneratorConfig, generate};
///
/// let tree = ApiNode::new("api").with_child(
///     ApiNode::new("classes").with_child(
///         ApiNode::new("class")
///             .with_attr("name", "LinphoneFoo")
///             .with_attr("cfunctionprefix", "linphone_foo_"),
///     ),
/// );
///
/// let module = generate(&tree, &GeneratorConfig::default()).unwrap();
/// assert_eq!(module.classes[0].name(), "Foo");
/// ```
pub fn generate(tree: &ApiNode, config: &GeneratorConfig) -> GenResult<ModuleDescriptor> {
    ModuleBuilder::new(config).build(tree)
}
