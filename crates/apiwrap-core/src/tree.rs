//! Read-only API description tree.
//!
//! The upstream description (an XML document produced from the native
//! headers) is handed to the generator as a tree of [`ApiNode`]s. Each node
//! has a tag, string attributes, optional text and ordered children. Nodes
//! are queried with a small path selector language:
//!
//! | Selector | Meaning |
//! |----------|---------|
//! | `enums/enum` | all `enum` children of all `enums` children |
//! | `./return` | the `return` child (leading `./` is optional) |
//! | `classmethods/classmethod[@name='x']` | filter the last step by attribute |

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of the API description tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiNode {
    pub tag: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ApiNode>,
}

impl ApiNode {
    /// Create an empty node with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Parse a tree from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: append a child node
    pub fn with_child(mut self, child: ApiNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: append several child nodes
    pub fn with_children(mut self, children: impl IntoIterator<Item = ApiNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Get an attribute, failing with [`GenError::MissingAttribute`] when absent
    pub fn required_attr(&self, name: &str) -> GenResult<&str> {
        self.attr(name).ok_or_else(|| GenError::MissingAttribute {
            tag: self.tag.clone(),
            attribute: name.to_string(),
        })
    }

    /// True when the attribute is present and equal to `"true"`
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("true")
    }

    pub fn is_deprecated(&self) -> bool {
        self.flag("deprecated")
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&ApiNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Concatenated text of this node and all its descendants, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// First node matching `selector`, if any
    pub fn find(&self, selector: &str) -> GenResult<Option<&ApiNode>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    /// All nodes matching `selector`, in document order
    pub fn select(&self, selector: &str) -> GenResult<Vec<&ApiNode>> {
        let steps = parse_selector(selector)?;
        let mut current: Vec<&ApiNode> = vec![self];
        for step in &steps {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter())
                .filter(|child| step.matches(child))
                .collect();
        }
        Ok(current)
    }
}

fn collect_text(node: &ApiNode, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
    }
    for child in &node.children {
        collect_text(child, out);
    }
}

/// One `/`-separated selector step
#[derive(Debug, PartialEq, Eq)]
struct Step {
    tag: String,
    predicate: Option<(String, String)>,
}

impl Step {
    fn matches(&self, node: &ApiNode) -> bool {
        if node.tag != self.tag {
            return false;
        }
        match &self.predicate {
            Some((name, value)) => node.attr(name) == Some(value.as_str()),
            None => true,
        }
    }
}

fn parse_selector(selector: &str) -> GenResult<Vec<Step>> {
    let trimmed = selector.strip_prefix("./").unwrap_or(selector);
    if trimmed.is_empty() {
        return Err(GenError::InvalidSelector(selector.to_string()));
    }

    // Split on '/' outside of predicate brackets; attribute values may hold slashes.
    let mut raw_steps = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in trimmed.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| GenError::InvalidSelector(selector.to_string()))?;
            }
            '/' if depth == 0 => {
                raw_steps.push(&trimmed[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(GenError::InvalidSelector(selector.to_string()));
    }
    raw_steps.push(&trimmed[start..]);

    raw_steps
        .into_iter()
        .map(|raw| parse_step(raw).ok_or_else(|| GenError::InvalidSelector(selector.to_string())))
        .collect()
}

fn parse_step(raw: &str) -> Option<Step> {
    let (tag, predicate) = match raw.find('[') {
        Some(open) => {
            let inner = raw[open + 1..].strip_suffix(']')?;
            (&raw[..open], Some(parse_predicate(inner)?))
        }
        None => (raw, None),
    };
    if tag.is_empty() || tag.contains(['[', ']', '@']) {
        return None;
    }
    Some(Step {
        tag: tag.to_string(),
        predicate,
    })
}

fn parse_predicate(inner: &str) -> Option<(String, String)> {
    let (name, value) = inner.strip_prefix('@')?.split_once('=')?;
    let value = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}
