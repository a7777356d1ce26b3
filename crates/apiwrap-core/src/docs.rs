//! Documentation strings for generated types.
//!
//! Documentation is produced by a [`DocFormatter`]; the generator treats its
//! output as opaque text to embed in C string literals.

use crate::tree::ApiNode;

/// Produces docstrings from description nodes
pub trait DocFormatter {
    /// Plain text for a node's `briefdescription` and `detaileddescription`
    fn format_content(&self, brief: Option<&ApiNode>, detailed: Option<&ApiNode>) -> String;

    /// Make text safe to embed in a C string literal
    fn escape(&self, doc: &str) -> String;

    /// Escaped documentation of a documented node
    fn format(&self, node: &ApiNode) -> String {
        self.escape(&self.content_of(node))
    }

    /// Unescaped documentation of a documented node
    fn content_of(&self, node: &ApiNode) -> String {
        self.format_content(node.child("briefdescription"), node.child("detaileddescription"))
    }
}

/// Joins the brief text and the detailed paragraphs, separated by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDocFormatter;

impl PlainDocFormatter {
    fn paragraph(node: &ApiNode) -> String {
        match node.tag.as_str() {
            // Cross references are inlined with surrounding spaces
            "ref" => format!(" {} ", node.text.as_deref().unwrap_or("").trim()),
            _ => {
                let mut text = node.text.as_deref().unwrap_or("").trim().to_string();
                for child in &node.children {
                    text.push_str(&Self::paragraph(child));
                }
                text
            }
        }
    }
}

impl DocFormatter for PlainDocFormatter {
    fn format_content(&self, brief: Option<&ApiNode>, detailed: Option<&ApiNode>) -> String {
        let brief = brief.map(|b| b.text_content()).unwrap_or_default();
        let brief = brief.trim();

        let detailed = detailed
            .map(|d| {
                let paragraphs: Vec<String> = d
                    .children
                    .iter()
                    .map(|p| Self::paragraph(p).trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                if paragraphs.is_empty() {
                    d.text.as_deref().unwrap_or("").trim().to_string()
                } else {
                    paragraphs.join("\n")
                }
            })
            .unwrap_or_default();

        let mut doc = brief.to_string();
        if !detailed.is_empty() {
            if !doc.is_empty() {
                doc.push_str("\n\n");
            }
            doc.push_str(&detailed);
        }
        doc
    }

    fn escape(&self, doc: &str) -> String {
        let mut out = String::with_capacity(doc.len());
        for c in doc.chars() {
            match c {
                '"' => {}
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                // Octal escapes stop after three digits, unlike \x
                c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                    out.push_str(&format!("\\{:03o}", c as u32));
                }
                c => out.push(c),
            }
        }
        out
    }
}
