//! Owned element tree built from a parsed XML document.
//!
//! Only what the lookups need is kept: local names, attributes, and the concatenated text of
//! each element (all descendant text nodes in document order).

use crate::names;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Find the first element named `Project`, searching the document root and its descendants.
    pub(crate) fn find_project(doc: &roxmltree::Document<'_>) -> Option<Element> {
        doc.root()
            .descendants()
            .find(|n| n.is_element() && name_eq(n.tag_name().name(), names::PROJECT))
            .map(Element::from_node)
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Element {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                let element = Element::from_node(child);
                text.push_str(&element.text);
                children.push(element);
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        Element {
            name: node.tag_name().name().to_string(),
            attributes,
            text,
            children,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn is_named(&self, name: &str) -> bool {
        name_eq(&self.name, name)
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| name_eq(k, name))
            .map(|(_, v)| v.as_str())
    }

    /// All descendants (not including `self`) in document order.
    pub(crate) fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub(crate) fn descendants_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.is_named(name))
    }

    /// Descendants named `name`, each paired with its parent, in document order.
    pub(crate) fn descendants_named_with_parent<'a>(
        &'a self,
        name: &str,
    ) -> Vec<(&'a Element, &'a Element)> {
        let mut out = Vec::new();
        collect_with_parent(self, name, &mut out);
        out
    }
}

fn collect_with_parent<'a>(
    parent: &'a Element,
    name: &str,
    out: &mut Vec<(&'a Element, &'a Element)>,
) {
    for child in &parent.children {
        if child.is_named(name) {
            out.push((parent, child));
        }
        collect_with_parent(child, name, out);
    }
}

pub(crate) struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn name_eq(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}
