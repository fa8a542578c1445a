//! Rendered output tree.
//!
//! An [`Element`] is the value flowing through the SSR transformer pipeline. Its JSON
//! form is an object for elements (`{"tag": "p", "attrs": {...}, "children": [...]}`)
//! and a bare string for text nodes.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::Result;

/// Elements rendered without closing tag nor children
const VOID_ELEMENTS: [&str; 8] = ["area", "br", "col", "hr", "img", "input", "source", "wbr"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// A node is blank when it renders no visible content
    pub fn is_blank(&self) -> bool {
        match self {
            Node::Text(text) => text.is_empty(),
            Node::Element(_) => false,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl Element {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_child<N: Into<Node>>(mut self, child: N) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(|v| v.as_str())
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// Checks whether the element has no children or only empty text nodes
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(Node::is_blank)
    }

    /// Checks whether the `class` attribute contains the given class name
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Rebuilds the tree bottom-up, applying `f` to every element after its
    /// children have been mapped. The root is mapped last.
    pub fn map_elements<F>(self, f: &mut F) -> Element
    where
        F: FnMut(Element) -> Element,
    {
        let Element {
            tag,
            attrs,
            children,
        } = self;
        let children = children
            .into_iter()
            .map(|child| match child {
                Node::Element(element) => Node::Element(element.map_elements(f)),
                text => text,
            })
            .collect();
        f(Element {
            tag,
            attrs,
            children,
        })
    }

    /// Counts the elements of the tree (root included) matching the given tag
    pub fn count_tag(&self, tag: &str) -> usize {
        let own = usize::from(self.tag == tag);
        own + self
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|child| child.count_tag(tag))
            .sum::<usize>()
    }

    /// Serializes the tree as HTML
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        write!(out, "<{}", self.tag)?;
        for (key, value) in &self.attrs {
            write!(out, " {}=\"{}\"", key, escape(value, true))?;
        }
        out.push('>');

        if self.is_void() {
            return Ok(());
        }

        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text, false)),
                Node::Element(element) => element.write_html(out)?,
            }
        }
        write!(out, "</{}>", self.tag)?;
        Ok(())
    }
}

/// Escapes the HTML special characters of the given text
fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
