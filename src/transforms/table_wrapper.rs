use crate::constants::table::DEFAULT_WRAPPER_CLASS;
use crate::element::{Element, Node};
use crate::error::Result;
use crate::transforms::Transform;

/// Wraps every table in a `<div class="...">` container so that wide tables
/// scroll instead of overflowing. Tables already wrapped are left as they are.
pub struct TableWrapper {
    class: String,
}

impl Default for TableWrapper {
    fn default() -> Self {
        Self::new(DEFAULT_WRAPPER_CLASS)
    }
}

impl TableWrapper {
    pub fn new<S: Into<String>>(class: S) -> Self {
        Self {
            class: class.into(),
        }
    }

    fn is_wrapper(&self, element: &Element) -> bool {
        element.tag == "div" && element.has_class(&self.class)
    }

    fn wrap(&self, table: Element) -> Element {
        Element::new("div")
            .with_attr("class", self.class.as_str())
            .with_child(table)
    }

    fn wrap_children(&self, mut element: Element) -> Element {
        if self.is_wrapper(&element) {
            return element;
        }
        element.children = element
            .children
            .into_iter()
            .map(|child| match child {
                Node::Element(table) if table.tag == "table" => Node::Element(self.wrap(table)),
                other => other,
            })
            .collect();
        element
    }
}

impl Transform<Element> for TableWrapper {
    fn transform(&self, input: Element) -> Result<Element> {
        let root = input.map_elements(&mut |element| self.wrap_children(element));
        if root.tag == "table" {
            Ok(self.wrap(root))
        } else {
            Ok(root)
        }
    }
}
