use crate::element::{Element, Node};
use crate::error::Result;
use crate::transforms::Transform;

/// Injects a `<br>` into every empty paragraph.
///
/// Browsers collapse empty paragraphs, the line break gives them the height of
/// a line as the editor does once mounted.
pub struct EmptyParagraphs;

impl EmptyParagraphs {
    pub fn new() -> Self {
        Self
    }

    fn inject_br(mut element: Element) -> Element {
        if element.tag == "p" && element.is_empty() {
            element.children = vec![Node::Element(Element::new("br"))];
        }
        element
    }
}

impl Default for EmptyParagraphs {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform<Element> for EmptyParagraphs {
    fn transform(&self, input: Element) -> Result<Element> {
        Ok(input.map_elements(&mut Self::inject_br))
    }
}
