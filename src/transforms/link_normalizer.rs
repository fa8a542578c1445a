use crate::constants::link::{DEFAULT_PROTOCOL, TARGET_REL};
use crate::element::Element;
use crate::error::Result;
use crate::link::extract_href_with;
use crate::transforms::Transform;

/// Normalizes the anchors of the rendered tree.
///
/// The `href` of every `<a>` is completed with the configured protocol when it has
/// none, and when a target is configured it is set along with a safe `rel`.
pub struct LinkNormalizer {
    protocol: String,
    target: Option<String>,
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PROTOCOL, None)
    }
}

impl LinkNormalizer {
    pub fn new<S: Into<String>>(protocol: S, target: Option<String>) -> Self {
        Self {
            protocol: protocol.into(),
            target: target.filter(|t| !t.is_empty()),
        }
    }

    fn normalize(&self, mut element: Element) -> Element {
        if element.tag != "a" {
            return element;
        }
        if let Some(href) = element.attrs.get_mut("href") {
            *href = extract_href_with(href, &self.protocol);
        }
        if let Some(target) = &self.target {
            element
                .attrs
                .entry("target".to_string())
                .or_insert_with(|| target.clone());
            element
                .attrs
                .entry("rel".to_string())
                .or_insert_with(|| TARGET_REL.to_string());
        }
        element
    }
}

impl Transform<Element> for LinkNormalizer {
    fn transform(&self, input: Element) -> Result<Element> {
        Ok(input.map_elements(&mut |element| self.normalize(element)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str) -> Element {
        Element::new("a").with_attr("href", href).with_child("link")
    }

    #[test]
    fn test_href_is_completed() {
        let doc = Element::new("p")
            .with_child(anchor("example.com"))
            .with_child(anchor("https://docs.rs"));
        let result = LinkNormalizer::default().transform(doc).unwrap();
        assert_eq!(
            result.to_html().unwrap(),
            "<p><a href=\"http://example.com\">link</a><a href=\"https://docs.rs\">link</a></p>"
        );
    }

    #[test]
    fn test_target_and_rel() {
        let normalizer = LinkNormalizer::new("https:", Some("_blank".to_string()));
        let result = normalizer.transform(anchor("example.com")).unwrap();
        assert_eq!(result.attr("href"), Some("https://example.com"));
        assert_eq!(result.attr("target"), Some("_blank"));
        assert_eq!(result.attr("rel"), Some(TARGET_REL));
    }

    #[test]
    fn test_existing_target_is_kept() {
        let normalizer = LinkNormalizer::new("http:", Some("_blank".to_string()));
        let result = normalizer
            .transform(anchor("example.com").with_attr("target", "_self"))
            .unwrap();
        assert_eq!(result.attr("target"), Some("_self"));
    }

    #[test]
    fn test_empty_target_is_ignored() {
        let normalizer = LinkNormalizer::new("http:", Some(String::new()));
        let result = normalizer.transform(anchor("example.com")).unwrap();
        assert_eq!(result.attr("target"), None);
        assert_eq!(result.attr("rel"), None);
    }
}
