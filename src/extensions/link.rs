use std::sync::Arc;

use super::helpers::helper;
use super::{Extension, ExtensionOptions, Helper, InitContext};
use crate::constants::{extension, link::DEFAULT_PROTOCOL};
use crate::element::Element;
use crate::link::{active_link, find_autolinks, selection_links};
use crate::transforms::{LinkNormalizer, Transformer};

/// Links support.
///
/// Normalizes the rendered anchors using the `defaults.default_protocol` and
/// `defaults.link_target` settings, and provides the link helpers.
#[derive(Default)]
pub struct LinkExtension {
    options: ExtensionOptions,
}

impl LinkExtension {
    pub fn new(options: ExtensionOptions) -> Self {
        Self { options }
    }
}

impl Extension for LinkExtension {
    fn name(&self) -> &str {
        extension::LINK
    }

    fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    fn ssr_transformer(&self, ctx: &InitContext<'_>) -> Option<Transformer<Element>> {
        let settings = ctx.settings();
        let protocol = settings.get_or("defaults.default_protocol", DEFAULT_PROTOCOL);
        let target = settings.get("defaults.link_target").map(str::to_string);
        Some(Arc::new(LinkNormalizer::new(protocol, target)))
    }

    fn helpers(&self, _ctx: &InitContext<'_>) -> Option<Vec<(String, Helper)>> {
        Some(vec![
            helper("active_link", |state| {
                Ok(serde_json::to_value(active_link(state))?)
            }),
            helper("selection_links", |state| {
                Ok(serde_json::to_value(selection_links(state))?)
            }),
            helper("autolinks", |state| {
                Ok(serde_json::to_value(find_autolinks(&state.text))?)
            }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::document::{DocumentState, MarkRange, Selection};
    use crate::store::Store;
    use serde_json::Value;

    #[test]
    fn test_link_helpers() {
        let settings = Context::new();
        let store = Store::new();
        let ctx = InitContext::new(&settings, &store);
        let helpers = LinkExtension::default().helpers(&ctx).unwrap();

        let state = DocumentState::new("go to example.com")
            .with_mark(MarkRange::new("link", 6, 17).with_attr("href", "http://example.com"))
            .with_selection(Selection::cursor(9));

        let (_, active) = helpers.iter().find(|(n, _)| n == "active_link").unwrap();
        let value = active(&state).unwrap();
        assert_eq!(value["href"], Value::from("http://example.com"));
        assert_eq!(value["text"], Value::from("example.com"));

        let (_, autolinks) = helpers.iter().find(|(n, _)| n == "autolinks").unwrap();
        let value = autolinks(&state).unwrap();
        assert_eq!(value[0]["href"], Value::from("http://example.com"));
    }

    #[test]
    fn test_active_link_is_null_outside_links() {
        let settings = Context::new();
        let store = Store::new();
        let ctx = InitContext::new(&settings, &store);
        let helpers = LinkExtension::default().helpers(&ctx).unwrap();
        let (_, active) = helpers.iter().find(|(n, _)| n == "active_link").unwrap();
        assert_eq!(active(&DocumentState::new("plain")).unwrap(), Value::Null);
    }

    #[test]
    fn test_transformer_reads_settings() {
        let settings = Context::from([
            ("defaults.default_protocol", "https:"),
            ("defaults.link_target", "_blank"),
        ]);
        let store = Store::new();
        let ctx = InitContext::new(&settings, &store);
        let transformer = LinkExtension::default().ssr_transformer(&ctx).unwrap();
        let anchor = Element::new("a").with_attr("href", "example.com");
        let result = transformer.transform(anchor).unwrap();
        assert_eq!(result.attr("href"), Some("https://example.com"));
        assert_eq!(result.attr("target"), Some("_blank"));
    }
}
