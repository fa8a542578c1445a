use crate::element::Element;
use crate::error::Result;
use crate::transforms::ComposedTransformer;

/// Renders element trees to HTML on server side.
///
/// The composed transformer is injected at construction time and applied once per
/// render, before serialization.
pub struct SsrRenderer {
    transformer: ComposedTransformer<Element>,
}

impl SsrRenderer {
    pub fn new(transformer: ComposedTransformer<Element>) -> Self {
        Self { transformer }
    }

    /// Renderer serializing the trees as they are
    pub fn raw() -> Self {
        Self::new(ComposedTransformer::identity())
    }

    /// Applies the pipeline to the given tree
    pub fn transform(&self, element: Element) -> Result<Element> {
        self.transformer.apply(element)
    }

    /// Applies the pipeline to the given tree and serializes the result
    pub fn render(&self, element: Element) -> Result<String> {
        self.transform(element)?.to_html()
    }
}
