use std::sync::Arc;

use super::{CreateContext, Extension, ExtensionOptions, InitContext};
use crate::constants::{extension, store::SSR_TRANSFORMER};
use crate::debug;
use crate::element::Element;
use crate::error::Result;
use crate::transforms::{EmptyParagraphs, TransformRegistry, Transformer};

/// Server side rendering support.
///
/// When the initialization pass reaches it, collects the SSR transformers of every
/// extension (itself included) in registration order, composes them and publishes
/// the result under `ssr_transformer`.
#[derive(Default)]
pub struct SsrExtension {
    options: ExtensionOptions,
}

impl SsrExtension {
    pub fn new(options: ExtensionOptions) -> Self {
        Self { options }
    }
}

impl Extension for SsrExtension {
    fn name(&self) -> &str {
        extension::SSR
    }

    fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    fn ssr_transformer(&self, _ctx: &InitContext<'_>) -> Option<Transformer<Element>> {
        Some(Arc::new(EmptyParagraphs::new()))
    }

    fn on_create(&self, ctx: &mut CreateContext<'_>) -> Result<()> {
        let mut registry = TransformRegistry::new(SSR_TRANSFORMER);
        {
            let init = ctx.init_context();
            for extension in ctx.extensions() {
                if extension.options().is_excluded(SSR_TRANSFORMER) {
                    debug!(
                        "[{}] skipping excluded extension \"{}\"",
                        SSR_TRANSFORMER,
                        extension.name()
                    );
                    continue;
                }
                if let Some(transformer) = extension.ssr_transformer(&init) {
                    registry.register(extension.name(), transformer)?;
                }
            }
        }
        ctx.publish(SSR_TRANSFORMER, registry.finalize())
    }
}
