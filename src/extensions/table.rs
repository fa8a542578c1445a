use std::sync::Arc;

use super::{Extension, ExtensionOptions, InitContext};
use crate::constants::{extension, table::DEFAULT_WRAPPER_CLASS};
use crate::element::Element;
use crate::transforms::{TableWrapper, Transformer};

/// Tables support. Wraps the rendered tables in a scrollable container whose class
/// is read from the `defaults.table_wrapper_class` setting.
#[derive(Default)]
pub struct TableExtension {
    options: ExtensionOptions,
}

impl TableExtension {
    pub fn new(options: ExtensionOptions) -> Self {
        Self { options }
    }
}

impl Extension for TableExtension {
    fn name(&self) -> &str {
        extension::TABLE
    }

    fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    fn ssr_transformer(&self, ctx: &InitContext<'_>) -> Option<Transformer<Element>> {
        let class = ctx
            .settings()
            .get_or("defaults.table_wrapper_class", DEFAULT_WRAPPER_CLASS);
        Some(Arc::new(TableWrapper::new(class)))
    }
}
