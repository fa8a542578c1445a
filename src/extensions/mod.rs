//! Editor extensions and the contract they follow to contribute to the pipelines
//! built during the initialization pass.
//!
//! Currently provides the following extensions:
//! - `helpers` : aggregates the helpers of every extension
//! - `ssr` : composes the SSR transformers of every extension
//! - `table` : wraps rendered tables
//! - `link` : normalizes rendered anchors and provides link helpers
use std::collections::HashSet;

use crate::constants::extension;
use crate::context::Context;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::transforms::Transformer;

mod helpers;
mod link;
mod ssr;
mod table;

pub use helpers::{Helper, HelperRegistry, HelpersExtension};
pub use link::LinkExtension;
pub use ssr::SsrExtension;
pub use table::TableExtension;

/// Options shared by every extension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionOptions {
    exclude: HashSet<String>,
}

impl ExtensionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opts the extension out of the pipeline published under the given key
    pub fn excluding<S: Into<String>>(mut self, key: S) -> Self {
        self.exclude.insert(key.into());
        self
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.exclude.contains(key)
    }

    /// Excluded pipeline keys, sorted
    pub fn excluded(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.exclude.iter().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}

impl<S: Into<String>> FromIterator<S> for ExtensionOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            exclude: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read access to the shared initialization state, given to the factories of the
/// optional capabilities.
pub struct InitContext<'a> {
    settings: &'a Context,
    store: &'a Store,
}

impl<'a> InitContext<'a> {
    pub fn new(settings: &'a Context, store: &'a Store) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &'a Context {
        self.settings
    }

    /// Values published so far by the extensions registered earlier
    pub fn store(&self) -> &'a Store {
        self.store
    }
}

/// Context given to the extensions when the initialization pass reaches them
pub struct CreateContext<'a> {
    extensions: &'a [Box<dyn Extension>],
    settings: &'a Context,
    store: &'a mut Store,
}

impl<'a> CreateContext<'a> {
    pub fn new(
        extensions: &'a [Box<dyn Extension>],
        settings: &'a Context,
        store: &'a mut Store,
    ) -> Self {
        Self {
            extensions,
            settings,
            store,
        }
    }

    /// Every registered extension, in registration order
    pub fn extensions(&self) -> &'a [Box<dyn Extension>] {
        self.extensions
    }

    pub fn init_context(&self) -> InitContext<'_> {
        InitContext::new(self.settings, self.store)
    }

    pub fn publish<S, V>(&mut self, key: S, value: V) -> Result<()>
    where
        S: Into<String>,
        V: std::any::Any + Send + Sync,
    {
        self.store.publish(key, value)
    }
}

/// An editor extension.
///
/// Extensions contribute to the pipelines through typed optional capabilities: a
/// capability the extension does not provide returns `None` and leaves no trace in
/// the resulting pipeline.
pub trait Extension: Send + Sync {
    /// Unique name of the extension
    fn name(&self) -> &str;

    fn options(&self) -> &ExtensionOptions;

    /// Transformer applied to the rendered tree on server side rendering
    fn ssr_transformer(&self, _ctx: &InitContext<'_>) -> Option<Transformer<Element>> {
        None
    }

    /// Named helpers reading the document state
    fn helpers(&self, _ctx: &InitContext<'_>) -> Option<Vec<(String, Helper)>> {
        None
    }

    /// Called once per initialization pass, in registration order
    fn on_create(&self, _ctx: &mut CreateContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Builds the built-in extension registered under the given name
pub fn build(name: &str, options: ExtensionOptions) -> Result<Box<dyn Extension>> {
    match name {
        extension::HELPERS => Ok(Box::new(HelpersExtension::new(options))),
        extension::SSR => Ok(Box::new(SsrExtension::new(options))),
        extension::TABLE => Ok(Box::new(TableExtension::new(options))),
        extension::LINK => Ok(Box::new(LinkExtension::new(options))),
        _ => Err(Error::UnknownExtension(name.to_string())),
    }
}

/// Builds the built-in extensions in their default order
pub fn defaults() -> Vec<Box<dyn Extension>> {
    vec![
        Box::new(HelpersExtension::default()),
        Box::new(SsrExtension::default()),
        Box::new(TableExtension::default()),
        Box::new(LinkExtension::default()),
    ]
}
