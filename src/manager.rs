use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::store::{HELPERS, SSR_TRANSFORMER};
use crate::context::Context;
use crate::debug;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::extensions::{CreateContext, Extension, HelperRegistry, InitContext};
use crate::store::Store;
use crate::transforms::ComposedTransformer;

/// Summary of what an extension contributes, used for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: String,
    pub ssr_transformer: bool,
    pub helpers: Vec<String>,
    pub excluded: Vec<String>,
}

/// Owns the registered extensions and runs the initialization pass over them.
///
/// The values published during the pass are only reachable once the pass has
/// completed, a new pass discards them and builds new ones.
pub struct ExtensionManager {
    extensions: Vec<Box<dyn Extension>>,
    settings: Context,
    store: Option<Store>,
}

impl ExtensionManager {
    /// Creates a manager for the given extensions, kept in the given order
    ///
    /// # Errors
    /// * `DuplicateName` - if two extensions share the same name
    pub fn new(extensions: Vec<Box<dyn Extension>>, settings: Context) -> Result<Self> {
        let mut names = HashSet::new();
        for extension in &extensions {
            if !names.insert(extension.name()) {
                return Err(Error::DuplicateName {
                    kind: "extension",
                    name: extension.name().to_string(),
                });
            }
        }
        Ok(Self {
            extensions,
            settings,
            store: None,
        })
    }

    /// Runs the initialization pass: every extension is created once, in
    /// registration order, against a fresh store.
    pub fn init(&mut self) -> Result<()> {
        self.store = None;
        let mut store = Store::new();
        for extension in &self.extensions {
            debug!("Creating extension \"{}\"", extension.name());
            let mut ctx = CreateContext::new(&self.extensions, &self.settings, &mut store);
            extension.on_create(&mut ctx)?;
        }
        debug!("Initialization completed, published : {:?}", store.keys());
        self.store = Some(store);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    /// Values published by the last completed initialization pass
    ///
    /// # Errors
    /// * `OutsideScope` - if no initialization pass has completed
    pub fn store(&self) -> Result<&Store> {
        self.store
            .as_ref()
            .ok_or_else(|| Error::OutsideScope("store".to_string()))
    }

    /// The composed SSR transformer
    pub fn ssr_transformer(&self) -> Result<ComposedTransformer<Element>> {
        let composed = self
            .store()?
            .get::<ComposedTransformer<Element>>(SSR_TRANSFORMER)?;
        Ok(ComposedTransformer::clone(&composed))
    }

    /// The helpers of every extension
    pub fn helpers(&self) -> Result<Arc<HelperRegistry>> {
        self.store()?.get::<HelperRegistry>(HELPERS)
    }

    pub fn extensions(&self) -> &[Box<dyn Extension>] {
        &self.extensions
    }

    pub fn settings(&self) -> &Context {
        &self.settings
    }

    /// Describes the capabilities of every extension, in registration order.
    ///
    /// The factories of a capability the extension is excluded from are not
    /// invoked, the capability is only reported through `excluded`.
    pub fn describe(&self) -> Vec<ExtensionInfo> {
        let empty = Store::new();
        let ctx = InitContext::new(&self.settings, self.store.as_ref().unwrap_or(&empty));
        self.extensions
            .iter()
            .map(|extension| ExtensionInfo {
                name: extension.name().to_string(),
                ssr_transformer: !extension.options().is_excluded(SSR_TRANSFORMER)
                    && extension.ssr_transformer(&ctx).is_some(),
                helpers: if extension.options().is_excluded(HELPERS) {
                    Vec::new()
                } else {
                    extension
                        .helpers(&ctx)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(name, _)| name)
                        .collect()
                },
                excluded: extension
                    .options()
                    .excluded()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect()
    }
}
