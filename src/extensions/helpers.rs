use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::{CreateContext, Extension, ExtensionOptions, InitContext};
use crate::constants::{extension, store::HELPERS};
use crate::debug;
use crate::document::DocumentState;
use crate::error::{Error, Result};

/// Read-only function evaluated against the document state
pub type Helper = Arc<dyn Fn(&DocumentState) -> Result<Value> + Send + Sync>;

/// Helpers contributed by the extensions, keyed by their unique name
#[derive(Default, Clone)]
pub struct HelperRegistry {
    helpers: HashMap<String, Helper>,
    order: Vec<String>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a helper
    ///
    /// # Errors
    /// * `DuplicateName` - if another helper was registered with the same name
    pub fn register<S: Into<String>>(&mut self, name: S, helper: Helper) -> Result<()> {
        let name = name.into();
        if self.helpers.contains_key(&name) {
            return Err(Error::DuplicateName {
                kind: "helper",
                name,
            });
        }
        self.order.push(name.clone());
        self.helpers.insert(name, helper);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    /// Evaluates the given helper
    ///
    /// # Errors
    /// * `UnknownHelper` - if no helper is registered under the name
    pub fn call(&self, name: &str, state: &DocumentState) -> Result<Value> {
        let helper = self
            .get(name)
            .ok_or_else(|| Error::UnknownHelper(name.to_string()))?;
        helper(state)
    }

    /// Helper names, in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Aggregates the helpers of every extension and publishes them under `helpers`.
///
/// Provides the generic helpers reading the document state.
#[derive(Default)]
pub struct HelpersExtension {
    options: ExtensionOptions,
}

impl HelpersExtension {
    pub fn new(options: ExtensionOptions) -> Self {
        Self { options }
    }
}

/// Pairs a helper function with its name
pub(crate) fn helper<F>(name: &str, f: F) -> (String, Helper)
where
    F: Fn(&DocumentState) -> Result<Value> + Send + Sync + 'static,
{
    (name.to_string(), Arc::new(f))
}

impl Extension for HelpersExtension {
    fn name(&self) -> &str {
        extension::HELPERS
    }

    fn options(&self) -> &ExtensionOptions {
        &self.options
    }

    fn helpers(&self, _ctx: &InitContext<'_>) -> Option<Vec<(String, Helper)>> {
        Some(vec![
            helper("is_selection_empty", |state| {
                Ok(Value::Bool(state.selection.is_empty()))
            }),
            helper("get_text", |state| Ok(Value::String(state.text.clone()))),
            helper("get_selected_text", |state| {
                Ok(Value::String(state.selected_text()))
            }),
            helper("get_state_json", |state| Ok(serde_json::to_value(state)?)),
        ])
    }

    fn on_create(&self, ctx: &mut CreateContext<'_>) -> Result<()> {
        let mut registry = HelperRegistry::new();
        {
            let init = ctx.init_context();
            for extension in ctx.extensions() {
                if extension.options().is_excluded(HELPERS) {
                    debug!("[{}] skipping excluded extension \"{}\"", HELPERS, extension.name());
                    continue;
                }
                for (name, helper) in extension.helpers(&init).unwrap_or_default() {
                    debug!("[{}] \"{}\" provides \"{}\"", HELPERS, extension.name(), name);
                    registry.register(name, helper)?;
                }
            }
        }
        ctx.publish(HELPERS, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::document::Selection;
    use crate::store::Store;

    fn constant(value: &'static str) -> Helper {
        helper("constant", move |_| Ok(Value::String(value.to_string()))).1
    }

    #[test]
    fn test_registry_call() {
        let mut registry = HelperRegistry::new();
        registry.register("hello", constant("world")).unwrap();
        let state = DocumentState::new("text");
        assert_eq!(registry.call("hello", &state).unwrap(), Value::from("world"));
        assert!(matches!(
            registry.call("bye", &state),
            Err(Error::UnknownHelper(name)) if name == "bye"
        ));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = HelperRegistry::new();
        registry.register("a", constant("1")).unwrap();
        registry.register("b", constant("2")).unwrap();
        let result = registry.register("a", constant("3"));
        assert!(matches!(
            result,
            Err(Error::DuplicateName { kind: "helper", name }) if name == "a"
        ));
        assert_eq!(registry.names(), ["a", "b"]);
        assert_eq!(
            registry.call("a", &DocumentState::default()).unwrap(),
            Value::from("1")
        );
    }

    #[test]
    fn test_builtin_helpers() {
        let extensions: Vec<Box<dyn Extension>> = vec![Box::new(HelpersExtension::default())];
        let settings = Context::new();
        let mut store = Store::new();
        let mut ctx = CreateContext::new(&extensions, &settings, &mut store);
        extensions[0].on_create(&mut ctx).unwrap();

        let helpers = store.get::<HelperRegistry>(HELPERS).unwrap();
        let state = DocumentState::new("hello world").with_selection(Selection::new(0, 5));
        assert_eq!(
            helpers.call("is_selection_empty", &state).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            helpers.call("get_text", &state).unwrap(),
            Value::from("hello world")
        );
        assert_eq!(
            helpers.call("get_selected_text", &state).unwrap(),
            Value::from("hello")
        );
        let json = helpers.call("get_state_json", &state).unwrap();
        assert_eq!(json["selection"]["to"], Value::from(5));
    }
}
