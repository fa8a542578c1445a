use super::{Transform, Transformer};
use crate::debug;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered collection of named transforms built during one initialization pass.
///
/// Transforms are appended in registration order and names must be unique (the name
/// is the one of the contributing extension). Once finalized the registry is frozen
/// and any further registration fails.
pub struct TransformRegistry<T> {
    name: String,
    names: HashSet<String>,
    order: Vec<(String, Transformer<T>)>,
    frozen: bool,
}

/// Single transform equivalent to folding the finalized registry over its input
pub struct ComposedTransformer<T> {
    entries: Arc<[(String, Transformer<T>)]>,
}

impl<T: 'static> TransformRegistry<T> {
    /// Creates an empty registry. The name identifies the pipeline in errors and logs.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            names: HashSet::new(),
            order: Vec::new(),
            frozen: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Appends a transform to the registry
    ///
    /// # Errors
    /// * `RegistryFrozen` - if the registry has already been finalized
    /// * `DuplicateName` - if a transform was already registered with the same name
    pub fn register<S: Into<String>>(&mut self, name: S, transform: Transformer<T>) -> Result<()> {
        if self.frozen {
            return Err(Error::RegistryFrozen(self.name.clone()));
        }
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(Error::DuplicateName {
                kind: "transformer",
                name,
            });
        }
        debug!("[{}] registered transformer \"{}\"", self.name, name);
        self.order.push((name, transform));
        Ok(())
    }

    /// Appends a transform given as a plain function or closure
    pub fn register_fn<S, F>(&mut self, name: S, transform: F) -> Result<()>
    where
        S: Into<String>,
        F: Fn(T) -> Result<T> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(transform))
    }

    /// Freezes the registry and returns the composed transformer.
    ///
    /// Can be called several times, every call returns a transformer with the same
    /// behaviour as long as the registry does not change (which it can't once frozen).
    pub fn finalize(&mut self) -> ComposedTransformer<T> {
        if !self.frozen {
            debug!(
                "[{}] finalized with {} transformer(s)",
                self.name,
                self.order.len()
            );
        }
        self.frozen = true;
        ComposedTransformer {
            entries: self.order.iter().cloned().collect(),
        }
    }
}

impl<T> ComposedTransformer<T> {
    /// Composed transformer with no entries, i.e. the identity
    pub fn identity() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    /// Applies every transform in registration order: `t_n(...t_1(input))`.
    ///
    /// The first error returned by a transform is propagated as is and the remaining
    /// transforms are skipped.
    pub fn apply(&self, input: T) -> Result<T> {
        self.entries
            .iter()
            .try_fold(input, |acc, (_, transform)| transform.transform(acc))
    }

    /// Names of the composed transforms, in application order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Clone for ComposedTransformer<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> std::fmt::Debug for ComposedTransformer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedTransformer")
            .field("names", &self.names())
            .finish()
    }
}

impl<T> Transform<T> for ComposedTransformer<T> {
    fn transform(&self, input: T) -> Result<T> {
        self.apply(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn append(suffix: &'static str) -> impl Fn(String) -> Result<String> + Send + Sync {
        move |text: String| Ok(format!("{}{}", text, suffix))
    }

    fn wrap(tag: &'static str) -> impl Fn(String) -> Result<String> + Send + Sync {
        move |text: String| Ok(format!("<{0}>{1}</{0}>", tag, text))
    }

    #[test]
    fn test_order_is_preserved() {
        let mut registry = TransformRegistry::new("test");
        registry.register_fn("first", wrap("p")).unwrap();
        registry.register_fn("second", append("!")).unwrap();
        let composed = registry.finalize();

        let t1 = wrap("p");
        let t2 = append("!");
        let input = "x".to_string();
        let expected = t2(t1(input.clone()).unwrap()).unwrap();
        let reversed = t1(t2(input.clone()).unwrap()).unwrap();

        assert_eq!(composed.apply(input).unwrap(), expected);
        assert_eq!(expected, "<p>x</p>!");
        assert_ne!(expected, reversed);
        assert_eq!(composed.names(), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_registry_is_identity() {
        let mut registry = TransformRegistry::<String>::new("empty");
        let composed = registry.finalize();
        assert!(composed.is_empty());
        for input in ["", "abc", "<p>nested</p>"] {
            assert_eq!(composed.apply(input.to_string()).unwrap(), input);
        }
        assert_eq!(
            ComposedTransformer::<i32>::identity().apply(42).unwrap(),
            42
        );
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut registry = TransformRegistry::new("numbers");
        registry.register_fn("double", |x: i64| Ok(x * 2)).unwrap();
        registry.register_fn("decrement", |x: i64| Ok(x - 1)).unwrap();
        let first = registry.finalize();
        let second = registry.finalize();
        for x in [-3, 0, 7, 1000] {
            assert_eq!(first.apply(x).unwrap(), second.apply(x).unwrap());
        }
        assert_eq!(first.apply(5).unwrap(), 9);
    }

    #[test]
    fn test_register_after_finalize_fails() {
        let mut registry = TransformRegistry::new("frozen");
        registry.register_fn("a", append("a")).unwrap();
        let composed = registry.finalize();
        let result = registry.register_fn("b", append("b"));
        assert!(matches!(result, Err(Error::RegistryFrozen(name)) if name == "frozen"));
        assert!(registry.is_frozen());
        assert_eq!(registry.len(), 1);
        assert_eq!(composed.apply(String::new()).unwrap(), "a");
    }

    #[test]
    fn test_duplicate_name_fails() {
        let mut registry = TransformRegistry::new("dup");
        registry.register_fn("table", append("1")).unwrap();
        let result = registry.register_fn("table", append("2"));
        assert!(matches!(
            result,
            Err(Error::DuplicateName { kind: "transformer", name }) if name == "table"
        ));
        assert_eq!(registry.finalize().apply(String::new()).unwrap(), "1");
    }

    #[test]
    fn test_error_is_propagated_and_stops_the_chain() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut registry = TransformRegistry::new("failing");
        registry
            .register_fn("boom", |_: String| {
                Err(Error::TransformError {
                    name: "boom".to_string(),
                    cause: "malformed input".to_string(),
                })
            })
            .unwrap();
        registry
            .register_fn("after", move |text: String| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(text)
            })
            .unwrap();

        let result = registry.finalize().apply("x".to_string());
        assert!(matches!(
            result,
            Err(Error::TransformError { name, cause }) if name == "boom" && cause == "malformed input"
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_composed_transformers_nest() {
        let mut inner = TransformRegistry::new("inner");
        inner.register_fn("a", append("a")).unwrap();
        inner.register_fn("b", append("b")).unwrap();

        let mut outer = TransformRegistry::new("outer");
        outer.register("inner", Arc::new(inner.finalize())).unwrap();
        outer.register_fn("c", append("c")).unwrap();

        assert_eq!(outer.finalize().apply(String::new()).unwrap(), "abc");
    }
}
