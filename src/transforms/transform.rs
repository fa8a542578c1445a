use crate::error::Result;
use std::sync::Arc;

/// Trait for the transformations contributed to a pipeline
///
/// A transform maps a value to another value of the same type, e.g. a rendered
/// element tree into the tree that will actually be served. Transforms are expected
/// to be pure, the pipeline only guarantees the order in which they run.
///
/// Any `Fn(T) -> Result<T>` closure is a transform.
///
/// # Examples
///
/// ```
/// use marginalia::error::Result;
/// use marginalia::transforms::Transform;
///
/// let shout = |text: String| -> Result<String> { Ok(text.to_uppercase()) };
/// assert_eq!(shout.transform("hello".to_string()).unwrap(), "HELLO");
/// ```
pub trait Transform<T>: Send + Sync {
    /// Transforms the input value
    ///
    /// # Arguments
    /// * `input` - The value to transform
    ///
    /// # Returns
    /// The transformed value or an error if transformation fails
    fn transform(&self, input: T) -> Result<T>;
}

/// Shared handle on a transform, as stored in the registries
pub type Transformer<T> = Arc<dyn Transform<T>>;

impl<T, F> Transform<T> for F
where
    F: Fn(T) -> Result<T> + Send + Sync,
{
    fn transform(&self, input: T) -> Result<T> {
        self(input)
    }
}
