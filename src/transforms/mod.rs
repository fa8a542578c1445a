//! Transformer pipeline: named transforms registered in order and composed into a
//! single transform applied once per render.
//!
//! The built-in element transforms are:
//! - `EmptyParagraphs` : keeps empty paragraphs visible by injecting a line break
//! - `TableWrapper` : wraps tables in a container element
//! - `LinkNormalizer` : normalizes anchors href, target and rel attributes

mod empty_paragraphs;
mod link_normalizer;
mod registry;
mod table_wrapper;
mod transform;

pub use empty_paragraphs::EmptyParagraphs;
pub use link_normalizer::LinkNormalizer;
pub use registry::{ComposedTransformer, TransformRegistry};
pub use table_wrapper::TableWrapper;
pub use transform::{Transform, Transformer};
