//! `marginalia` provides the render-side extensions of a rich-text editor: a server
//! side rendering pipeline composed from the transformers of every extension, the
//! aggregation of the extension helpers, and link utilities.
//!
//! The main struct of this crate is `ExtensionManager`, which runs the
//! initialization pass over the registered extensions and publishes the composed
//! pipelines.
//!
//! "Hello world" example:
//! ```
//! use marginalia::context::Context;
//! use marginalia::element::Element;
//! use marginalia::extensions;
//! use marginalia::manager::ExtensionManager;
//! use marginalia::renderer::SsrRenderer;
//!
//! let mut manager = ExtensionManager::new(extensions::defaults(), Context::new()).unwrap();
//! manager.init().unwrap();
//!
//! let renderer = SsrRenderer::new(manager.ssr_transformer().unwrap());
//! let html = renderer
//!     .render(Element::new("div").with_child(Element::new("p")))
//!     .unwrap();
//! assert_eq!(html, "<div><p><br></p></div>");
//! ```

pub mod config;
pub mod constants;
pub mod context;
pub mod document;
pub mod element;
pub mod error;
pub mod extensions;
pub mod link;
pub mod log;
pub mod manager;
pub mod renderer;
pub mod store;
pub mod transforms;
pub mod utils;

/// The marginalia prelude
///
/// This module re-exports the most commonly used items from marginalia.
/// You can use it with `use marginalia::prelude::*;` to bring all common items into scope.
pub mod prelude {
    // Re-export commonly used traits
    pub use crate::extensions::Extension;
    pub use crate::transforms::Transform;

    // Re-export commonly used types
    pub use crate::context::Context;
    pub use crate::element::{Element, Node};
    pub use crate::error::Result;
    pub use crate::manager::ExtensionManager;
    pub use crate::transforms::{ComposedTransformer, TransformRegistry};

    // Re-export commonly used functions
    pub use crate::link::extract_href;
    pub use crate::utils::is_set_equal;
}
