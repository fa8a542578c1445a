//! Module for shared constants used across the codebase

/// Fixed names under which the initialization pass publishes its results
pub mod store {
    /// Composed SSR transformer (`ComposedTransformer<Element>`)
    pub const SSR_TRANSFORMER: &str = "ssr_transformer";
    /// Aggregated helpers (`HelperRegistry`)
    pub const HELPERS: &str = "helpers";
}

/// Names of the built-in extensions
pub mod extension {
    pub const SSR: &str = "ssr";
    pub const HELPERS: &str = "helpers";
    pub const TABLE: &str = "table";
    pub const LINK: &str = "link";

    /// Default registration order
    pub const DEFAULT_ORDER: [&str; 4] = [HELPERS, SSR, TABLE, LINK];
}

pub mod link {
    /// Protocol prepended to URLs without a recognized scheme
    pub const DEFAULT_PROTOCOL: &str = "http:";
    /// `rel` attribute added to links opened in another target
    pub const TARGET_REL: &str = "noopener noreferrer nofollow";
    /// Mark type holding links in the document state
    pub const MARK: &str = "link";
}

pub mod table {
    /// Class of the element wrapping rendered tables
    pub const DEFAULT_WRAPPER_CLASS: &str = "tableWrapper";
}

pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONF_FILE: &str = "marginalia.toml";
}
