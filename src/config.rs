use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{extension, link::DEFAULT_PROTOCOL, table::DEFAULT_WRAPPER_CLASS};
use crate::context::Context;
use crate::error::*;
use crate::extensions::{self, Extension, ExtensionOptions};

#[derive(Deserialize, Debug)]
pub struct MainConfig {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub vars: HashMap<String, String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<ExtensionConfig>,
}

#[derive(Deserialize, Debug, Serialize)]
#[serde(default)]
pub struct Defaults {
    pub default_protocol: String,
    pub link_target: String,
    pub table_wrapper_class: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfig {
    pub name: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Defaults {
        Defaults {
            default_protocol: DEFAULT_PROTOCOL.to_string(),
            link_target: String::new(),
            table_wrapper_class: DEFAULT_WRAPPER_CLASS.to_string(),
        }
    }
}

impl Default for MainConfig {
    fn default() -> Self {
        MainConfig {
            defaults: Defaults::default(),
            vars: HashMap::new(),
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<ExtensionConfig> {
    extension::DEFAULT_ORDER
        .iter()
        .map(|name| ExtensionConfig::new(*name))
        .collect()
}

impl ExtensionConfig {
    pub fn new<S: Into<String>>(name: S) -> Self {
        ExtensionConfig {
            name: name.into(),
            exclude: Vec::new(),
        }
    }
}

impl MainConfig {
    pub fn new() -> Self {
        let mut main_config = MainConfig::default();
        main_config.init();
        main_config
    }

    /// Parses the configuration from its TOML representation
    pub fn from_toml(data: &str, file: &str) -> Result<Self> {
        let mut config: MainConfig = toml::from_str(data).map_err(|e| Error::SerdeTomlError {
            location: ConfigType::MAIN,
            file: file.to_string(),
            cause: e.to_string(),
        })?;
        config.init();
        Ok(config)
    }

    /// Performs custom initialization using the main configuration values
    pub fn init(&mut self) {
        // Keep defaults as vars
        self.defaults.to_hashmap().into_iter().for_each(|(k, v)| {
            self.vars.insert(format!("defaults.{}", k), v);
        });
    }

    /// Builds the settings shared with the extensions
    pub fn settings(&self) -> Context {
        Context::from(self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Opts the given extension out of the pipeline published under `key`
    pub fn exclude(&mut self, name: &str, key: &str) -> Result<()> {
        let extension = self
            .extensions
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::UnknownExtension(name.to_string()))?;
        if !extension.exclude.iter().any(|k| k == key) {
            extension.exclude.push(key.to_string());
        }
        Ok(())
    }

    /// Builds the configured extensions in the configured order
    pub fn build_extensions(&self) -> Result<Vec<Box<dyn Extension>>> {
        self.extensions
            .iter()
            .map(|e| {
                extensions::build(
                    &e.name,
                    e.exclude.iter().cloned().collect::<ExtensionOptions>(),
                )
            })
            .collect()
    }
}

pub fn parse(file_path: &Path) -> Result<String> {
    let mut config_content = String::new();
    File::open(file_path)?.read_to_string(&mut config_content)?;
    Ok(config_content)
}

impl Defaults {
    pub fn to_hashmap(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Ok(serde_json::Value::Object(obj)) = serde_json::to_value(self) {
            for (key, value) in obj {
                match value {
                    serde_json::Value::String(s) => map.insert(key, s),
                    serde_json::Value::Null => map.insert(key, String::new()),
                    other => map.insert(key, other.to_string()),
                };
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::store::SSR_TRANSFORMER;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MainConfig::new();
        assert_eq!(
            config.vars.get("defaults.default_protocol").map(|s| s.as_str()),
            Some("http:")
        );
        assert_eq!(
            config.vars.get("defaults.table_wrapper_class").map(|s| s.as_str()),
            Some("tableWrapper")
        );
        let names: Vec<&str> = config.extensions.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, extension::DEFAULT_ORDER);
    }

    #[test]
    fn test_from_toml() {
        let data = r#"
            [defaults]
            default_protocol = "https:"
            link_target = "$target"

            [vars]
            target = "_blank"

            [[extensions]]
            name = "ssr"

            [[extensions]]
            name = "link"
            exclude = ["ssr_transformer"]
        "#;
        let config = MainConfig::from_toml(data, "test.toml").unwrap();
        assert_eq!(config.defaults.table_wrapper_class, "tableWrapper");
        assert_eq!(
            config.extensions,
            vec![
                ExtensionConfig::new("ssr"),
                ExtensionConfig {
                    name: "link".to_string(),
                    exclude: vec![SSR_TRANSFORMER.to_string()],
                },
            ]
        );

        let settings = config.settings();
        assert_eq!(settings.get("defaults.default_protocol"), Some("https:"));
        assert_eq!(settings.get("defaults.link_target"), Some("_blank"));

        let built = config.build_extensions().unwrap();
        assert_eq!(built.len(), 2);
        assert!(built[1].options().is_excluded(SSR_TRANSFORMER));
    }

    #[test]
    fn test_settings_resolve_reference_chains() {
        let data = r#"
            [defaults]
            link_target = "$target"

            [vars]
            target = "$blank"
            blank = "_blank"
        "#;
        let settings = MainConfig::from_toml(data, "test.toml").unwrap().settings();
        assert_eq!(settings.get("target"), Some("_blank"));
        assert_eq!(settings.get("defaults.link_target"), Some("_blank"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = MainConfig::from_toml("[defaults\nbroken", "broken.toml");
        assert!(matches!(
            result,
            Err(Error::SerdeTomlError { file, .. }) if file == "broken.toml"
        ));
    }

    #[test]
    fn test_unknown_extension() {
        let data = "[[extensions]]\nname = \"emoji\"\n";
        let config = MainConfig::from_toml(data, "test.toml").unwrap();
        assert!(matches!(
            config.build_extensions(),
            Err(Error::UnknownExtension(name)) if name == "emoji"
        ));
    }

    #[test]
    fn test_exclude() {
        let mut config = MainConfig::new();
        config.exclude("table", SSR_TRANSFORMER).unwrap();
        config.exclude("table", SSR_TRANSFORMER).unwrap();
        let table = config.extensions.iter().find(|e| e.name == "table").unwrap();
        assert_eq!(table.exclude, vec![SSR_TRANSFORMER]);
        assert!(matches!(
            config.exclude("emoji", SSR_TRANSFORMER),
            Err(Error::UnknownExtension(_))
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[vars]\nkey = \"value\"\n").unwrap();
        let data = parse(file.path()).unwrap();
        let config = MainConfig::from_toml(&data, "marginalia.toml").unwrap();
        assert_eq!(config.vars.get("key").map(|s| s.as_str()), Some("value"));
        assert_eq!(config.extensions.len(), 4);
    }
}
