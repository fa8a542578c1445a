use chrono::prelude::*;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

pub use marginalia::{
    config::{parse as config_parse, MainConfig},
    constants::config::DEFAULT_CONF_FILE,
    error::*,
};

use crate::directories;

static DEFAULT_CONF: &str = "# File automatically generated on ${date}\n\
                            [defaults]\n\
                            default_protocol    = \"http:\"\n\
                            link_target         = \"\"\n\
                            table_wrapper_class = \"tableWrapper\"\n\n\
                            [vars]\n\n\
                            # Extensions, in registration order\n\
                            [[extensions]]\n\
                            name = \"helpers\"\n\n\
                            [[extensions]]\n\
                            name = \"ssr\"\n\n\
                            [[extensions]]\n\
                            name = \"table\"\n\n\
                            [[extensions]]\n\
                            name    = \"link\"\n\
                            exclude = []\n";

#[derive(Debug)]
pub struct BootStrap {
    config: MainConfig,
}

impl BootStrap {
    /// Loads the main configuration, from the given file when supplied or from
    /// the default location otherwise (created when missing).
    pub fn new(config_file: Option<&str>) -> Result<Self> {
        let config = match config_file {
            Some(file) => parse_config_file(&expand_path(file)?)?,
            None => parse_main_config()?,
        };
        Ok(BootStrap { config })
    }

    pub fn into_config(self) -> MainConfig {
        self.config
    }
}

/// Expands environment variables and `~` in the given path
fn expand_path(path: &str) -> Result<PathBuf> {
    match shellexpand::full(path) {
        Ok(expanded) => Ok(PathBuf::from(expanded.into_owned())),
        Err(e) => Err(Error::InterpolationError {
            location: ConfigType::MAIN,
            cause: e.to_string(),
        }),
    }
}

/// Creates the default main configuration file in the config directory
///
/// # Arguments
/// * `config_file` - The path to the configuration file
///
/// # Returns
/// A `Result` containing the configuration data as a `String`
fn create_default_config(config_file: &Path) -> Result<String> {
    let parent_dir = config_file
        .parent()
        .ok_or_else(|| Error::ConfigError(config_file.to_string_lossy().into_owned()))?;
    std::fs::create_dir_all(parent_dir)?;
    let current_date: DateTime<Local> = Local::now();
    let config_data = DEFAULT_CONF.replacen("${date}", &current_date.to_string(), 1);

    File::create(config_file)?.write_all(config_data.as_bytes())?;
    Ok(config_data)
}

/// Reads and parses the given configuration file
fn parse_config_file(conf_file: &Path) -> Result<MainConfig> {
    let file_name = conf_file.to_string_lossy().into_owned();
    let toml_data = match config_parse(conf_file) {
        Ok(data) => data,
        Err(Error::Io(e)) => {
            return Err(Error::ConfigReadError {
                file: file_name,
                cause: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };
    MainConfig::from_toml(&toml_data, &file_name)
}

/// Processes the main configuration file retrieving the associated `MainConfig` structure
///
/// If the file does not exist, a default configuration file is created. When no
/// configuration directory can be determined the built-in defaults are used.
pub fn parse_main_config() -> Result<MainConfig> {
    let Some(config_dir) = directories::config_dir() else {
        return Ok(MainConfig::new());
    };
    let conf_file = config_dir.join(DEFAULT_CONF_FILE);
    let toml_data = match config_parse(&conf_file) {
        Ok(data) => data,
        Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
            create_default_config(&conf_file)?
        }
        Err(Error::Io(e)) => {
            return Err(Error::ConfigReadError {
                file: String::from(DEFAULT_CONF_FILE),
                cause: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    MainConfig::from_toml(&toml_data, DEFAULT_CONF_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conf_is_valid() {
        let config = MainConfig::from_toml(DEFAULT_CONF, DEFAULT_CONF_FILE).unwrap();
        let names: Vec<&str> = config.extensions.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, marginalia::constants::extension::DEFAULT_ORDER);
        assert_eq!(config.defaults.default_protocol, "http:");
    }

    #[test]
    fn test_create_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let conf_file = dir.path().join("nested").join(DEFAULT_CONF_FILE);
        let data = create_default_config(&conf_file).unwrap();
        assert!(!data.contains("${date}"));
        let config = parse_config_file(&conf_file).unwrap();
        assert_eq!(config.extensions.len(), 4);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_config_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::ConfigReadError { .. })));
    }
}
