use std::io::Write;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Display)]
pub enum ConfigType {
    #[strum(serialize = "Main config")]
    MAIN,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("error processing args. Cause : {0}")]
    ArgsProcessingError(String),
    #[error("unable to create default configuration file in {0}")]
    ConfigError(String),
    #[error("unable to read configuration file {file:?}. Cause : {cause}")]
    ConfigReadError { file: String, cause: String },
    #[error("cyclic reference detected for variable \"{0}\"")]
    ContextCyclicReference(String),
    #[error("variable \"{0}\" not found in context")]
    ContextVariableNotFound(String),
    #[error("unable to read document {file:?}. Cause : {cause}")]
    DocumentReadError { file: String, cause: String },
    #[error("duplicate {kind} name : \"{name}\"")]
    DuplicateName { kind: &'static str, name: String },
    #[error(transparent)]
    Fmt(#[from] ::std::fmt::Error),
    #[error(transparent)]
    Io(#[from] ::std::io::Error),
    #[error("unable to interpolate {location} path. Cause : {cause}")]
    InterpolationError { location: ConfigType, cause: String },
    #[error("JSON parsing error: {0}")]
    JsonError(String),
    #[error("\"{0}\" used outside valid scope (initialization not completed)")]
    OutsideScope(String),
    #[error("registry \"{0}\" is frozen, no more transformers can be registered")]
    RegistryFrozen(String),
    #[error("unable to parse {location} file {file:?}. Cause : {cause}")]
    SerdeTomlError {
        location: ConfigType,
        file: String,
        cause: String,
    },
    #[error("no value published under store key \"{0}\"")]
    StoreKeyNotFound(String),
    #[error("value published under store key \"{0}\" has a different type")]
    StoreTypeMismatch(String),
    #[error("transform \"{name}\" failed. Cause : {cause}")]
    TransformError { name: String, cause: String },
    #[error("unknown extension : \"{0}\"")]
    UnknownExtension(String),
    #[error("unknown helper : \"{0}\"")]
    UnknownHelper(String),
    #[error("{0}")]
    Msg(String),
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error::Msg(s.to_owned())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Msg(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::JsonError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn default_error_handler(error: &Error, output: &mut dyn Write) {
    use nu_ansi_term::Color::Red;

    match error {
        Error::Io(io_error) if io_error.kind() == ::std::io::ErrorKind::BrokenPipe => {
            ::std::process::exit(0);
        }
        Error::ConfigReadError { file: _, cause: _ }
        | Error::SerdeTomlError {
            location: _,
            file: _,
            cause: _,
        }
        | Error::InterpolationError {
            location: _,
            cause: _,
        } => {
            writeln!(output, "{}: {}", Red.paint("[config error]"), error).ok();
        }
        Error::DocumentReadError { file: _, cause: _ } | Error::JsonError(_) => {
            writeln!(output, "{}: {}", Red.paint("[document error]"), error).ok();
        }
        Error::DuplicateName { kind: _, name: _ }
        | Error::UnknownExtension(_)
        | Error::UnknownHelper(_) => {
            writeln!(output, "{}: {}", Red.paint("[extension error]"), error).ok();
        }
        _ => {
            writeln!(output, "{}: {}", Red.paint("[marginalia error]"), error).ok();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_message() {
        let error = Error::DuplicateName {
            kind: "helper",
            name: "get_text".to_string(),
        };
        assert_eq!(error.to_string(), "duplicate helper name : \"get_text\"");
    }

    #[test]
    fn test_error_handler_categories() {
        let mut out = Vec::new();
        default_error_handler(&Error::UnknownHelper("nope".to_string()), &mut out);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[extension error]"));
        assert!(printed.contains("unknown helper : \"nope\""));
    }
}
