use crate::debug;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Settings shared with the extensions during the initialization pass.
///
/// Values are stored as JSON values. String values may reference other settings
/// using `$name` or `${name:fallback}`, resolved when the context is built.
#[derive(Debug, Default, Clone)]
pub struct Context {
    data: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Context { data: Map::new() }
    }

    /// Builds the context from the given entries, resolving the references between
    /// them whatever their order. A reference that cannot be resolved (missing
    /// variable without fallback, cyclic reference) becomes the empty string.
    pub fn from<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let raw = Context {
            data: entries
                .into_iter()
                .map(|(key, value)| (key.into(), Value::String(value.into())))
                .collect(),
        };

        let data = raw
            .data
            .iter()
            .map(|(key, value)| {
                let value = match value.as_str() {
                    Some(text) => match raw.resolve_variable(text, &mut HashSet::new()) {
                        Ok(resolved) => Value::String(resolved),
                        Err(e) => {
                            debug!("Setting \"{}\" left empty : {}", key, e);
                            Value::String(String::new())
                        }
                    },
                    None => value.clone(),
                };
                (key.clone(), value)
            })
            .collect();

        Context { data }
    }

    /// Resolves a variable reference in the format $var or ${var:fallback}
    fn resolve_variable(&self, value: &str, visited: &mut HashSet<String>) -> Result<String> {
        let Some(reference) = value.strip_prefix('$') else {
            return Ok(value.to_string());
        };

        let (var_name, fallback) = match reference
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
        {
            Some(content) => match content.split_once(':') {
                Some((name, fallback)) => (name, Some(fallback)),
                None => (content, None),
            },
            None => (reference, None),
        };

        if !visited.insert(var_name.to_string()) {
            return Err(Error::ContextCyclicReference(var_name.to_string()));
        }

        let resolved = match self.get(var_name) {
            Some(value) => value.to_string(),
            None => match fallback {
                Some(fallback) => self.resolve_variable(&format!("${}", fallback), visited)?,
                None => return Err(Error::ContextVariableNotFound(var_name.to_string())),
            },
        };

        let final_value = self.resolve_variable(&resolved, visited)?;
        visited.remove(var_name);

        Ok(final_value)
    }

    /// Retrieves the raw value stored for the given key (if available).
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Retrieves a single value from the context for the given key (if available)
    /// as a string. In case of multiple values, the first one is returned.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_raw(key).and_then(|v| match v {
            Value::Array(arr) if !arr.is_empty() => arr[0].as_str(),
            _ => v.as_str(),
        })
    }

    /// Retrieves a non empty value for the given key or the supplied default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).filter(|v| !v.is_empty()).unwrap_or(default)
    }
}
