use std::collections::HashMap;
use std::fmt;

use crate::error::{AppError, Context};

use super::FetchResult;

/// A single optional query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The provider only understands lowercase booleans.
            ParamValue::Bool(true) => f.write_str("true"),
            ParamValue::Bool(false) => f.write_str("false"),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// Ordered optional parameters forwarded verbatim to the provider.
///
/// Names and values are not validated; the provider rejects what it does not understand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`QueryParams::set`].
    pub fn with<K: Into<String>, V: Into<ParamValue>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a parameter, keeping the position of the first insertion.
    pub fn set<K: Into<String>, V: Into<ParamValue>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Parse a `key=value` pair as typed on the command line.
    pub fn parse_pair(pair: &str) -> FetchResult<(String, ParamValue)> {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| AppError::message(format!("expected key=value, got `{pair}`")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::message(format!("missing parameter name in `{pair}`")));
        }

        let raw = raw.trim();
        let value = if raw.eq_ignore_ascii_case("true") {
            ParamValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            ParamValue::Bool(false)
        } else if let Ok(int) = raw.parse::<i64>() {
            ParamValue::Int(int)
        } else {
            ParamValue::Text(raw.to_string())
        };

        Ok((key.to_string(), value))
    }
}

/// Merge the fixed batch parameters with caller-supplied ones.
///
/// Caller keys override base keys of the same name.
pub fn build_batch_params(
    symbol: &str,
    endpoint: &str,
    token: &str,
    optional: &QueryParams,
) -> Vec<(String, String)> {
    let mut merged = QueryParams::new()
        .with("symbols", symbol)
        .with("types", endpoint)
        .with("token", token);

    for (key, value) in optional.iter() {
        merged.set(key, value.clone());
    }

    merged
        .entries
        .into_iter()
        .map(|(key, value)| (key, value.to_string()))
        .collect()
}

/// Expand `${VAR}` placeholders from the process environment.
pub fn expand_env_vars(value: &str) -> FetchResult<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder in config value",
                ));
            }

            if !closed {
                return Err(AppError::message(
                    "Unterminated environment placeholder in config value",
                ));
            }

            let value = std::env::var(&name).with_context(|| {
                format!("Environment variable {} referenced by config is not set", name)
            })?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Fill `{name}` placeholders in a URL template.
pub fn render_template(template: &str, replacements: &HashMap<&str, &str>) -> FetchResult<String> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '{' {
            let mut key = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                key.push(next);
            }

            if !closed {
                return Err(AppError::message(format!(
                    "Unterminated placeholder in template: {{{key}"
                )));
            }

            if key.is_empty() {
                return Err(AppError::message(
                    "Encountered empty placeholder `{}` in template",
                ));
            }

            let value = replacements.get(key.as_str()).ok_or_else(|| {
                AppError::message(format!(
                    "No replacement provided for placeholder `{}` in template",
                    key
                ))
            })?;
            result.push_str(value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}
