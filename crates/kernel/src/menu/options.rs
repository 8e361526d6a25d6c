//! Render options: variant defaults merged with caller overrides.
//!
//! Each variant declares a closed set of option keys with default values.
//! Overrides may only name keys from that set and must keep the default's
//! JSON type; anything else is a configuration error raised before any
//! markup is produced.

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::error::{MenuError, MenuResult};
use crate::security::sanitize_css_class;

/// Option values keyed by name.
pub type OptionMap = Map<String, Value>;

/// Build an option map from literal pairs.
pub fn option_map<I>(pairs: I) -> OptionMap
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Options every variant understands.
pub fn base_defaults() -> OptionMap {
    option_map([
        ("menu_class", json!("menu")),
        ("menu_id", json!("")),
        ("container", json!("nav")),
        ("container_class", json!("")),
        ("aria_label", json!("Menu")),
        ("item_class", json!("menu-item")),
        ("link_class", json!("menu-link")),
        ("submenu_class", json!("sub-menu")),
        ("active_class", json!("is-active")),
        ("max_depth", json!(0)),
        ("show_icons", json!(true)),
        ("show_descriptions", json!(false)),
        ("description_length", json!(160)),
        ("max_class_length", json!(64)),
        ("id_prefix", json!("menu")),
    ])
}

/// Merge `extra` over `base` (shallow).
pub fn merged(base: &OptionMap, extra: &OptionMap) -> OptionMap {
    let mut out = base.clone();
    for (k, v) in extra {
        out.insert(k.clone(), v.clone());
    }
    out
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "an integer",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

fn compatible(default: &Value, value: &Value) -> bool {
    match (kind(default), kind(value)) {
        ("null", _) => true,
        ("a number", "an integer") => true,
        (expected, found) => expected == found,
    }
}

/// Resolved, read-only options for one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    variant: String,
    values: OptionMap,
}

impl RenderOptions {
    /// Merge `overrides` onto `defaults`, rejecting unknown keys and type changes.
    pub fn resolve(variant: &str, defaults: &OptionMap, overrides: &OptionMap) -> MenuResult<Self> {
        let mut values = defaults.clone();
        for (key, value) in overrides {
            let Some(default) = defaults.get(key) else {
                return Err(MenuError::UnknownOption {
                    variant: variant.to_string(),
                    key: key.clone(),
                });
            };
            if !compatible(default, value) {
                return Err(MenuError::OptionType {
                    key: key.clone(),
                    expected: kind(default),
                    found: kind(value),
                });
            }
            values.insert(key.clone(), value.clone());
        }
        Ok(Self {
            variant: variant.to_string(),
            values,
        })
    }

    /// Options consisting of `defaults` only.
    pub fn from_defaults(variant: &str, defaults: &OptionMap) -> Self {
        Self {
            variant: variant.to_string(),
            values: defaults.clone(),
        }
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let value = self.values.get(key);
        if value.is_none() {
            warn!(variant = %self.variant, key = %key, "option read but not declared");
        }
        value
    }

    /// String option, empty when absent or not a string.
    pub fn str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn int(&self, key: &str) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Integer option clamped to be non-negative.
    pub fn count(&self, key: &str) -> usize {
        usize::try_from(self.int(key).max(0)).unwrap_or(usize::MAX)
    }

    /// List of strings; non-string entries are skipped.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// String option reduced to safe class tokens.
    pub fn css_class(&self, key: &str) -> String {
        sanitize_css_class(self.str(key), self.count("max_class_length").max(1))
    }

    /// Depth limit, `None` when unlimited (`max_depth = 0`).
    pub fn max_depth(&self) -> Option<usize> {
        match self.count("max_depth") {
            0 => None,
            n => Some(n),
        }
    }

    /// Identifier prefix reduced to a single class-safe token.
    pub fn id_prefix(&self) -> String {
        let prefix = self.css_class("id_prefix").replace(' ', "-");
        if prefix.is_empty() {
            "menu".to_string()
        } else {
            prefix
        }
    }

    /// Stable text form used in fragment-cache keys.
    pub fn fingerprint_source(&self) -> String {
        Value::Object(self.values.clone()).to_string()
    }
}
