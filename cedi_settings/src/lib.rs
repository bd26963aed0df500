//! # Cedi Settings
//!
//! Typed editor settings with read-only defaults and user overrides.
//!
//! ## Philosophy
//!
//! - **Typed settings**: Every setting has an explicit type fixed by its default
//! - **Layered**: Read-only defaults + overrides
//! - **Deterministic**: Overrides serialize with stable key order
//! - **Forgiving at the edge**: A bad stored value falls back to its default
//!
//! ## Example
//!
//! ```ignore
//! use cedi_settings::{create_default_registry, editor_options, keys, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::EDITOR_TAB_SPACES, SettingValue::Integer(8))?;
//! let options = editor_options(&registry);
//! assert_eq!(options.tab_spaces, 8);
//! ```

pub mod persistence;

use std::collections::BTreeMap;
use std::fmt;

use cedi_core::{EditorOptions, Newline, VerticalMove};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if this key starts with the given prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl SettingValue {
    /// Tries to get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as float; integers widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(v) => Some(*v),
            SettingValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Tries to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::Float(_) => "float",
            SettingValue::String(_) => "string",
        }
    }

    fn same_type(&self, other: &SettingValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// Parse `text` as a value of the same type as `self`
    pub fn parse_like(&self, text: &str) -> Option<SettingValue> {
        let text = text.trim();
        match self {
            SettingValue::Boolean(_) => match text {
                "true" | "on" | "yes" | "1" => Some(SettingValue::Boolean(true)),
                "false" | "off" | "no" | "0" => Some(SettingValue::Boolean(false)),
                _ => None,
            },
            SettingValue::Integer(_) => text.parse().ok().map(SettingValue::Integer),
            SettingValue::Float(_) => text.parse().ok().map(SettingValue::Float),
            SettingValue::String(_) => Some(SettingValue::String(text.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Settings errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(SettingKey),

    #[error("Setting {key} expects a {expected} value, got {found}")]
    TypeMismatch {
        key: SettingKey,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: SettingKey, value: String },
}

/// Settings registry
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// Overrides of registered defaults
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    /// Creates an empty settings registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override; the key must exist and the type must match its default
    pub fn set_override(
        &mut self,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) -> Result<(), SettingsError> {
        let key = key.into();
        let default = self
            .defaults
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
        if !default.same_type(&value) {
            return Err(SettingsError::TypeMismatch {
                expected: default.type_name(),
                found: value.type_name(),
                key,
            });
        }
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Sets an override from text, typed after the default (e.g. `--set key=value`)
    pub fn set_from_str(&mut self, key: &str, text: &str) -> Result<(), SettingsError> {
        let key = SettingKey::new(key);
        let default = self
            .defaults
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
        let value = default.parse_like(text).ok_or_else(|| SettingsError::InvalidValue {
            key: key.clone(),
            value: text.to_string(),
        })?;
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Removes an override
    pub fn remove_override(&mut self, key: &SettingKey) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Gets the effective setting value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    /// Gets the default value for a setting
    pub fn get_default(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    /// Gets the override (if any) for a setting
    pub fn get_override(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key)
    }

    /// Returns all default setting keys
    pub fn list_defaults(&self) -> Vec<SettingKey> {
        self.defaults.keys().cloned().collect()
    }

    /// Returns all overridden keys
    pub fn list_overrides(&self) -> Vec<SettingKey> {
        self.overrides.keys().cloned().collect()
    }

    /// Returns all effective settings with a given prefix
    pub fn list_with_prefix(&self, prefix: &str) -> Vec<(SettingKey, SettingValue)> {
        self.defaults
            .keys()
            .filter(|key| key.starts_with(prefix))
            .filter_map(|key| self.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    /// Clears all overrides
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Exports all overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Imports overrides, merging with existing ones.
    ///
    /// Entries that fail validation are skipped and returned.
    pub fn import_overrides(
        &mut self,
        overrides: BTreeMap<SettingKey, SettingValue>,
    ) -> Vec<SettingsError> {
        overrides
            .into_iter()
            .filter_map(|(key, value)| self.set_override(key, value).err())
            .collect()
    }

    fn integer(&self, key: &str) -> Option<i64> {
        self.get(&SettingKey::new(key)).and_then(SettingValue::as_integer)
    }

    fn float(&self, key: &str) -> Option<f64> {
        self.get(&SettingKey::new(key)).and_then(SettingValue::as_float)
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        self.get(&SettingKey::new(key)).and_then(SettingValue::as_boolean)
    }

    fn string(&self, key: &str) -> Option<&str> {
        self.get(&SettingKey::new(key)).and_then(SettingValue::as_string)
    }
}

/// Editor setting keys
pub mod keys {
    pub const EDITOR_TAB_SPACES: &str = "editor.tab_spaces";
    pub const EDITOR_DRAW_WHITESPACE: &str = "editor.draw_whitespace";
    /// `"auto"` keeps each document's own newline
    pub const EDITOR_NEWLINE: &str = "editor.newline";
    pub const SCROLL_OVERSCROLL_FRACTION: &str = "scroll.overscroll_fraction";
    pub const SCROLL_SMOOTH: &str = "scroll.smooth";
    pub const SCROLL_RATE: &str = "scroll.rate";
    pub const SCROLL_LINES_PER_NOTCH: &str = "scroll.lines_per_notch";
    pub const SCROLL_RESERVE_BOTTOM_ROW: &str = "scroll.reserve_bottom_row";
    pub const CURSOR_VERTICAL_MOVE: &str = "cursor.vertical_move";
    pub const CURSOR_MIN_WIDTH: &str = "cursor.min_width";
}

/// Creates a settings registry with default settings
pub fn create_default_registry() -> SettingsRegistry {
    let defaults = EditorOptions::default();
    let mut registry = SettingsRegistry::new();

    // Editor settings
    registry.register_default(
        keys::EDITOR_TAB_SPACES,
        SettingValue::Integer(defaults.tab_spaces as i64),
    );
    registry.register_default(
        keys::EDITOR_DRAW_WHITESPACE,
        SettingValue::Boolean(defaults.draw_whitespace),
    );
    registry.register_default(keys::EDITOR_NEWLINE, SettingValue::String("auto".to_string()));

    // Scroll settings
    registry.register_default(
        keys::SCROLL_OVERSCROLL_FRACTION,
        SettingValue::Float(f64::from(defaults.overscroll_fraction)),
    );
    registry.register_default(keys::SCROLL_SMOOTH, SettingValue::Boolean(defaults.smooth_scroll));
    registry.register_default(keys::SCROLL_RATE, SettingValue::Float(f64::from(defaults.scroll_rate)));
    registry.register_default(
        keys::SCROLL_LINES_PER_NOTCH,
        SettingValue::Integer(i64::from(defaults.mouse_scroll_lines)),
    );
    registry.register_default(
        keys::SCROLL_RESERVE_BOTTOM_ROW,
        SettingValue::Boolean(defaults.reserve_bottom_row),
    );

    // Cursor settings
    registry.register_default(
        keys::CURSOR_VERTICAL_MOVE,
        SettingValue::String(defaults.vertical_move.as_str().to_string()),
    );
    registry.register_default(
        keys::CURSOR_MIN_WIDTH,
        SettingValue::Float(f64::from(defaults.min_cursor_width)),
    );

    registry
}

/// Map the effective settings onto editor options.
///
/// Out-of-range or mistyped values keep the built-in default.
pub fn editor_options(registry: &SettingsRegistry) -> EditorOptions {
    let defaults = EditorOptions::default();

    let tab_spaces = registry
        .integer(keys::EDITOR_TAB_SPACES)
        .filter(|value| *value >= 1)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(defaults.tab_spaces);

    let newline = match registry.string(keys::EDITOR_NEWLINE) {
        Some(name) => Newline::from_name(name),
        None => defaults.newline,
    };

    let overscroll_fraction = registry
        .float(keys::SCROLL_OVERSCROLL_FRACTION)
        .filter(|value| (0.0..=1.0).contains(value))
        .map(|value| value as f32)
        .unwrap_or(defaults.overscroll_fraction);

    let scroll_rate = registry
        .float(keys::SCROLL_RATE)
        .filter(|value| *value > 0.0 && *value <= 1.0)
        .map(|value| value as f32)
        .unwrap_or(defaults.scroll_rate);

    let mouse_scroll_lines = registry
        .integer(keys::SCROLL_LINES_PER_NOTCH)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(defaults.mouse_scroll_lines);

    let vertical_move = registry
        .string(keys::CURSOR_VERTICAL_MOVE)
        .and_then(VerticalMove::from_name)
        .unwrap_or(defaults.vertical_move);

    let min_cursor_width = registry
        .float(keys::CURSOR_MIN_WIDTH)
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value as f32)
        .unwrap_or(defaults.min_cursor_width);

    EditorOptions {
        draw_whitespace: registry
            .boolean(keys::EDITOR_DRAW_WHITESPACE)
            .unwrap_or(defaults.draw_whitespace),
        tab_spaces,
        overscroll_fraction,
        smooth_scroll: registry.boolean(keys::SCROLL_SMOOTH).unwrap_or(defaults.smooth_scroll),
        scroll_rate,
        mouse_scroll_lines,
        reserve_bottom_row: registry
            .boolean(keys::SCROLL_RESERVE_BOTTOM_ROW)
            .unwrap_or(defaults.reserve_bottom_row),
        vertical_move,
        min_cursor_width,
        newline,
        whitespace: defaults.whitespace,
    }
}
