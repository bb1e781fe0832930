//! Option declarations and parsed option values.
//!
//! An [`OptionSpec`] describes one named option attached to a command. The
//! [`OptionAdapter`](crate::adapter::OptionAdapter) turns raw argument tokens
//! into an [`OptionMap`] according to those specs.
//!
//! ```rust,ignore
//! use herald_core::{OptionSpec, OptionValue};
//!
//! let verbose = OptionSpec::flag("verbose").describe("print extra information");
//! let output = OptionSpec::text("output").default_value("out.txt");
//!
//! assert_eq!(verbose.short, 'v');
//! assert_eq!(output.default, Some(OptionValue::from("out.txt")));
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The value type an option accepts.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// A boolean switch that takes no value.
    #[default]
    Flag,
    /// Free-form text.
    Text,
    /// A signed integer.
    Integer,
    /// A floating point number.
    Float,
}

impl OptionKind {
    /// Returns `true` for kinds that take a value on the command line.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Flag)
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed (or defaulted) option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Value of a [`OptionKind::Flag`] option.
    Flag(bool),
    /// Value of a [`OptionKind::Integer`] option.
    Integer(i64),
    /// Value of a [`OptionKind::Float`] option.
    Float(f64),
    /// Value of a [`OptionKind::Text`] option.
    Text(String),
}

impl OptionValue {
    /// Returns the boolean if this is a flag value.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string slice if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number if this is a float or integer value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Description of one named option attachable to a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSpec {
    /// Long name, used as `--name` and as the key in the parsed [`OptionMap`].
    pub name: String,
    /// Single-character short form, used as `-s`.
    pub short: char,
    /// The value type.
    pub kind: OptionKind,
    /// Human-readable description shown in help output.
    pub description: String,
    /// Value applied when the option is absent from the input.
    pub default: Option<OptionValue>,
}

impl OptionSpec {
    /// Creates a spec of the given kind.
    ///
    /// The short form defaults to the first character of `name`.
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        let name = name.into();
        let short = name.chars().next().unwrap_or('?');
        Self {
            name,
            short,
            kind,
            description: String::new(),
            default: None,
        }
    }

    /// Creates a [`OptionKind::Flag`] spec.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Flag)
    }

    /// Creates a [`OptionKind::Text`] spec.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Text)
    }

    /// Creates a [`OptionKind::Integer`] spec.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Integer)
    }

    /// Creates a [`OptionKind::Float`] spec.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Float)
    }

    /// Overrides the short form.
    pub fn short(mut self, short: char) -> Self {
        self.short = short;
        self
    }

    /// Sets the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the value used when the option is absent.
    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the upper-cased value placeholder shown in help, e.g. `OUTPUT`.
    ///
    /// Flags take no value and have no placeholder.
    pub fn placeholder(&self) -> Option<String> {
        self.kind
            .takes_value()
            .then(|| self.name.to_uppercase().replace('-', "_"))
    }
}

/// Parsed options keyed by option name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap(IndexMap<String, OptionValue>);

impl OptionMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Inserts a value, returning the previous one for that name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Merges `other` into `self`; values in `other` win on collision.
    pub fn merge(&mut self, other: OptionMap) {
        self.0.extend(other.0);
    }

    /// Returns the raw value for `name`.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Returns `true` if a value is present for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the flag value for `name`, treating absence as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_flag).unwrap_or(false)
    }

    /// Returns the text value for `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_text)
    }

    /// Returns the integer value for `name`.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_integer)
    }

    /// Returns the float value for `name`.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(OptionValue::as_float)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for OptionMap
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
