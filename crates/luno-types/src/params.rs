//! Request parameter bags
//!
//! Every Luno endpoint takes a flat set of form fields. [`Params`] keeps them
//! in insertion order and serializes to `application/x-www-form-urlencoded`,
//! used both for GET query strings and for POST bodies.

use rust_decimal::Decimal;
use std::fmt;

/// A single parameter value: one scalar or a list of scalars
///
/// Lists serialize as repeated keys (`asset=XBT&asset=ETH`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// One value
    Single(String),
    /// Several values under the same key
    List(Vec<String>),
}

impl ParamValue {
    /// Values in serialization order
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{}", value),
            Self::List(values) => write!(f, "{}", values.join(",")),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Single(value.normalize().to_string())
    }
}

macro_rules! impl_display_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

impl_display_param!(bool, i32, i64, u32, u64, usize, f64);

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        let flat = values
            .into_iter()
            .flat_map(|value| match value.into() {
                Self::Single(value) => vec![value],
                Self::List(values) => values,
            })
            .collect();
        Self::List(flat)
    }
}

/// Ordered, flat key/value parameter bag
///
/// Setting an existing key replaces its value in place, so defaults keep
/// their position when a caller overrides them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Params::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a parameter, replacing any existing value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Overlay `options` on top of these parameters
    pub fn merge(mut self, options: Option<Params>) -> Self {
        if let Some(options) = options {
            for (key, value) in options.entries {
                self.set(key, value);
            }
        }
        self
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Serialize as `application/x-www-form-urlencoded`
    ///
    /// An empty bag encodes to an empty string. Spaces encode as `+`, which
    /// Luno decodes the same as `%20`.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .flat_map(|(key, value)| {
                value
                    .values()
                    .iter()
                    .map(move |item| (key.as_str(), item.as_str()))
            })
            .collect();

        serde_urlencoded::to_string(pairs)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
