//! Option values and their rendering as Drush flags.

use std::fmt;

/// Option name the facade always forces to `json`.
pub const FORMAT_OPTION: &str = "format";

/// Make a Drush command or option name usable as a Rust-style identifier.
///
/// `pm-info` -> `pm_info`, `no-cache` -> `no_cache`.
pub fn normalize_identifier(name: &str) -> String {
    name.replace('-', "_")
}

/// Value of one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// `true` renders a bare `--name`; `false` renders nothing.
    Bool(bool),
    /// Renders `--name=value`.
    Value(String),
    /// Renders `--name=a,b,c`.
    List(Vec<String>),
}

impl OptionValue {
    /// The flag token for `name`, or `None` when nothing is emitted.
    pub fn render(&self, name: &str) -> Option<String> {
        match self {
            OptionValue::Bool(true) => Some(format!("--{name}")),
            OptionValue::Bool(false) => None,
            OptionValue::Value(v) => Some(format!("--{name}={v}")),
            OptionValue::List(items) => Some(format!("--{name}={}", items.join(","))),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Value(v) => f.write_str(v),
            OptionValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Value(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Value(s)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

impl From<&[&str]> for OptionValue {
    fn from(items: &[&str]) -> Self {
        OptionValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

macro_rules! option_value_from_display {
    ($($t:ty),*) => {
        $(impl From<$t> for OptionValue {
            fn from(v: $t) -> Self {
                OptionValue::Value(v.to_string())
            }
        })*
    };
}

option_value_from_display!(i32, i64, u32, u64, usize, f64);

/// Ordered option mapping. Setting an existing name replaces its value in
/// place, so the caller's order is what ends up on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    entries: Vec<(String, OptionValue)>,
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style `--name`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.with(name, true)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flag tokens in order, skipping the forced `format` option and any
    /// `false` booleans.
    pub fn to_flags(&self) -> Vec<String> {
        self.iter()
            .filter(|(name, _)| *name != FORMAT_OPTION)
            .filter_map(|(name, value)| value.render(name))
            .collect()
    }

    /// Rebuild options from flag tokens produced by [`Self::to_flags`].
    ///
    /// Tokens that are not `--` flags are ignored. Values come back as
    /// [`OptionValue::Value`]; list values come back joined.
    pub fn from_flags<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut opts = CommandOptions::new();
        for token in tokens {
            let Some(flag) = token.as_ref().strip_prefix("--") else {
                continue;
            };
            match flag.split_once('=') {
                Some((name, value)) => opts.set(name, value),
                None => opts.set(flag, true),
            }
        }
        opts
    }
}

impl<K, V> FromIterator<(K, V)> for CommandOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut opts = CommandOptions::new();
        for (k, v) in iter {
            opts.set(k, v);
        }
        opts
    }
}
