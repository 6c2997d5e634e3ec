//! Data model for option schemas, parsed values and token traces.
//!
//! All types serialize with [`serde`] so a schema can be loaded from a JSON or
//! YAML configuration file and a [`ParseResult`] prints as
//! `{"values": ..., "positionals": ..., "tokens": ...}` with camelCase token
//! fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared type of an option.
///
/// # Examples
///
/// ```
/// use parse_args_core::OptionType;
///
/// let ty: OptionType = serde_json::from_str("\"string\"").unwrap();
/// assert_eq!(ty, OptionType::String);
/// assert_eq!(OptionType::Boolean.as_str(), "boolean");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Flag with no argument; stores `true` when present.
    Boolean,
    /// Option taking a string argument, inline or from the next argument.
    String,
}

impl OptionType {
    /// Returns the schema spelling of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }
}

/// A resolved option value.
///
/// Values are stored based on what was supplied rather than on the declared
/// type: in non-strict mode `--flag=x` for a boolean option stores the string
/// `"x"`. Options declared `multiple` always store a [`Multiple`] list.
///
/// [`Multiple`]: OptionValue::Multiple
///
/// # Examples
///
/// ```
/// use parse_args_core::OptionValue;
///
/// let v = OptionValue::from(vec!["a", "b"]);
/// assert_eq!(serde_json::to_string(&v).unwrap(), r#"["a","b"]"#);
/// assert_eq!(OptionValue::from(true).as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    String(String),
    Multiple(Vec<OptionValue>),
}

impl OptionValue {
    /// Returns the boolean if this is a [`Bool`](OptionValue::Bool).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text if this is a [`String`](OptionValue::String).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Multiple`](OptionValue::Multiple).
    pub fn as_slice(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Multiple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(OptionValue::from).collect())
    }
}

impl From<Vec<bool>> for OptionValue {
    fn from(values: Vec<bool>) -> Self {
        Self::Multiple(values.into_iter().map(OptionValue::from).collect())
    }
}

impl From<Vec<OptionValue>> for OptionValue {
    fn from(values: Vec<OptionValue>) -> Self {
        Self::Multiple(values)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Declaration of a single long option.
///
/// Use [`boolean`](OptionSpec::boolean) or [`string`](OptionSpec::string),
/// then chain [`with_short`](OptionSpec::with_short),
/// [`allow_multiple`](OptionSpec::allow_multiple) and
/// [`with_default`](OptionSpec::with_default).
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::string().with_short("o").allow_multiple();
/// assert_eq!(spec.option_type, OptionType::String);
/// assert_eq!(spec.short.as_deref(), Some("o"));
/// assert!(spec.multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Declared type (`"boolean"` or `"string"`).
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Single-character alias, used as `-c`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Collect every occurrence into a list instead of keeping the last.
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiple: bool,
    /// Value used when the option does not appear in the arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
}

impl OptionSpec {
    /// Creates a spec of the given type with no alias, single-valued, no default.
    pub fn new(option_type: OptionType) -> Self {
        Self {
            option_type,
            short: None,
            multiple: false,
            default: None,
        }
    }

    /// Creates a boolean option.
    pub fn boolean() -> Self {
        Self::new(OptionType::Boolean)
    }

    /// Creates a string option.
    pub fn string() -> Self {
        Self::new(OptionType::String)
    }

    /// Sets the short alias.
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    /// Marks as collecting multiple occurrences.
    pub fn allow_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Ordered mapping from long option name to [`OptionSpec`].
///
/// Only the entries inserted by the caller exist; lookups never fall back to
/// any shared or inherited table. Iteration follows insertion order, which
/// also decides which entry wins when two options declare the same short
/// alias (the first one).
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionSpec, OptionsSchema};
///
/// let schema = OptionsSchema::new()
///     .with_option("verbose", OptionSpec::boolean().with_short("v"))
///     .with_option("output", OptionSpec::string().with_short("o"));
///
/// assert_eq!(schema.find_long_for_short("o"), Some("output"));
/// assert!(schema.get("toString").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsSchema {
    options: IndexMap<String, OptionSpec>,
}

impl OptionsSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, builder style.
    pub fn with_option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Adds or replaces an option.
    pub fn insert(&mut self, name: impl Into<String>, spec: OptionSpec) -> Option<OptionSpec> {
        self.options.insert(name.into(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Declared type of `name`, if declared.
    pub fn option_type(&self, name: &str) -> Option<OptionType> {
        self.get(name).map(|spec| spec.option_type)
    }

    /// Returns `true` when `name` is declared with type `string`.
    pub fn is_string(&self, name: &str) -> bool {
        self.option_type(name) == Some(OptionType::String)
    }

    /// Returns `true` when `name` is declared `multiple`.
    pub fn is_multiple(&self, name: &str) -> bool {
        self.get(name).is_some_and(|spec| spec.multiple)
    }

    /// Finds the first declared option whose alias is `short`.
    pub fn find_long_for_short(&self, short: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(_, spec)| spec.short.as_deref() == Some(short))
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.options.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, OptionSpec)> for OptionsSchema {
    fn from_iter<I: IntoIterator<Item = (N, OptionSpec)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(name, spec)| (name.into(), spec))
                .collect(),
        }
    }
}

/// Resolved option values keyed by long option name.
///
/// A plain owned map: a name that was neither declared with a default nor
/// supplied on the command line reads as absent, whatever it is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    values: IndexMap<String, OptionValue>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Stores `value`, replacing any previous value for `name`.
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    /// Appends `value` to the list stored under `name`, creating the list on
    /// first use. A non-list value already stored is replaced by a new list.
    pub fn append(&mut self, name: impl Into<String>, value: OptionValue) {
        let slot = self
            .values
            .entry(name.into())
            .or_insert_with(|| OptionValue::Multiple(Vec::new()));
        match slot {
            OptionValue::Multiple(items) => items.push(value),
            other => *other = OptionValue::Multiple(vec![value]),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Into<String>, V: Into<OptionValue>> FromIterator<(N, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// One classified piece of the input.
///
/// `index` is the position in the original argument list where the token's
/// raw text began; tokens expanded from one short-option group share it.
///
/// # Examples
///
/// ```
/// use parse_args_core::Token;
///
/// let token = Token::OptionTerminator { index: 2 };
/// assert_eq!(
///     serde_json::to_string(&token).unwrap(),
///     r#"{"kind":"option-terminator","index":2}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Token {
    /// An option occurrence, with its value when one was supplied.
    #[serde(rename_all = "camelCase")]
    Option {
        name: String,
        raw_name: String,
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inline_value: Option<bool>,
    },
    /// A positional argument.
    Positional { index: usize, value: String },
    /// The literal `--`.
    OptionTerminator { index: usize },
}

impl Token {
    pub fn index(&self) -> usize {
        match self {
            Self::Option { index, .. }
            | Self::Positional { index, .. }
            | Self::OptionTerminator { index } => *index,
        }
    }
}

/// Outcome of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Option values, including seeded defaults.
    pub values: Values,
    /// Positional arguments in encounter order.
    pub positionals: Vec<String>,
    /// Token trace, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}
