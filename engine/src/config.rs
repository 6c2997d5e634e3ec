//! Parse configuration.
//!
//! A [`ParseConfig`] bundles the raw arguments, the option schema and the
//! behaviour switches for one call to [`parse_args`](crate::parse_args). It
//! can be built in code or loaded from a JSON/YAML document with camelCase
//! keys (`allowPositionals`, `allowNegative`).
//!
//! # Example YAML
//!
//! ```yaml
//! strict: true
//! allowPositionals: true
//! tokens: false
//! options:
//!   verbose:
//!     type: boolean
//!     short: v
//!   include:
//!     type: string
//!     short: I
//!     multiple: true
//!     default: []
//! ```

use std::ffi::OsStr;
use std::path::Path;

use parse_args_core::{OptionsSchema, ParseArgsError, bool_field, describe_json};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Well-formed document with an invalid field.
    #[error(transparent)]
    Invalid(#[from] ParseArgsError),
}

/// Inputs for one parse.
///
/// Unset switches take the documented defaults: `strict` is `true`,
/// `allow_positionals` is `!strict`, `tokens` and `allow_negative` are
/// `false`. Unset `args` means the current process arguments minus the
/// program name; arguments that are not valid Unicode are decoded lossily.
///
/// # Examples
///
/// ```
/// use parse_args::{ParseConfig, parse_args};
/// use parse_args_core::{OptionSpec, OptionsSchema};
///
/// let config = ParseConfig::new(["-v", "file.txt"])
///     .with_options(OptionsSchema::new().with_option("verbose", OptionSpec::boolean().with_short("v")))
///     .with_allow_positionals(true);
///
/// let result = parse_args(&config).unwrap();
/// assert_eq!(result.positionals, vec!["file.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseConfig {
    pub args: Option<Vec<String>>,
    pub options: OptionsSchema,
    pub strict: Option<bool>,
    pub allow_positionals: Option<bool>,
    pub tokens: Option<bool>,
    pub allow_negative: Option<bool>,
}

impl ParseConfig {
    /// Creates a configuration for the given arguments with an empty schema.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: Some(args.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Creates a configuration that reads the process arguments.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Creates a configuration from platform strings, replacing invalid
    /// Unicode with U+FFFD.
    pub fn from_os_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::new(args.into_iter().map(|arg| lossy(arg.as_ref())))
    }

    pub fn with_options(mut self, options: OptionsSchema) -> Self {
        self.options = options;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    pub fn with_allow_positionals(mut self, allow: bool) -> Self {
        self.allow_positionals = Some(allow);
        self
    }

    pub fn with_tokens(mut self, tokens: bool) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_allow_negative(mut self, allow: bool) -> Self {
        self.allow_negative = Some(allow);
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(true)
    }

    pub fn positionals_allowed(&self) -> bool {
        self.allow_positionals.unwrap_or(!self.is_strict())
    }

    pub fn wants_tokens(&self) -> bool {
        self.tokens.unwrap_or(false)
    }

    pub fn negation_allowed(&self) -> bool {
        self.allow_negative.unwrap_or(false)
    }

    /// The arguments to parse: the configured ones, or the process arguments
    /// without the program name.
    pub fn resolved_args(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => std::env::args_os().skip(1).map(|arg| lossy(&arg)).collect(),
        }
    }

    /// Builds a configuration from a loosely typed value.
    ///
    /// Fields are checked in the order `args`, `strict`, `allowPositionals`,
    /// `tokens`, `allowNegative`, `options`; `null` counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgType`](ParseArgsError::InvalidArgType) or
    /// [`InvalidArgValue`](ParseArgsError::InvalidArgValue) for the first
    /// offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use parse_args::ParseConfig;
    /// use serde_json::json;
    ///
    /// let config = ParseConfig::from_value(&json!({"args": ["-f"], "strict": false})).unwrap();
    /// assert!(!config.is_strict());
    /// assert!(config.positionals_allowed());
    ///
    /// let err = ParseConfig::from_value(&json!({"args": "-f"})).unwrap_err();
    /// assert_eq!(err.path(), Some("args"));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, ParseArgsError> {
        let fields = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            other => {
                return Err(ParseArgsError::invalid_arg_type(
                    "config",
                    "of type object",
                    describe_json(other),
                ));
            }
        };

        let args = match fields.get("args") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::String(arg) => Ok(arg.clone()),
                        other => Err(ParseArgsError::invalid_arg_type(
                            format!("args[{i}]"),
                            "of type string",
                            describe_json(other),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(other) => {
                return Err(ParseArgsError::invalid_arg_type(
                    "args",
                    "an instance of Array",
                    describe_json(other),
                ));
            }
        };

        let strict = bool_field(fields, "strict")?;
        let allow_positionals = bool_field(fields, "allowPositionals")?;
        let tokens = bool_field(fields, "tokens")?;
        let allow_negative = bool_field(fields, "allowNegative")?;
        let options = OptionsSchema::from_value(fields.get("options").unwrap_or(&Value::Null))?;

        Ok(Self {
            args,
            options,
            strict,
            allow_positionals,
            tokens,
            allow_negative,
        })
    }

    /// Parses a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value)?)
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(raw)?;
        Ok(Self::from_value(&value)?)
    }

    /// Loads a configuration file; `.yaml`/`.yml` files are read as YAML,
    /// anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, a syntax
    /// error variant if it cannot be decoded, or [`ConfigError::Invalid`] if
    /// a field is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }
}

fn lossy(arg: &OsStr) -> String {
    arg.to_string_lossy().into_owned()
}
