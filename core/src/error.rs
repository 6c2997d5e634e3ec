//! Error taxonomy shared by schema validation and argument parsing.
//!
//! Every failure raised by the engine is one of the five variants of
//! [`ParseArgsError`]. Schema problems carry the dotted path of the offending
//! field (for example `options.foo.default[1]`); argument problems carry the
//! raw text that triggered them.

use thiserror::Error;

/// Errors raised while validating a schema or parsing arguments.
///
/// # Examples
///
/// ```
/// use parse_args_core::ParseArgsError;
///
/// let err = ParseArgsError::UnexpectedPositional { value: "file.txt".into() };
/// assert_eq!(err.code(), "ERR_PARSE_ARGS_UNEXPECTED_POSITIONAL");
/// assert_eq!(
///     err.to_string(),
///     "Unexpected argument 'file.txt'. This command does not take positional arguments"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseArgsError {
    /// A schema or request field has the wrong shape.
    #[error("The \"{path}\" {} must be {expected}. Received {received}", subject(.path))]
    InvalidArgType {
        path: String,
        expected: String,
        received: String,
    },

    /// A structurally valid field holds a disallowed value.
    #[error("The {} '{path}' {reason}. Received {value}", subject(.path))]
    InvalidArgValue {
        path: String,
        value: String,
        reason: String,
    },

    /// Strict mode: the option is not declared in the schema.
    #[error("Unknown option '{option}'{}", dash_dash_hint(.option, .allow_positionals))]
    UnknownOption {
        option: String,
        allow_positionals: bool,
    },

    /// A positional argument was found while positionals are disallowed.
    #[error("Unexpected argument '{value}'. This command does not take positional arguments")]
    UnexpectedPositional { value: String },

    /// Boolean/string usage mismatch, or a suspect out-of-line value.
    #[error("{message}")]
    InvalidOptionValue { message: String },
}

impl ParseArgsError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgType { .. } => "ERR_INVALID_ARG_TYPE",
            Self::InvalidArgValue { .. } => "ERR_INVALID_ARG_VALUE",
            Self::UnknownOption { .. } => "ERR_PARSE_ARGS_UNKNOWN_OPTION",
            Self::UnexpectedPositional { .. } => "ERR_PARSE_ARGS_UNEXPECTED_POSITIONAL",
            Self::InvalidOptionValue { .. } => "ERR_PARSE_ARGS_INVALID_OPTION_VALUE",
        }
    }

    /// Dotted path of the offending field, for schema and request errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidArgType { path, .. } | Self::InvalidArgValue { path, .. } => {
                Some(path.as_str())
            }
            _ => None,
        }
    }

    /// Builds an [`InvalidArgType`](Self::InvalidArgType) error.
    pub fn invalid_arg_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
    ) -> Self {
        Self::InvalidArgType {
            path: path.into(),
            expected: expected.into(),
            received: received.into(),
        }
    }
}

/// Nested paths name a property, top-level ones an argument.
fn subject(path: &str) -> &'static str {
    if path.contains('.') {
        "property"
    } else {
        "argument"
    }
}

fn dash_dash_hint(option: &str, allow_positionals: &bool) -> String {
    if !*allow_positionals {
        return String::new();
    }
    let quoted = serde_json::to_string(option).unwrap_or_else(|_| format!("\"{option}\""));
    format!(
        ". To specify a positional argument starting with a '-', place it at the end of the command after '--', as in '-- {quoted}"
    )
}

/// Convenience alias for results with [`ParseArgsError`].
pub type Result<T> = std::result::Result<T, ParseArgsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arg_type_names_property() {
        let err = ParseArgsError::invalid_arg_type(
            "options.foo.type",
            "one of 'string' or 'boolean'",
            "type boolean (true)",
        );
        assert_eq!(
            err.to_string(),
            "The \"options.foo.type\" property must be one of 'string' or 'boolean'. Received type boolean (true)"
        );
        assert_eq!(err.path(), Some("options.foo.type"));
    }

    #[test]
    fn test_invalid_arg_type_names_top_level_argument() {
        let err = ParseArgsError::invalid_arg_type("options", "of type object", "type string ('x')");
        assert!(err.to_string().starts_with("The \"options\" argument"));
    }

    #[test]
    fn test_unknown_option_hint_only_when_positionals_allowed() {
        let strict = ParseArgsError::UnknownOption {
            option: "--foo".into(),
            allow_positionals: false,
        };
        assert_eq!(strict.to_string(), "Unknown option '--foo'");

        let relaxed = ParseArgsError::UnknownOption {
            option: "--foo".into(),
            allow_positionals: true,
        };
        assert_eq!(
            relaxed.to_string(),
            "Unknown option '--foo'. To specify a positional argument starting with a '-', place it at the end of the command after '--', as in '-- \"--foo\""
        );
    }

    #[test]
    fn test_codes_are_stable() {
        let err = ParseArgsError::InvalidArgValue {
            path: "options.foo.short".into(),
            value: "'ab'".into(),
            reason: "must be a single character".into(),
        };
        assert_eq!(err.code(), "ERR_INVALID_ARG_VALUE");
        assert_eq!(
            err.to_string(),
            "The property 'options.foo.short' must be a single character. Received 'ab'"
        );
    }
}
