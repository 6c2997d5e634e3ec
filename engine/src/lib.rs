//! Schema-driven command line argument parsing.
//!
//! Given a list of raw argument strings and an [`OptionsSchema`], [`parse_args`]
//! returns the resolved option values, the positional arguments and,
//! optionally, a token-level trace of how each argument was classified.
//!
//! The dialect is fixed:
//!
//! - `--name`, `--name=value`; extra leading dashes stay in the name
//!   (`---x` is the option `-x`).
//! - `-n`, `-nVALUE`, and groups of short flags (`-abc`), where a string
//!   option inside a group takes the rest of the argument as its value.
//! - A string option given without an inline value takes the next argument,
//!   whatever it looks like. In strict mode such a value is rejected when it
//!   looks like an option, unless it is a lone `-`.
//! - `--` ends option parsing; everything after it is positional.
//!
//! Arguments are examined as UTF-16 code units, so a character outside the
//! Basic Multilingual Plane inside a short-option group yields two options.
//!
//! # Architecture
//!
//! The schema is validated first, then [`tokenize`] classifies every
//! argument, then the resolver walks the tokens, applying strict checks per
//! token, and finally seeds declared defaults.
//!
//! # Example
//!
//! ```
//! use parse_args::{ParseConfig, parse_args};
//! use parse_args_core::{OptionSpec, OptionValue, OptionsSchema};
//!
//! let options = OptionsSchema::new()
//!     .with_option("force", OptionSpec::boolean().with_short("f"))
//!     .with_option("name", OptionSpec::string().with_short("n"));
//!
//! let result = parse_args(&ParseConfig::new(["-fn", "demo"]).with_options(options)).unwrap();
//! assert_eq!(result.values.get("force"), Some(&OptionValue::Bool(true)));
//! assert_eq!(result.values.get("name"), Some(&OptionValue::from("demo")));
//! assert!(result.tokens.is_none());
//! ```

mod classify;
mod config;
mod resolve;
mod strict;
mod tokenizer;

use parse_args_core::{Result, validate_options};
use tracing::debug;

use crate::resolve::Resolver;

pub use config::{ConfigError, ParseConfig};
pub use parse_args_core::{
    OptionSpec, OptionType, OptionValue, OptionsSchema, ParseArgsError, ParseResult, Token,
    Values,
};
pub use tokenizer::tokenize;

/// Parses the configured arguments against the configured schema.
///
/// The schema is validated in full before any argument is read, so schema
/// errors take precedence over argument errors.
///
/// # Errors
///
/// - [`ParseArgsError::InvalidArgType`] / [`ParseArgsError::InvalidArgValue`]
///   for a malformed schema.
/// - [`ParseArgsError::UnknownOption`], [`ParseArgsError::InvalidOptionValue`]
///   in strict mode.
/// - [`ParseArgsError::UnexpectedPositional`] when positionals are not
///   allowed.
///
/// # Examples
///
/// ```
/// use parse_args::{ParseConfig, parse_args};
/// use parse_args_core::{OptionSpec, OptionsSchema};
///
/// let options = OptionsSchema::new().with_option("with", OptionSpec::string());
///
/// let err = parse_args(&ParseConfig::new(["--with", "--foo"]).with_options(options.clone()))
///     .unwrap_err();
/// assert_eq!(err.code(), "ERR_PARSE_ARGS_INVALID_OPTION_VALUE");
///
/// let ok = parse_args(&ParseConfig::new(["--with", "-"]).with_options(options)).unwrap();
/// assert_eq!(ok.values.get("with").and_then(|v| v.as_str()), Some("-"));
/// ```
pub fn parse_args(config: &ParseConfig) -> Result<ParseResult> {
    validate_options(&config.options)?;

    let args = config.resolved_args();
    let tokens = tokenize(&args, &config.options);

    let resolver = Resolver {
        schema: &config.options,
        strict: config.is_strict(),
        allow_positionals: config.positionals_allowed(),
        allow_negative: config.negation_allowed(),
    };
    let (values, positionals) = resolver.resolve(&tokens)?;

    debug!(
        options = config.options.len(),
        values = values.len(),
        positionals = positionals.len(),
        strict = resolver.strict,
        "Parsed arguments"
    );

    Ok(ParseResult {
        values,
        positionals,
        tokens: config.wants_tokens().then_some(tokens),
    })
}
