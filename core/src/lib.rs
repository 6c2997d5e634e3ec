//! Core types and schema validation for the `parse-args` engine.
//!
//! This crate defines the data model shared by the engine and its callers:
//!
//! - [`OptionSpec`] / [`OptionsSchema`]: the declarative option schema
//!   (type, short alias, multiplicity, default).
//! - [`OptionValue`] / [`Values`]: resolved option values keyed by long name.
//! - [`Token`]: one classified piece of the raw argument list.
//! - [`ParseResult`]: values, positionals and the optional token trace.
//! - [`ParseArgsError`]: the error taxonomy for schema and argument failures.
//!
//! Validation ([`validate_options`], [`OptionsSchema::from_value`]) rejects
//! malformed schemas before any argument is read.
//!
//! # Example
//!
//! ```
//! use parse_args_core::*;
//!
//! let schema = OptionsSchema::new()
//!     .with_option("verbose", OptionSpec::boolean().with_short("v"))
//!     .with_option("include", OptionSpec::string().with_short("I").allow_multiple());
//!
//! assert_eq!(schema.find_long_for_short("I"), Some("include"));
//! assert!(schema.is_multiple("include"));
//! assert!(validate_options(&schema).is_ok());
//! ```

mod error;
mod types;
mod validate;

pub use error::{ParseArgsError, Result};
pub use types::*;
pub use validate::{bool_field, describe_json, validate_options};
