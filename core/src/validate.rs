//! Option schema validation.
//!
//! Runs before any argument is read, so a malformed schema always fails ahead
//! of argument errors. Two entry points share the same rules:
//!
//! - [`validate_options`] checks a typed [`OptionsSchema`] (aliases and
//!   defaults; the type is already well-formed there).
//! - [`OptionsSchema::from_value`] checks a loosely typed JSON value field by
//!   field and builds the typed schema, reporting the dotted path of the first
//!   offending field.
//!
//! # Examples
//!
//! ```
//! use parse_args_core::*;
//!
//! let schema = OptionsSchema::new().with_option("foo", OptionSpec::boolean().with_short("f"));
//! assert!(validate_options(&schema).is_ok());
//!
//! // Invalid: alias longer than one character
//! let bad = OptionsSchema::new().with_option("foo", OptionSpec::boolean().with_short("ff"));
//! let err = validate_options(&bad).unwrap_err();
//! assert_eq!(err.path(), Some("options.foo.short"));
//! ```

use serde_json::{Map, Value};

use crate::error::{ParseArgsError, Result};
use crate::{OptionSpec, OptionType, OptionValue, OptionsSchema};

const EXPECTED_TYPE: &str = "one of 'string' or 'boolean'";

/// Validates a typed schema.
///
/// Checks that every alias is exactly one UTF-16 code unit and that every
/// default matches its option's type and multiplicity.
pub fn validate_options(schema: &OptionsSchema) -> Result<()> {
    for (name, spec) in schema.iter() {
        if let Some(short) = &spec.short {
            check_short(name, short)?;
        }
        if let Some(default) = &spec.default {
            check_default(
                &format!("options.{name}.default"),
                spec.option_type,
                spec.multiple,
                default,
            )?;
        }
    }
    Ok(())
}

impl OptionsSchema {
    /// Builds a schema from a loosely typed value, validating every field.
    ///
    /// `null` is treated as an empty schema. Only the object's own keys are
    /// read; unrecognised keys inside an option entry are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgType`](ParseArgsError::InvalidArgType) or
    /// [`InvalidArgValue`](ParseArgsError::InvalidArgValue) naming the first
    /// offending path.
    ///
    /// # Examples
    ///
    /// ```
    /// use parse_args_core::OptionsSchema;
    /// use serde_json::json;
    ///
    /// let err = OptionsSchema::from_value(&json!({
    ///     "foo": {"type": "string", "multiple": true, "default": ["a", 1]}
    /// }))
    /// .unwrap_err();
    /// assert_eq!(err.code(), "ERR_INVALID_ARG_TYPE");
    /// assert_eq!(err.path(), Some("options.foo.default[1]"));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let entries = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(entries) => entries,
            other => {
                return Err(ParseArgsError::invalid_arg_type(
                    "options",
                    "of type object",
                    describe_json(other),
                ));
            }
        };

        let mut schema = Self::new();
        for (name, entry) in entries {
            schema.insert(name.clone(), spec_from_value(name, entry)?);
        }
        Ok(schema)
    }
}

fn spec_from_value(name: &str, entry: &Value) -> Result<OptionSpec> {
    let path = format!("options.{name}");
    let Value::Object(fields) = entry else {
        return Err(ParseArgsError::invalid_arg_type(
            path,
            "of type object",
            describe_json(entry),
        ));
    };

    let option_type = match fields.get("type") {
        Some(Value::String(ty)) if ty == "boolean" => OptionType::Boolean,
        Some(Value::String(ty)) if ty == "string" => OptionType::String,
        other => {
            return Err(ParseArgsError::invalid_arg_type(
                format!("{path}.type"),
                EXPECTED_TYPE,
                describe_field(other),
            ));
        }
    };
    let mut spec = OptionSpec::new(option_type);

    if let Some(short) = fields.get("short") {
        let Value::String(short) = short else {
            return Err(ParseArgsError::invalid_arg_type(
                format!("{path}.short"),
                "of type string",
                describe_json(short),
            ));
        };
        check_short(name, short)?;
        spec.short = Some(short.clone());
    }

    if let Some(multiple) = fields.get("multiple") {
        let Value::Bool(multiple) = multiple else {
            return Err(ParseArgsError::invalid_arg_type(
                format!("{path}.multiple"),
                "of type boolean",
                describe_json(multiple),
            ));
        };
        spec.multiple = *multiple;
    }

    if let Some(default) = fields.get("default") {
        spec.default = Some(default_from_value(
            &format!("{path}.default"),
            option_type,
            spec.multiple,
            default,
        )?);
    }

    Ok(spec)
}

fn check_short(name: &str, short: &str) -> Result<()> {
    if short.encode_utf16().count() != 1 {
        return Err(ParseArgsError::InvalidArgValue {
            path: format!("options.{name}.short"),
            value: format!("'{short}'"),
            reason: "must be a single character".to_string(),
        });
    }
    Ok(())
}

fn check_default(
    path: &str,
    option_type: OptionType,
    multiple: bool,
    value: &OptionValue,
) -> Result<()> {
    if !multiple {
        return check_scalar(path, option_type, value);
    }
    let Some(items) = value.as_slice() else {
        return Err(ParseArgsError::invalid_arg_type(
            path,
            "an instance of Array",
            describe_value(value),
        ));
    };
    for (i, item) in items.iter().enumerate() {
        check_scalar(&format!("{path}[{i}]"), option_type, item)?;
    }
    Ok(())
}

fn check_scalar(path: &str, option_type: OptionType, value: &OptionValue) -> Result<()> {
    let matches = matches!(
        (option_type, value),
        (OptionType::Boolean, OptionValue::Bool(_)) | (OptionType::String, OptionValue::String(_))
    );
    if matches {
        Ok(())
    } else {
        Err(ParseArgsError::invalid_arg_type(
            path,
            format!("of type {}", option_type.as_str()),
            describe_value(value),
        ))
    }
}

fn default_from_value(
    path: &str,
    option_type: OptionType,
    multiple: bool,
    value: &Value,
) -> Result<OptionValue> {
    if !multiple {
        return scalar_from_value(path, option_type, value);
    }
    let Value::Array(items) = value else {
        return Err(ParseArgsError::invalid_arg_type(
            path,
            "an instance of Array",
            describe_json(value),
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| scalar_from_value(&format!("{path}[{i}]"), option_type, item))
        .collect::<Result<Vec<_>>>()
        .map(OptionValue::Multiple)
}

fn scalar_from_value(path: &str, option_type: OptionType, value: &Value) -> Result<OptionValue> {
    match (option_type, value) {
        (OptionType::Boolean, Value::Bool(b)) => Ok(OptionValue::Bool(*b)),
        (OptionType::String, Value::String(s)) => Ok(OptionValue::String(s.clone())),
        _ => Err(ParseArgsError::invalid_arg_type(
            path,
            format!("of type {}", option_type.as_str()),
            describe_json(value),
        )),
    }
}

fn describe_field(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), describe_json)
}

/// Renders a received JSON value for an error message.
pub fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("type boolean ({b})"),
        Value::Number(n) => format!("type number ({n})"),
        Value::String(s) => format!("type string ('{s}')"),
        Value::Array(_) => "an instance of Array".to_string(),
        Value::Object(_) => "an instance of Object".to_string(),
    }
}

fn describe_value(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(b) => format!("type boolean ({b})"),
        OptionValue::String(s) => format!("type string ('{s}')"),
        OptionValue::Multiple(_) => "an instance of Array".to_string(),
    }
}

/// Reads an optional boolean request field; `null` counts as absent.
pub fn bool_field(fields: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(ParseArgsError::invalid_arg_type(
            key,
            "of type boolean",
            describe_json(other),
        )),
    }
}
