//! Strict-mode checks applied to each option token.

use parse_args_core::{OptionType, OptionsSchema, ParseArgsError, Result};

use crate::classify::is_option_like_value;

/// Prefix that negates a boolean option when negation is enabled.
pub(crate) const NEGATION_PREFIX: &str = "no-";

/// Settings the strict checks depend on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrictRules<'a> {
    pub(crate) schema: &'a OptionsSchema,
    pub(crate) allow_positionals: bool,
    pub(crate) allow_negative: bool,
}

impl StrictRules<'_> {
    /// Rejects undeclared options and boolean/string usage mismatches.
    pub(crate) fn check_usage(&self, name: &str, raw_name: &str, value: Option<&str>) -> Result<()> {
        let mut declared = name;
        if !self.schema.contains(declared) {
            let negated = name
                .strip_prefix(NEGATION_PREFIX)
                .filter(|_| self.allow_negative)
                .filter(|base| self.schema.option_type(base) == Some(OptionType::Boolean));
            match negated {
                Some(base) => declared = base,
                None => {
                    return Err(ParseArgsError::UnknownOption {
                        option: raw_name.to_string(),
                        allow_positionals: self.allow_positionals,
                    });
                }
            }
        }

        let Some(spec) = self.schema.get(declared) else {
            return Ok(());
        };
        let short_and_long = match &spec.short {
            Some(short) => format!("-{short}, --{declared}"),
            None => format!("--{declared}"),
        };
        match (spec.option_type, value) {
            (OptionType::String, None) => Err(ParseArgsError::InvalidOptionValue {
                message: format!("Option '{short_and_long} <value>' argument missing"),
            }),
            (OptionType::Boolean, Some(_)) => Err(ParseArgsError::InvalidOptionValue {
                message: format!("Option '{short_and_long}' does not take an argument"),
            }),
            _ => Ok(()),
        }
    }
}

/// Rejects an out-of-line value that looks like another option.
///
/// Inline values (`--with=-x`, `-w-x`) are the escape hatch and always pass.
pub(crate) fn check_option_like_value(
    name: &str,
    raw_name: &str,
    value: Option<&str>,
    inline_value: Option<bool>,
) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if inline_value == Some(true) || !is_option_like_value(value) {
        return Ok(());
    }

    let example = if raw_name.starts_with("--") {
        format!("'{raw_name}=-XYZ'")
    } else {
        format!("'--{name}=-XYZ' or '{raw_name}-XYZ'")
    };
    Err(ParseArgsError::InvalidOptionValue {
        message: format!(
            "Option '{raw_name}' argument is ambiguous.\nDid you forget to specify the option argument for '{raw_name}'?\nTo specify an option argument starting with a dash use {example}."
        ),
    })
}
