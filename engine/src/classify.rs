//! Shape classification of raw arguments.
//!
//! The tokenizer and the strict validator both need to recognise
//! option-shaped strings; every predicate lives here so the two never
//! disagree. Arguments are inspected as UTF-16 code units: lengths and
//! positions are counted in code units, so a character outside the Basic
//! Multilingual Plane occupies two positions.

use parse_args_core::OptionsSchema;

pub(crate) const DASH: u16 = b'-' as u16;
pub(crate) const EQUALS: u16 = b'=' as u16;

/// Encodes an argument as UTF-16 code units.
pub(crate) fn units(arg: &str) -> Vec<u16> {
    arg.encode_utf16().collect()
}

/// Decodes code units back to text. A lone surrogate becomes U+FFFD.
pub(crate) fn text(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

fn is_surrogate(unit: u16) -> bool {
    (0xD800..=0xDFFF).contains(&unit)
}

/// Maps a short option character to its long name, or to itself when no
/// schema entry declares it as an alias.
pub(crate) fn long_for_short(schema: &OptionsSchema, unit: u16) -> String {
    let short = text(&[unit]);
    if is_surrogate(unit) {
        // Half of a surrogate pair can never equal a declared alias.
        return short;
    }
    schema
        .find_long_for_short(&short)
        .map_or(short, str::to_string)
}

fn starts_with_double_dash(arg: &[u16]) -> bool {
    arg.len() >= 2 && arg[0] == DASH && arg[1] == DASH
}

/// `-f`
pub(crate) fn is_lone_short_option(arg: &[u16]) -> bool {
    arg.len() == 2 && arg[0] == DASH && arg[1] != DASH
}

/// `--foo`, with no `=` from the fourth code unit onwards.
pub(crate) fn is_lone_long_option(arg: &[u16]) -> bool {
    arg.len() > 2 && starts_with_double_dash(arg) && !arg[3..].contains(&EQUALS)
}

/// `--foo=bar`
pub(crate) fn is_long_option_and_value(arg: &[u16]) -> bool {
    arg.len() > 2 && starts_with_double_dash(arg) && arg[3..].contains(&EQUALS)
}

fn is_short_form(arg: &[u16]) -> bool {
    arg.len() > 2 && arg[0] == DASH && arg[1] != DASH
}

/// `-abc` where the first short is not a string option.
pub(crate) fn is_short_option_group(arg: &[u16], schema: &OptionsSchema) -> bool {
    is_short_form(arg) && !schema.is_string(&long_for_short(schema, arg[1]))
}

/// `-fVALUE` where `f` is a string option.
pub(crate) fn is_short_option_and_value(arg: &[u16], schema: &OptionsSchema) -> bool {
    is_short_form(arg) && schema.is_string(&long_for_short(schema, arg[1]))
}

/// An out-of-line value shaped like an option (`--`, `--foo`, `-f`, `-1`).
///
/// A lone `-` is ordinary text.
pub(crate) fn is_option_like_value(value: &str) -> bool {
    value.len() > 1 && value.starts_with('-')
}

#[cfg(test)]
mod tests {
    use parse_args_core::OptionSpec;

    use super::*;

    fn schema() -> OptionsSchema {
        OptionsSchema::new()
            .with_option("file", OptionSpec::string().with_short("f"))
            .with_option("verbose", OptionSpec::boolean().with_short("v"))
    }

    #[test]
    fn test_lone_short_option() {
        assert!(is_lone_short_option(&units("-f")));
        assert!(!is_lone_short_option(&units("--")));
        assert!(!is_lone_short_option(&units("-")));
        assert!(!is_lone_short_option(&units("-fv")));
    }

    #[test]
    fn test_astral_character_is_two_code_units() {
        let arg = units("-🐶");
        assert_eq!(arg.len(), 3);
        assert!(!is_lone_short_option(&arg));
        assert!(is_short_option_group(&arg, &schema()));
    }

    #[test]
    fn test_long_option_equals_search_starts_after_name_start() {
        assert!(is_lone_long_option(&units("--foo")));
        assert!(is_lone_long_option(&units("--=")));
        assert!(is_lone_long_option(&units("--=foo")));
        assert!(is_long_option_and_value(&units("--foo=bar")));
        assert!(is_long_option_and_value(&units("--f=")));
        assert!(!is_lone_long_option(&units("--")));
    }

    #[test]
    fn test_group_versus_short_and_value() {
        let schema = schema();
        assert!(is_short_option_group(&units("-vf"), &schema));
        assert!(!is_short_option_group(&units("-fv"), &schema));
        assert!(is_short_option_and_value(&units("-fv"), &schema));
        assert!(is_short_option_group(&units("-xy"), &schema));
    }

    #[test]
    fn test_option_like_values() {
        assert!(is_option_like_value("--"));
        assert!(is_option_like_value("--foo"));
        assert!(is_option_like_value("-f"));
        assert!(is_option_like_value("-1"));
        assert!(!is_option_like_value("-"));
        assert!(!is_option_like_value("foo"));
        assert!(!is_option_like_value(""));
    }

    #[test]
    fn test_long_for_short_falls_back_to_identity() {
        let schema = schema();
        assert_eq!(long_for_short(&schema, u16::from(b'f')), "file");
        assert_eq!(long_for_short(&schema, u16::from(b'x')), "x");
        assert_eq!(long_for_short(&schema, 0xD83D), "\u{FFFD}");
    }
}
