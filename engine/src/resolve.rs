//! Token resolution: values, positionals and defaults.

use parse_args_core::{OptionValue, OptionsSchema, ParseArgsError, Result, Token, Values};

use crate::strict::{NEGATION_PREFIX, StrictRules, check_option_like_value};

/// Key that is never stored, whether supplied or declared with a default.
const RESERVED_KEY: &str = "__proto__";

/// How the token stream is resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolver<'a> {
    pub(crate) schema: &'a OptionsSchema,
    pub(crate) strict: bool,
    pub(crate) allow_positionals: bool,
    pub(crate) allow_negative: bool,
}

impl Resolver<'_> {
    /// Walks `tokens` in order, building values and positionals, then seeds
    /// declared defaults for options that did not appear.
    pub(crate) fn resolve(&self, tokens: &[Token]) -> Result<(Values, Vec<String>)> {
        let rules = StrictRules {
            schema: self.schema,
            allow_positionals: self.allow_positionals,
            allow_negative: self.allow_negative,
        };
        let mut values = Values::new();
        let mut positionals = Vec::new();

        for token in tokens {
            match token {
                Token::Option {
                    name,
                    raw_name,
                    value,
                    inline_value,
                    ..
                } => {
                    if self.strict {
                        rules.check_usage(name, raw_name, value.as_deref())?;
                        check_option_like_value(name, raw_name, value.as_deref(), *inline_value)?;
                    }
                    self.store_option(&mut values, name, value.as_deref());
                }
                Token::Positional { value, .. } => {
                    if !self.allow_positionals {
                        return Err(ParseArgsError::UnexpectedPositional {
                            value: value.clone(),
                        });
                    }
                    positionals.push(value.clone());
                }
                Token::OptionTerminator { .. } => {}
            }
        }

        self.apply_defaults(&mut values);
        Ok((values, positionals))
    }

    /// Stores one occurrence. The value is what was supplied (`true` when
    /// nothing was), not a coercion to the declared type.
    fn store_option(&self, values: &mut Values, name: &str, value: Option<&str>) {
        let (name, stored) = match (value, name.strip_prefix(NEGATION_PREFIX)) {
            (None, Some(base)) if self.allow_negative => (base, OptionValue::Bool(false)),
            (Some(value), _) => (name, OptionValue::from(value)),
            (None, _) => (name, OptionValue::Bool(true)),
        };
        if name == RESERVED_KEY {
            return;
        }
        if self.schema.is_multiple(name) {
            values.append(name, stored);
        } else {
            values.set(name, stored);
        }
    }

    fn apply_defaults(&self, values: &mut Values) {
        for (name, spec) in self.schema.iter() {
            let Some(default) = &spec.default else {
                continue;
            };
            if name != RESERVED_KEY && !values.contains_key(name) {
                values.set(name, default.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use parse_args_core::OptionSpec;

    use super::*;

    fn option(name: &str, value: Option<&str>) -> Token {
        Token::Option {
            name: name.into(),
            raw_name: format!("--{name}"),
            index: 0,
            value: value.map(String::from),
            inline_value: value.map(|_| true),
        }
    }

    fn lenient(schema: &OptionsSchema) -> Resolver<'_> {
        Resolver {
            schema,
            strict: false,
            allow_positionals: true,
            allow_negative: false,
        }
    }

    #[test]
    fn test_multiple_appends_in_order() {
        let schema = OptionsSchema::new().with_option("foo", OptionSpec::string().allow_multiple());
        let (values, _) = lenient(&schema)
            .resolve(&[option("foo", Some("a")), option("foo", Some("b"))])
            .unwrap();
        assert_eq!(values.get("foo"), Some(&OptionValue::from(vec!["a", "b"])));
    }

    #[test]
    fn test_last_write_wins_without_multiple() {
        let schema = OptionsSchema::new().with_option("foo", OptionSpec::string());
        let (values, _) = lenient(&schema)
            .resolve(&[option("foo", Some("a")), option("foo", Some("b"))])
            .unwrap();
        assert_eq!(values.get("foo"), Some(&OptionValue::from("b")));
    }

    #[test]
    fn test_defaults_do_not_override_supplied_values() {
        let schema = OptionsSchema::new()
            .with_option("a", OptionSpec::string().with_default("HELLO"))
            .with_option("b", OptionSpec::boolean().with_default(false));
        let (values, _) = lenient(&schema).resolve(&[option("b", None)]).unwrap();

        assert_eq!(values.get("a"), Some(&OptionValue::from("HELLO")));
        assert_eq!(values.get("b"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_reserved_key_is_never_stored() {
        let schema = OptionsSchema::new()
            .with_option("__proto__", OptionSpec::string().with_default("x"));
        let (values, _) = lenient(&schema)
            .resolve(&[option("__proto__", None)])
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_negation_stores_false_under_base_name() {
        let schema = OptionsSchema::new().with_option("color", OptionSpec::boolean());
        let resolver = Resolver {
            allow_negative: true,
            ..lenient(&schema)
        };
        let (values, _) = resolver.resolve(&[option("no-color", None)]).unwrap();
        assert_eq!(values.get("color"), Some(&OptionValue::Bool(false)));
        assert!(values.get("no-color").is_none());
    }

    #[test]
    fn test_positional_rejected_when_disallowed() {
        let schema = OptionsSchema::new();
        let resolver = Resolver {
            allow_positionals: false,
            ..lenient(&schema)
        };
        let err = resolver
            .resolve(&[
                Token::OptionTerminator { index: 0 },
                Token::Positional {
                    index: 1,
                    value: "x".into(),
                },
            ])
            .unwrap_err();
        assert_eq!(
            err,
            ParseArgsError::UnexpectedPositional { value: "x".into() }
        );
    }
}
