//! Argument tokenizer.
//!
//! Classifies each raw argument into [`Token`]s in a single left-to-right
//! pass. Short-option groups are expanded in place: `-abc` is pushed back
//! onto the work queue as `-a`, `-b`, `-c`, and the expanded pieces are then
//! classified like any other argument while sharing the index of the
//! argument they came from.

use std::collections::VecDeque;

use parse_args_core::{OptionsSchema, Token};
use tracing::debug;

use crate::classify::{
    DASH, EQUALS, is_long_option_and_value, is_lone_long_option, is_lone_short_option,
    is_short_option_and_value, is_short_option_group, long_for_short, text, units,
};

const TERMINATOR: [u16; 2] = [DASH, DASH];

/// Splits `args` into tokens according to `schema`.
///
/// String options take the following argument as their value whatever it
/// looks like; whether such a value is acceptable is decided later by the
/// strict validator.
pub fn tokenize(args: &[String], schema: &OptionsSchema) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut remaining: VecDeque<Vec<u16>> = args.iter().map(|arg| units(arg)).collect();
    // Raw arguments started so far; the current token's index is one less.
    let mut started = 0usize;
    let mut group_count = 0usize;

    while let Some(arg) = remaining.pop_front() {
        if group_count > 0 {
            group_count -= 1;
        } else {
            started += 1;
        }
        let index = started - 1;

        if arg == TERMINATOR {
            tokens.push(Token::OptionTerminator { index });
            tokens.extend(remaining.drain(..).map(|rest| {
                started += 1;
                Token::Positional {
                    index: started - 1,
                    value: text(&rest),
                }
            }));
            break;
        }

        if is_lone_short_option(&arg) {
            let name = long_for_short(schema, arg[1]);
            let value = if schema.is_string(&name) {
                remaining.pop_front()
            } else {
                None
            };
            if value.is_some() {
                started += 1;
            }
            tokens.push(option_token(name, text(&arg), index, value, false));
            continue;
        }

        if is_short_option_group(&arg, schema) {
            let expanded = expand_short_group(&arg, schema);
            group_count = expanded.len();
            for piece in expanded.into_iter().rev() {
                remaining.push_front(piece);
            }
            continue;
        }

        if is_short_option_and_value(&arg, schema) {
            tokens.push(option_token(
                long_for_short(schema, arg[1]),
                text(&[DASH, arg[1]]),
                index,
                Some(arg[2..].to_vec()),
                true,
            ));
            continue;
        }

        if is_lone_long_option(&arg) {
            let name = text(&arg[2..]);
            let value = if schema.is_string(&name) {
                remaining.pop_front()
            } else {
                None
            };
            if value.is_some() {
                started += 1;
            }
            tokens.push(option_token(name, text(&arg), index, value, false));
            continue;
        }

        if is_long_option_and_value(&arg) {
            // The first `=` may sit at position 2 when a later one made this
            // a long option with a value (`--=a=b`).
            let equals = arg
                .iter()
                .position(|&unit| unit == EQUALS)
                .unwrap_or(arg.len());
            let name = text(&arg[2..equals]);
            let raw_name = format!("--{name}");
            let value = arg.get(equals + 1..).unwrap_or_default().to_vec();
            tokens.push(option_token(name, raw_name, index, Some(value), true));
            continue;
        }

        tokens.push(Token::Positional {
            index,
            value: text(&arg),
        });
    }

    debug!(
        args = args.len(),
        tokens = tokens.len(),
        "Tokenized arguments"
    );
    tokens
}

/// Expands `-abc` into single-character pieces.
///
/// Expansion stops at the first string option that is not the last
/// character: it keeps the rest of the argument as its inline value
/// (`-abfFILE` becomes `-a`, `-b`, `-fFILE`).
fn expand_short_group(arg: &[u16], schema: &OptionsSchema) -> Vec<Vec<u16>> {
    let mut expanded = Vec::with_capacity(arg.len() - 1);
    for position in 1..arg.len() {
        let short = arg[position];
        let terminal = schema.is_string(&long_for_short(schema, short))
            && position != arg.len() - 1;
        if terminal {
            let mut piece = vec![DASH];
            piece.extend_from_slice(&arg[position..]);
            expanded.push(piece);
            break;
        }
        expanded.push(vec![DASH, short]);
    }
    expanded
}

fn option_token(
    name: String,
    raw_name: String,
    index: usize,
    value: Option<Vec<u16>>,
    inline: bool,
) -> Token {
    let inline_value = value.as_ref().map(|_| inline);
    Token::Option {
        name,
        raw_name,
        index,
        value: value.map(|units| text(&units)),
        inline_value,
    }
}
