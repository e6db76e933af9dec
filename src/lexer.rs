//! Shell-ish command line tokenizer
//!
//! Splits a raw command line into words while remembering each word's byte
//! range, so the whitespace between words survives as literal gap segments in
//! the rendered diagram. Quoting follows the POSIX shapes that matter for
//! display: single quotes are opaque, double quotes honor `\"` and `\\`,
//! bare backslashes escape the next character.

use std::ops::Range;

use crate::errors::{LexError, LexResult};

/// One word of a command line.
///
/// `raw` is the text as typed, quotes and all, and is what gets displayed;
/// `value` is the unquoted content used for knowledge-base lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub raw: String,
    pub value: String,
    pub range: Range<usize>,
}

/// Split `input` into words.
pub fn split_words(input: &str) -> LexResult<Vec<Word>> {
    let mut words = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut value = String::new();
        let mut end = input.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() {
                end = i;
                break;
            }
            chars.next();
            match c {
                '\'' => {
                    let mut closed = false;
                    for (_, q) in chars.by_ref() {
                        if q == '\'' {
                            closed = true;
                            break;
                        }
                        value.push(q);
                    }
                    if !closed {
                        return Err(LexError::UnterminatedQuote {
                            kind: "single",
                            pos: i,
                        });
                    }
                }
                '"' => loop {
                    match chars.next() {
                        None => {
                            return Err(LexError::UnterminatedQuote {
                                kind: "double",
                                pos: i,
                            })
                        }
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.next() {
                            None => {
                                return Err(LexError::UnterminatedQuote {
                                    kind: "double",
                                    pos: i,
                                })
                            }
                            Some((_, esc @ ('"' | '\\'))) => value.push(esc),
                            Some((_, other)) => {
                                value.push('\\');
                                value.push(other);
                            }
                        },
                        Some((_, ch)) => value.push(ch),
                    }
                },
                '\\' => match chars.next() {
                    None => return Err(LexError::TrailingEscape),
                    Some((_, ch)) => value.push(ch),
                },
                ch => value.push(ch),
            }
        }
        words.push(Word {
            raw: input[start..end].to_string(),
            value,
            range: start..end,
        });
    }

    if words.is_empty() {
        return Err(LexError::EmptyCommand);
    }
    Ok(words)
}

/// Treat argv items as pre-split words, as if joined by single spaces.
///
/// Words that reach us through the shell are already unquoted, so raw and
/// value coincide even when an item contains whitespace.
pub fn words_from_argv(args: &[String]) -> (String, Vec<Word>) {
    let source = args.join(" ");
    let mut words = Vec::with_capacity(args.len());
    let mut pos = 0;
    for arg in args {
        let range = pos..pos + arg.len();
        words.push(Word {
            raw: arg.clone(),
            value: arg.clone(),
            range: range.clone(),
        });
        pos = range.end + 1;
    }
    (source, words)
}
