// This file is part of minish, a miniature POSIX-style shell.
// Copyright (C) 2026 the minish authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Quoting-aware lexical analysis.
//!
//! [`split_words`] turns the command text of one pipeline segment into
//! quoting-resolved [words](Word). [`classify`] runs the same quoting state
//! machine without collecting words; the [pipeline splitter and redirection
//! extractor](super) use it to find the characters on which `|` and `>` act
//! as operators.
//!
//! # Quoting rules
//!
//! - Outside quotes, a backslash makes the next character literal. A
//!   backslash immediately followed by a newline removes both (line
//!   continuation).
//! - Between `'` and `'`, every character is literal; the backslash has no
//!   meaning there.
//! - Between `"` and `"`, a backslash is dropped before `\`, `$`, `"` and
//!   newline (the last again a line continuation); before any other
//!   character both the backslash and the character are kept.
//! - Closing a quote does not end the current word: `'a'b"c"` is the single
//!   word `abc`.

use super::SyntaxError;
use crate::syntax::Word;

/// Returns true if the character separates words.
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Kind of quotation, used in error reports
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuoteKind {
    /// `'…'`
    Single,
    /// `"…"`
    Double,
}

impl std::fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteKind::Single => "single quote".fmt(f),
            QuoteKind::Double => "double quote".fmt(f),
        }
    }
}

/// State of the quoting state machine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Outside quotes
    Bare,
    /// Inside `'…'`
    Single,
    /// Inside `"…"`
    Double,
}

/// Decomposes command text into quoting-resolved words.
///
/// Word boundaries are unquoted blanks; everything between them, quoted or
/// not, concatenates into one word. The empty word survives quoting (`''`
/// is a word with an empty value).
///
/// Fails with [`SyntaxError::UnterminatedQuote`] when the input ends inside
/// a quotation and with [`SyntaxError::DanglingBackslash`] when it ends
/// right after a backslash. The function never panics, whatever the input.
pub fn split_words(input: &str) -> Result<Vec<Word>, SyntaxError> {
    let mut words = Vec::new();
    let mut value = String::new();
    let mut in_word = false;
    let mut state = State::Bare;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Bare => match c {
                _ if is_blank(c) => {
                    if in_word {
                        words.push(Word::from(std::mem::take(&mut value)));
                        in_word = false;
                    }
                }
                '\'' => {
                    state = State::Single;
                    in_word = true;
                }
                '"' => {
                    state = State::Double;
                    in_word = true;
                }
                '\\' => match chars.next() {
                    None => return Err(SyntaxError::DanglingBackslash),
                    Some('\n') => (),
                    Some(escaped) => {
                        value.push(escaped);
                        in_word = true;
                    }
                },
                _ => {
                    value.push(c);
                    in_word = true;
                }
            },

            State::Single => match c {
                '\'' => state = State::Bare,
                _ => value.push(c),
            },

            State::Double => match c {
                '"' => state = State::Bare,
                '\\' => match chars.next() {
                    None => return Err(SyntaxError::DanglingBackslash),
                    Some('\n') => (),
                    Some(escaped @ ('\\' | '$' | '"')) => value.push(escaped),
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                },
                _ => value.push(c),
            },
        }
    }

    match state {
        State::Bare => {
            if in_word {
                words.push(Word::from(value));
            }
            Ok(words)
        }
        State::Single => Err(SyntaxError::UnterminatedQuote(QuoteKind::Single)),
        State::Double => Err(SyntaxError::UnterminatedQuote(QuoteKind::Double)),
    }
}

/// One character of raw input, classified by the quoting state machine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CharSpan {
    /// Byte offset of the character in the input
    pub start: usize,
    /// The character itself
    pub c: char,
    /// Whether the character is inside a quotation or escaped
    ///
    /// Quote and backslash characters themselves count as quoted; an
    /// operator scan never acts on them.
    pub quoted: bool,
}

/// Runs the quoting state machine over raw input without collecting words.
///
/// Unterminated quotes are not an error here: the remainder of the input is
/// simply classified as quoted, and [`split_words`] reports the error when
/// the segment is eventually lexed.
pub(crate) fn classify(input: &str) -> Vec<CharSpan> {
    let mut spans = Vec::new();
    let mut state = State::Bare;
    let mut chars = input.char_indices();

    while let Some((start, c)) = chars.next() {
        match state {
            State::Bare => match c {
                '\'' => {
                    state = State::Single;
                    spans.push(CharSpan {
                        start,
                        c,
                        quoted: true,
                    });
                }
                '"' => {
                    state = State::Double;
                    spans.push(CharSpan {
                        start,
                        c,
                        quoted: true,
                    });
                }
                '\\' => {
                    spans.push(CharSpan {
                        start,
                        c,
                        quoted: true,
                    });
                    if let Some((escaped_start, escaped)) = chars.next() {
                        spans.push(CharSpan {
                            start: escaped_start,
                            c: escaped,
                            quoted: true,
                        });
                    }
                }
                _ => spans.push(CharSpan {
                    start,
                    c,
                    quoted: false,
                }),
            },

            State::Single => {
                if c == '\'' {
                    state = State::Bare;
                }
                spans.push(CharSpan {
                    start,
                    c,
                    quoted: true,
                });
            }

            State::Double => {
                match c {
                    '"' => state = State::Bare,
                    '\\' => {
                        spans.push(CharSpan {
                            start,
                            c,
                            quoted: true,
                        });
                        if let Some((escaped_start, escaped)) = chars.next() {
                            spans.push(CharSpan {
                                start: escaped_start,
                                c: escaped,
                                quoted: true,
                            });
                        }
                        continue;
                    }
                    _ => (),
                }
                spans.push(CharSpan {
                    start,
                    c,
                    quoted: true,
                });
            }
        }
    }

    spans
}
