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

//! Syntax parser that converts a line of input into a [`Pipeline`].
//!
//! [`parse_line`] is the entry point. It splits the line at unquoted `|`
//! characters, extracts the first redirection from each resulting segment,
//! and lexes the remaining command text into words. Parsing a line either
//! yields a complete pipeline, `None` for a blank line, or a
//! [`SyntaxError`]; a failed parse leaves no state behind, so the caller
//! can simply prompt for the next line.

use crate::syntax::{Fd, Pipeline, Redir, RedirOp, Segment};
use thiserror::Error;

pub mod lex;

use lex::{classify, is_blank, QuoteKind};

/// Error in the syntax of a command line
///
/// Any of these abandons the whole line.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// The input ended inside a quotation.
    #[error("unmatched {0}")]
    UnterminatedQuote(QuoteKind),

    /// The input ended directly after a backslash.
    #[error("unmatched backslash")]
    DanglingBackslash,

    /// A `|` had no command on one of its sides.
    #[error("empty command in pipeline")]
    EmptySegment,

    /// A redirection operator had no target filename.
    #[error("missing redirection target")]
    MissingRedirTarget,
}

/// Parses one line of input into a pipeline.
///
/// Returns `Ok(None)` if the line contains nothing to execute (only blanks,
/// or nothing at all). A single segment without words is preserved and left
/// for the executor to treat as a no-op; inside a multi-stage pipeline the
/// same situation is an [`EmptySegment`](SyntaxError::EmptySegment) error.
pub fn parse_line(line: &str) -> Result<Option<Pipeline>, SyntaxError> {
    let raw_segments = split_at_pipes(line);
    let multi = raw_segments.len() > 1;

    let mut segments = Vec::with_capacity(raw_segments.len());
    for raw in raw_segments {
        if multi && raw.trim().is_empty() {
            return Err(SyntaxError::EmptySegment);
        }
        let segment = parse_segment(raw)?;
        if multi && segment.words.is_empty() {
            return Err(SyntaxError::EmptySegment);
        }
        segments.push(segment);
    }

    if let [only] = segments.as_slice() {
        if only.words.is_empty() && only.redir.is_none() {
            return Ok(None);
        }
    }

    Ok(Some(Pipeline { segments }))
}

/// Parses the raw text of one pipeline segment.
pub fn parse_segment(raw: &str) -> Result<Segment, SyntaxError> {
    let (command, redir) = extract_redir(raw)?;
    let words = lex::split_words(&command)?;
    Ok(Segment { words, redir })
}

/// Splits a line at every unquoted `|`.
///
/// The returned slices cover the whole line; the `|` separators are
/// dropped. The result is never empty.
pub fn split_at_pipes(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut segment_start = 0;
    for span in classify(line) {
        if span.c == '|' && !span.quoted {
            segments.push(&line[segment_start..span.start]);
            segment_start = span.start + 1;
        }
    }
    segments.push(&line[segment_start..]);
    segments
}

/// Extracts the first redirection from the raw text of one segment.
///
/// Scans for the first unquoted `>`. An unquoted ASCII digit immediately
/// before the operator selects the target file descriptor (1 otherwise),
/// and a second `>` selects append mode. The target filename runs from the
/// first non-blank after the operator to the next unquoted blank and is
/// lexed like any other word, so it may be quoted. The returned command
/// text is the segment with the directive removed.
///
/// Subsequent `>` characters are left in the command text untouched; only
/// the first directive is honored.
pub fn extract_redir(raw: &str) -> Result<(String, Option<Redir>), SyntaxError> {
    let spans = classify(raw);

    let Some(op_index) = spans.iter().position(|s| s.c == '>' && !s.quoted) else {
        return Ok((raw.to_owned(), None));
    };

    // The digit, if any, is removed together with the operator.
    let mut fd = Fd::STDOUT;
    let mut removal_start = spans[op_index].start;
    if op_index > 0 {
        let before = &spans[op_index - 1];
        if !before.quoted && before.c.is_ascii_digit() {
            fd = Fd(before.c as i32 - '0' as i32);
            removal_start = before.start;
        }
    }

    let mut index = op_index + 1;
    let op = match spans.get(index) {
        Some(span) if span.c == '>' && !span.quoted => {
            index += 1;
            RedirOp::FileAppend
        }
        _ => RedirOp::FileOut,
    };

    while matches!(spans.get(index), Some(span) if !span.quoted && is_blank(span.c)) {
        index += 1;
    }
    let Some(target_first) = spans.get(index) else {
        return Err(SyntaxError::MissingRedirTarget);
    };
    let target_start = target_first.start;

    while matches!(spans.get(index), Some(span) if span.quoted || !is_blank(span.c)) {
        index += 1;
    }
    let target_end = match spans.get(index) {
        Some(span) => span.start,
        None => raw.len(),
    };

    let target_words = lex::split_words(&raw[target_start..target_end])?;
    let Some(target) = target_words.into_iter().next() else {
        return Err(SyntaxError::MissingRedirTarget);
    };

    let command = format!("{}{}", &raw[..removal_start], &raw[target_end..]);
    Ok((command, Some(Redir { fd, op, target })))
}
