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

//! Command-line syntax for the minish shell.
//!
//! This crate defines the syntactic entities a command line is parsed into
//! ([`syntax`]) and the functions that produce them ([`parser`]).
//!
//! A line of input goes through three stages:
//!
//! 1. The [pipeline splitter](parser::parse_line) divides the line at every
//!    unquoted `|` into segments.
//! 2. The [redirection extractor](parser::extract_redir) removes the first
//!    `>`/`>>` directive, if any, from each segment.
//! 3. The [word lexer](parser::lex::split_words) decomposes the remaining
//!    command text into quoting-resolved [words](syntax::Word).
//!
//! The stages share one definition of quoting, so a `|` or `>` inside
//! `'…'`, `"…"`, or after a backslash never acts as an operator.

pub mod parser;
pub mod syntax;
