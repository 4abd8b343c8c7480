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

//! Echo builtin
//!
//! The **`echo`** builtin prints its arguments.
//!
//! # Synopsis
//!
//! ```sh
//! echo [argument…]
//! ```
//!
//! # Description
//!
//! The arguments are printed to the standard output, joined with single
//! spaces and followed by a newline.
//!
//! # Options
//!
//! None. Unlike other implementations of `echo`, this one performs no
//! option parsing at all: `-n` and `-e` are printed like any other
//! argument, and no escape sequences are interpreted.
//!
//! # Exit status
//!
//! Zero unless the output could not be written.

use crate::common::output;
use itertools::Itertools;
use minish_env::builtin::Result;
use minish_env::semantics::Field;
use minish_env::Env;

/// Formats the output of the builtin, including the trailing newline.
fn format(args: &[Field]) -> String {
    let mut line: String = args.iter().map(|field| field.value.as_str()).join(" ");
    line.push('\n');
    line
}

/// Entry point for executing the `echo` builtin
pub fn main(env: &mut Env, args: Vec<Field>) -> Result {
    output(env, &format(&args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_space_joined_and_newline_terminated() {
        assert_eq!(format(&Field::dummies(["hello", "world"])), "hello world\n");
    }

    #[test]
    fn no_arguments_print_a_bare_newline() {
        assert_eq!(format(&[]), "\n");
    }

    #[test]
    fn option_like_arguments_are_ordinary_text() {
        assert_eq!(format(&Field::dummies(["-n", "x"])), "-n x\n");
    }

    #[test]
    fn inner_whitespace_of_arguments_is_preserved() {
        assert_eq!(format(&Field::dummies(["a  b", "c"])), "a  b c\n");
    }
}
