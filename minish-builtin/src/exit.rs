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

//! Exit builtin
//!
//! The **`exit`** builtin terminates the shell.
//!
//! # Synopsis
//!
//! ```sh
//! exit [status]
//! ```
//!
//! # Description
//!
//! The builtin makes the read-eval loop stop and the shell process exit.
//!
//! # Operands
//!
//! The optional ***status*** operand is a decimal integer; the shell exits
//! with its value reduced modulo 256. Without an operand the shell exits
//! with status zero.
//!
//! # Errors
//!
//! A non-numeric operand or more than one operand is an error: a
//! diagnostic is printed and the shell keeps running.
//!
//! # Exit status
//!
//! On error the builtin returns a non-zero exit status and the shell
//! continues; otherwise the shell terminates.

use crate::common::report_error;
use minish_env::builtin::Result;
use minish_env::semantics::{Divert, ExitStatus, Field};
use minish_env::Env;
use thiserror::Error;

/// Error in the operands of the builtin
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The operand could not be parsed as an integer.
    #[error("exit: {0}: numeric argument required")]
    NumericRequired(String),

    /// More than one operand was given.
    #[error("exit: too many arguments")]
    TooManyArguments,
}

/// Determines the exit status the shell should terminate with.
fn parse(args: &[Field]) -> std::result::Result<ExitStatus, Error> {
    if args.len() > 1 {
        return Err(Error::TooManyArguments);
    }
    match args.first() {
        None => Ok(ExitStatus::SUCCESS),
        Some(operand) => match operand.value.parse::<i64>() {
            Ok(status) => Ok(ExitStatus(status.rem_euclid(256) as i32)),
            Err(_) => Err(Error::NumericRequired(operand.value.clone())),
        },
    }
}

/// Entry point for executing the `exit` builtin
pub fn main(env: &mut Env, args: Vec<Field>) -> Result {
    match parse(&args) {
        Ok(status) => {
            Result::with_exit_status_and_divert(env.exit_status, Divert::Exit(Some(status)))
        }
        Err(error) => report_error(env, &error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::ops::ControlFlow::{Break, Continue};

    #[test]
    fn no_operand_exits_with_zero() {
        assert_eq!(parse(&[]), Ok(ExitStatus::SUCCESS));
    }

    #[test]
    fn numeric_operand_selects_the_status() {
        assert_eq!(parse(&Field::dummies(["42"])), Ok(ExitStatus(42)));
        assert_eq!(parse(&Field::dummies(["0"])), Ok(ExitStatus::SUCCESS));
    }

    #[test]
    fn status_is_reduced_modulo_256() {
        assert_eq!(parse(&Field::dummies(["256"])), Ok(ExitStatus(0)));
        assert_eq!(parse(&Field::dummies(["300"])), Ok(ExitStatus(44)));
        assert_eq!(parse(&Field::dummies(["-1"])), Ok(ExitStatus(255)));
    }

    #[test]
    fn non_numeric_operand_is_an_error() {
        assert_matches!(
            parse(&Field::dummies(["abc"])),
            Err(Error::NumericRequired(operand)) => assert_eq!(operand, "abc")
        );
    }

    #[test]
    fn too_many_operands_is_an_error() {
        assert_eq!(
            parse(&Field::dummies(["1", "2"])),
            Err(Error::TooManyArguments)
        );
    }

    #[test]
    fn main_requests_an_exit_divert() {
        let mut env = Env::new();
        let result = main(&mut env, Field::dummies(["5"]));
        assert_eq!(
            result.divert(),
            Break(Divert::Exit(Some(ExitStatus(5))))
        );
    }

    #[test]
    fn main_with_bad_operand_does_not_exit() {
        let mut env = Env::new();
        let result = main(&mut env, Field::dummies(["oops"]));
        assert_eq!(result.divert(), Continue(()));
        assert_eq!(result.exit_status(), ExitStatus::ERROR);
    }
}
