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

//! Cd builtin
//!
//! The **`cd`** builtin changes the working directory.
//!
//! # Synopsis
//!
//! ```sh
//! cd directory
//! ```
//!
//! # Description
//!
//! The builtin changes the working directory to the operand. If the
//! operand begins with a tilde (`~`), the tilde is replaced with the value
//! of `$HOME` before the change is attempted; no other expansion is
//! performed.
//!
//! # Operands
//!
//! Exactly one ***directory*** operand is required. Unlike other shells,
//! this one does not default to `$HOME` when the operand is omitted; that
//! is an error.
//!
//! # Errors
//!
//! - The operand is omitted, or more than one operand is given.
//! - The operand starts with `~` and `$HOME` is not set.
//! - The underlying `chdir` call fails; the diagnostic names the directory
//!   and the reason.
//!
//! # Exit status
//!
//! Zero if the working directory was changed; non-zero otherwise.
//!
//! # Portability
//!
//! POSIX `cd` defaults to `$HOME` without an operand, supports `cd -`, and
//! consults `$CDPATH`; none of those exist here.

use crate::common::report_failure;
use minish_env::builtin::Result;
use minish_env::semantics::{ExitStatus, Field};
use minish_env::system;
use minish_env::Env;
use std::path::Path;
use thiserror::Error;

/// Error in the operands of the builtin
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// No operand was given.
    #[error("cd: missing argument")]
    MissingOperand,

    /// More than one operand was given.
    #[error("cd: too many arguments")]
    TooManyArguments,

    /// The operand needs `$HOME` but the variable is not set.
    #[error("cd: HOME environment variable not set")]
    HomeUnset,
}

/// Computes the directory to change to.
///
/// A leading tilde is replaced with the given `$HOME` value, which may be
/// `None` when the variable is unset.
fn target(args: &[Field], home: Option<&str>) -> std::result::Result<String, Error> {
    if args.len() > 1 {
        return Err(Error::TooManyArguments);
    }
    let operand = args.first().ok_or(Error::MissingOperand)?;

    match operand.value.strip_prefix('~') {
        None => Ok(operand.value.clone()),
        Some(rest) => {
            let home = home.ok_or(Error::HomeUnset)?;
            Ok(format!("{home}{rest}"))
        }
    }
}

/// Entry point for executing the `cd` builtin
pub fn main(env: &mut Env, args: Vec<Field>) -> Result {
    let home = std::env::var("HOME").ok();
    let path = match target(&args, home.as_deref()) {
        Ok(path) => path,
        Err(error) => return report_failure(env, &error.to_string()),
    };

    match system::chdir(Path::new(&path)) {
        Ok(()) => Result::new(ExitStatus::SUCCESS),
        Err(errno) => report_failure(env, &format!("cd: {}: {}", path, errno.desc())),
    }
}
