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

//! Common items for implementing builtins.

use minish_env::builtin::Result;
use minish_env::io::Fd;
use minish_env::semantics::ExitStatus;
use minish_env::system;
use minish_env::Env;

/// Prints a string to the standard output.
///
/// The write goes straight to file descriptor 1 without buffering, so an
/// installed redirection captures it and the output is complete before
/// the next prompt. If the write fails, a diagnostic goes to the standard
/// error and the result carries [`ExitStatus::FAILURE`].
pub fn output(env: &mut Env, content: &str) -> Result {
    match system::write_all(Fd::STDOUT, content.as_bytes()) {
        Ok(()) => Result::new(ExitStatus::SUCCESS),
        Err(errno) => {
            env.print_system_error(errno, format_args!("cannot print to the standard output"));
            Result::new(ExitStatus::FAILURE)
        }
    }
}

/// Prints an error message and returns a failure result.
///
/// The message is printed to the standard error with a trailing newline
/// appended. The result carries [`ExitStatus::FAILURE`].
pub fn report_failure(env: &mut Env, message: &str) -> Result {
    env.print_error(&format!("{message}\n"));
    Result::new(ExitStatus::FAILURE)
}

/// Prints an error message and returns an error result.
///
/// Like [`report_failure`], but the result carries [`ExitStatus::ERROR`],
/// for operand and syntax errors rather than runtime failures.
pub fn report_error(env: &mut Env, message: &str) -> Result {
    env.print_error(&format!("{message}\n"));
    Result::new(ExitStatus::ERROR)
}
