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

//! The read-eval loop.

use crate::command::execute_pipeline;
use minish_env::input::Input;
use minish_env::semantics::{Divert, ExitStatus};
use minish_env::Env;
use minish_syntax::parser::parse_line;
use std::ops::ControlFlow::{Break, Continue};

/// Reads and executes commands until the input ends or `exit` is run.
///
/// Every line is parsed and executed on its own: a syntax error abandons
/// that line (with a diagnostic and exit status 2) and the loop continues
/// with the next one. The returned exit status is the shell's final one:
/// the status requested by `exit`, or the status of the last command when
/// the input ran out.
pub fn read_eval_loop(env: &mut Env, input: &mut dyn Input) -> ExitStatus {
    while let Some(line) = input.next_line() {
        match parse_line(&line) {
            Err(error) => {
                env.print_error(&format!("minish: {error}\n"));
                env.exit_status = ExitStatus::ERROR;
            }
            Ok(None) => (),
            Ok(Some(pipeline)) => match execute_pipeline(env, &pipeline) {
                Continue(()) => (),
                Break(Divert::Exit(status)) => return status.unwrap_or(env.exit_status),
            },
        }
    }
    env.exit_status
}
