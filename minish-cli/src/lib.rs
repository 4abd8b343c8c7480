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

//! Command-line frontend for the minish shell. This library crate is used
//! by the `minish` binary crate to provide the shell functionality; it is
//! not intended for use by other crates.
//!
//! The entry point is the [`main`] function: it sets up the execution
//! environment, picks the input source (an interactive line editor when
//! the standard input is a terminal, a plain stream otherwise), and runs
//! the read-eval loop until `exit` or end of input.

pub mod startup;

use minish_env::Env;
use minish_semantics::read_eval_loop;
use nix::sys::signal::{signal, SigHandler, Signal};

/// Runs the shell and exits the process with the shell's final status.
pub fn main() -> ! {
    let mut env = Env::new();
    env.builtins.extend(minish_builtin::iter());

    // The Rust runtime starts with SIGPIPE ignored; restore the default
    // disposition so utilities in a pipeline terminate normally when
    // their reader goes away.
    // SAFETY: SigDfl installs no handler code.
    unsafe {
        let _ = signal(Signal::SIGPIPE, SigHandler::SigDfl);
    }

    let builtin_names: Vec<&'static str> = env.builtins.keys().copied().collect();
    let mut input = startup::input::prepare_input(builtin_names);
    let exit_status = read_eval_loop(&mut env, &mut *input);
    std::process::exit(exit_status.0)
}
