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

//! Shell execution environment.
//!
//! [`Env`] carries the state the shell accumulates across commands: the
//! builtin registry and the exit status of the last command. Everything
//! else the shell depends on — the working directory, the environment
//! variables, the file descriptor table — lives in the process itself and
//! is accessed through [`system`] at the moment it is needed, so nothing
//! here can go stale.
//!
//! Note that concrete implementations of builtins are not included in this
//! crate; see the `minish-builtin` crate for those. This crate only defines
//! the [type](builtin::Builtin) the registry stores.

use self::builtin::Builtin;
use self::semantics::ExitStatus;
use std::collections::HashMap;

pub mod builtin;
pub mod input;
pub mod io;
pub mod semantics;
pub mod system;

/// Whole shell execution environment
#[derive(Clone, Debug, Default)]
pub struct Env {
    /// Builtin utilities available in this environment
    ///
    /// Consulted both by the command dispatcher and by the `type` builtin.
    pub builtins: HashMap<&'static str, Builtin>,

    /// Exit status of the last executed command
    pub exit_status: ExitStatus,
}

impl Env {
    /// Creates an environment with no builtins registered.
    #[must_use]
    pub fn new() -> Env {
        Env::default()
    }

    /// Prints a message to the standard error.
    ///
    /// The write goes to file descriptor 2 as it currently is, so an active
    /// `2>` redirection captures the message. A failure to write is
    /// ignored; there is nowhere left to report it.
    pub fn print_error(&self, message: &str) {
        let _ = system::write_all(io::Fd::STDERR, message.as_bytes());
    }

    /// Prints a message followed by an `errno` description to the standard
    /// error.
    ///
    /// This is the reporting path for failing system calls: the message
    /// names the operation and the description says why it failed.
    pub fn print_system_error(&self, errno: system::Errno, message: std::fmt::Arguments<'_>) {
        self.print_error(&format!("minish: {}: {}\n", message, errno.desc()));
    }
}
