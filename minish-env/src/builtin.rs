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

//! Type definitions for builtin utilities.
//!
//! This module provides the types the [builtin registry](crate::Env::builtins)
//! stores. Implementations of specific builtins like `cd` and `type` live
//! in the `minish-builtin` crate.

use crate::semantics::{Divert, ExitStatus, Field};
use crate::Env;

/// Entry point of a builtin utility
///
/// The arguments do not include the command name; quoting has already been
/// resolved. The builtin reads and writes the real file descriptors, so an
/// installed redirection applies to it transparently.
pub type Main = fn(&mut Env, Vec<Field>) -> Result;

/// Builtin utility definition
#[derive(Clone, Copy)]
pub struct Builtin {
    /// Function that implements the builtin
    pub execute: Main,
}

impl Builtin {
    /// Creates a builtin definition.
    #[must_use]
    pub const fn new(execute: Main) -> Builtin {
        Builtin { execute }
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").finish_non_exhaustive()
    }
}

/// Result of builtin utility execution
///
/// The result combines an exit status with an optional request to divert
/// the flow of the read-eval loop (used by `exit`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct Result {
    exit_status: ExitStatus,
    divert: crate::semantics::Result,
}

impl Result {
    /// Creates a result with the given exit status and no divert.
    pub const fn new(exit_status: ExitStatus) -> Self {
        Self {
            exit_status,
            divert: crate::semantics::Result::Continue(()),
        }
    }

    /// Creates a result with a [`Divert`].
    #[inline]
    pub const fn with_exit_status_and_divert(exit_status: ExitStatus, divert: Divert) -> Self {
        Self {
            exit_status,
            divert: crate::semantics::Result::Break(divert),
        }
    }

    /// Returns the exit status of this result.
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    /// Returns the divert request of this result.
    #[must_use]
    pub const fn divert(&self) -> crate::semantics::Result {
        self.divert
    }
}

impl From<ExitStatus> for Result {
    fn from(exit_status: ExitStatus) -> Self {
        Self::new(exit_status)
    }
}
