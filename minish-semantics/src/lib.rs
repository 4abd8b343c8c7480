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

//! Command execution semantics of the minish shell.
//!
//! This crate turns a parsed [`Pipeline`](minish_syntax::syntax::Pipeline)
//! into running processes:
//!
//! - [`command_search`] maps a command name to a builtin or an executable
//!   found in `$PATH`;
//! - [`redir`] installs and restores file descriptor redirections;
//! - [`command`] dispatches a single segment or a whole pipeline and reaps
//!   the children it forked;
//! - [`runner`] drives the read-eval loop on top of all of the above.
//!
//! Execution is synchronous: the shell does nothing while a pipeline runs
//! except wait for it, and every child is reaped before the next prompt.

pub mod command;
pub mod command_search;
pub mod redir;
pub mod runner;

#[cfg(test)]
pub(crate) mod tests;

#[doc(no_inline)]
pub use minish_env::semantics::{Divert, ExitStatus, Field, Result};

pub use command::execute_pipeline;
pub use runner::read_eval_loop;
