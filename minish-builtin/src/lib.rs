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

//! Implementation of the shell builtin utilities.
//!
//! Each builtin utility is implemented in the submodule named after the
//! utility. The submodule contains the `main` function that implements the
//! builtin, and the module documentation describes its specification. The
//! [`common`] module provides functions shared by the implementations.
//!
//! Builtins receive their arguments after quoting resolution, never the
//! raw command line, and they write through the real file descriptors so
//! that an installed redirection applies to them like to any other
//! command.

pub mod cd;
pub mod common;
pub mod echo;
pub mod exit;
pub mod pwd;
pub mod r#type;

#[doc(no_inline)]
pub use minish_env::builtin::*;

/// Returns an iterator over all the implemented builtin utilities.
///
/// Each item is a tuple of the builtin name and the corresponding
/// [`Builtin`] instance, sorted by name. Feed the items to
/// [`Env::builtins`](minish_env::Env::builtins) to make the builtins
/// available:
///
/// ```
/// let mut env = minish_env::Env::new();
/// env.builtins.extend(minish_builtin::iter());
/// assert!(env.builtins.contains_key("cd"));
/// ```
pub fn iter() -> impl Iterator<Item = (&'static str, Builtin)> {
    [
        ("cd", Builtin::new(cd::main)),
        ("echo", Builtin::new(echo::main)),
        ("exit", Builtin::new(exit::main)),
        ("pwd", Builtin::new(pwd::main)),
        ("type", Builtin::new(r#type::main)),
    ]
    .into_iter()
}
