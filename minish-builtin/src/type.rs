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

//! Type builtin
//!
//! The **`type`** builtin identifies the type of commands.
//!
//! # Synopsis
//!
//! ```sh
//! type [name…]
//! ```
//!
//! # Description
//!
//! For each ***name*** operand, one line is printed to the standard
//! output:
//!
//! - `NAME is a shell builtin` if the name is in the builtin registry;
//! - `NAME is PATH` if the name resolves to an executable file in `$PATH`;
//! - `NAME: not found` otherwise.
//!
//! The builtin registry is consulted before `$PATH`, in the same order the
//! command dispatcher uses.
//!
//! # Exit status
//!
//! Zero if every *name* was found; non-zero otherwise. With no operands
//! the builtin does nothing and succeeds.

use crate::common::output;
use minish_env::builtin::Result;
use minish_env::semantics::{ExitStatus, Field};
use minish_env::Env;
use minish_semantics::command_search::search_path;

/// What one operand of the builtin was identified as
#[derive(Clone, Debug, Eq, PartialEq)]
enum Classification {
    Builtin,
    External(String),
    NotFound,
}

fn classify(env: &Env, name: &str) -> Classification {
    if env.builtins.contains_key(name) {
        return Classification::Builtin;
    }
    match search_path(name) {
        Some(path) => Classification::External(path.to_string_lossy().into_owned()),
        None => Classification::NotFound,
    }
}

fn describe(name: &str, classification: &Classification) -> String {
    match classification {
        Classification::Builtin => format!("{name} is a shell builtin\n"),
        Classification::External(path) => format!("{name} is {path}\n"),
        Classification::NotFound => format!("{name}: not found\n"),
    }
}

/// Entry point for executing the `type` builtin
pub fn main(env: &mut Env, args: Vec<Field>) -> Result {
    let mut exit_status = ExitStatus::SUCCESS;
    for operand in &args {
        let classification = classify(env, &operand.value);
        if classification == Classification::NotFound {
            exit_status = ExitStatus::FAILURE;
        }
        let result = output(env, &describe(&operand.value, &classification));
        if !result.exit_status().is_successful() {
            return result;
        }
    }
    Result::new(exit_status)
}
