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

//! Pwd builtin
//!
//! The **`pwd`** builtin prints the working directory path.
//!
//! # Synopsis
//!
//! ```sh
//! pwd
//! ```
//!
//! # Description
//!
//! The builtin asks the kernel for the pathname of the current working
//! directory and prints it followed by a newline to the standard output.
//! No value is cached anywhere in the shell, so the result is correct
//! even if a child process or an earlier failure left the shell's notion
//! of the directory behind.
//!
//! # Operands
//!
//! None; operands are ignored.
//!
//! # Exit status
//!
//! Zero if the path was successfully printed; non-zero otherwise.
//!
//! # Errors
//!
//! The builtin fails if the working directory has been removed from the
//! file system, an ancestor directory is not accessible, or the standard
//! output is not writable.

use crate::common::{output, report_failure};
use minish_env::builtin::Result;
use minish_env::semantics::Field;
use minish_env::system;
use minish_env::Env;

/// Entry point for executing the `pwd` builtin
pub fn main(env: &mut Env, _args: Vec<Field>) -> Result {
    match system::getcwd() {
        Ok(path) => output(env, &format!("{}\n", path.display())),
        Err(errno) => report_failure(env, &format!("pwd: {}", errno.desc())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minish_env::semantics::ExitStatus;

    #[test]
    fn pwd_succeeds_in_a_live_directory() {
        let mut env = Env::new();
        let result = main(&mut env, vec![]);
        assert_eq!(result.exit_status(), ExitStatus::SUCCESS);
    }
}
