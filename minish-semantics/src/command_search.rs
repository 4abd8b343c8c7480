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

//! Command search.
//!
//! The command search determines what a simple command's name refers to.
//! A name containing a slash is always an external utility and is passed
//! to `exec` as given. Any other name is looked up in the builtin registry
//! first and then in the directories of `$PATH`, left to right.
//!
//! `$PATH` is read from the process environment on every search; results
//! are never cached, so an updated `PATH` takes effect at the next prompt.
//! An empty `$PATH` entry is skipped rather than treated as the current
//! directory.

use minish_env::builtin::Builtin;
use minish_env::system;
use minish_env::Env;
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::PathBuf;

/// Target of a simple command execution
///
/// This is the result of the command [search].
#[derive(Clone, Debug)]
pub enum Target {
    /// Builtin utility
    Builtin(Builtin),
    /// External utility
    External {
        /// Path to the external utility
        ///
        /// If the command name contains a slash, this is the name itself,
        /// regardless of whether an executable exists there. Otherwise it
        /// is the first match in `$PATH`, and may be relative if `$PATH`
        /// contains a relative directory.
        path: CString,
    },
}

/// Performs command search.
pub fn search(env: &Env, name: &str) -> Option<Target> {
    if name.contains('/') {
        return match CString::new(name) {
            Ok(path) => Some(Target::External { path }),
            Err(_) => None,
        };
    }

    if let Some(&builtin) = env.builtins.get(name) {
        return Some(Target::Builtin(builtin));
    }

    let path = search_path(name)?;
    Some(Target::External { path })
}

/// Searches `$PATH` for an executable file with the given name.
///
/// Returns the path of the first match. The path may not be absolute if
/// `$PATH` contains a relative directory.
pub fn search_path(name: &str) -> Option<CString> {
    let path = std::env::var_os("PATH")?;
    search_path_in(&path, name)
}

/// Searches the directories of the given `$PATH` value.
pub fn search_path_in(path: &OsStr, name: &str) -> Option<CString> {
    for dir in path.as_bytes().split(|&byte| byte == b':') {
        if dir.is_empty() {
            continue;
        }
        let mut file = PathBuf::from(OsStr::from_bytes(dir));
        file.push(name);
        if let Ok(file) = CString::new(file.into_os_string().into_vec()) {
            if system::is_executable_file(&file) {
                return Some(file);
            }
        }
    }

    None
}
