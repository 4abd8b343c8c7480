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

//! Helpers for unit tests in this crate.

use minish_env::builtin::Result;
use minish_env::io::Fd;
use minish_env::semantics::{Divert, ExitStatus, Field};
use minish_env::system;
use minish_env::Env;
use std::sync::{Mutex, MutexGuard};

/// Serializes tests that touch the process-wide file descriptor table.
///
/// Tests that redirect a shared file descriptor (such as standard error)
/// must hold this lock so they do not interleave with each other.
static FD_LOCK: Mutex<()> = Mutex::new(());

pub fn lock_fds() -> MutexGuard<'static, ()> {
    FD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Builtin that requests shell termination with the status given as its
/// argument, like the real `exit` does.
pub fn exit_builtin(_env: &mut Env, args: Vec<Field>) -> Result {
    let status = args
        .first()
        .and_then(|field| field.value.parse().ok())
        .map_or(ExitStatus::SUCCESS, ExitStatus);
    Result::with_exit_status_and_divert(ExitStatus::SUCCESS, Divert::Exit(Some(status)))
}

/// Builtin that writes a fixed complaint to the standard error.
pub fn stderr_writing_builtin(_env: &mut Env, _args: Vec<Field>) -> Result {
    let _ = system::write_all(Fd::STDERR, b"complaint\n");
    Result::new(ExitStatus::SUCCESS)
}

/// Builtin that fails with the status given as its argument.
pub fn return_builtin(_env: &mut Env, args: Vec<Field>) -> Result {
    let status = args
        .first()
        .and_then(|field| field.value.parse().ok())
        .map_or(ExitStatus::SUCCESS, ExitStatus);
    Result::new(status)
}
