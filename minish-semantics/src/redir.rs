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

//! Redirection semantics.
//!
//! A [redirection](Redir) opens its target file (`O_TRUNC` for `>`,
//! `O_APPEND` for `>>`, both with `O_CREAT` and mode 0666 before umask)
//! and duplicates the resulting descriptor onto the redirection's target
//! file descriptor. Missing parent directories of the target are created
//! first, mode 0777 before umask; this matches the historical behavior of
//! this shell, not POSIX.
//!
//! To perform redirections in the shell's own process, wrap the [`Env`] in
//! a [`RedirGuard`] and call [`perform_redir`](RedirGuard::perform_redir).
//! The guard records the original file descriptor in a shell-internal
//! CLOEXEC slot and restores it when dropped, on every exit path. In a
//! forked child the restoration is pointless; the child calls
//! [`preserve_redirs`](RedirGuard::preserve_redirs) to make the effect
//! permanent instead.

use minish_env::io::Fd;
use minish_env::system::{self, Errno, OFlag, REDIR_MODE};
use minish_env::Env;
use minish_syntax::syntax::{Redir, RedirOp};
use std::ffi::CString;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use thiserror::Error;

/// Record of saving an open file description in another file descriptor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct SavedFd {
    /// File descriptor the redirection overwrote
    original: Fd,
    /// Shell-internal copy of the original open file description
    ///
    /// `None` if the original file descriptor was closed before the
    /// redirection; restoring then means closing it again.
    save: Option<Fd>,
}

/// Error performing a redirection
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The target pathname contains a nul byte.
    #[error("invalid pathname '{0}'")]
    NulByte(String),

    /// The target file could not be opened.
    #[error("cannot open file '{path}': {}", .errno.desc())]
    OpenFile {
        /// Pathname of the file that could not be opened
        path: String,
        /// Reason of the failure
        errno: Errno,
    },

    /// The target file descriptor could not be overwritten.
    #[error("cannot redirect file descriptor {fd}: {}", .errno.desc())]
    FdNotOverwritten {
        /// File descriptor the redirection applies to
        fd: Fd,
        /// Reason of the failure
        errno: Errno,
    },
}

/// Opens the file a redirection targets.
///
/// Parent directories that do not exist yet are created on the fly; a
/// failure to create them surfaces as the subsequent open failure.
fn open_target(redir: &Redir) -> Result<Fd, Error> {
    let target = &redir.target.value;

    if let Some(parent) = Path::new(target).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    let flags = OFlag::O_WRONLY
        | OFlag::O_CREAT
        | match redir.op {
            RedirOp::FileOut => OFlag::O_TRUNC,
            RedirOp::FileAppend => OFlag::O_APPEND,
        };

    let path = CString::new(target.as_str()).map_err(|_| Error::NulByte(target.clone()))?;
    system::open(&path, flags, REDIR_MODE).map_err(|errno| Error::OpenFile {
        path: target.clone(),
        errno,
    })
}

/// Performs a redirection, returning the record needed to undo it.
fn perform(redir: &Redir) -> Result<SavedFd, Error> {
    // Save the current open file description at the target fd
    let save = match system::save_fd(redir.fd) {
        Ok(save) => Some(save),
        Err(Errno::EBADF) => None,
        Err(errno) => {
            return Err(Error::FdNotOverwritten {
                fd: redir.fd,
                errno,
            })
        }
    };

    let file = open_target(redir);
    let file = match file {
        Ok(file) => file,
        Err(error) => {
            if let Some(save) = save {
                let _ = system::close(save);
            }
            return Err(error);
        }
    };

    if file != redir.fd {
        let dup_result = system::dup2(file, redir.fd);
        let _ = system::close(file);
        if let Err(errno) = dup_result {
            if let Some(save) = save {
                let _ = system::close(save);
            }
            return Err(Error::FdNotOverwritten {
                fd: redir.fd,
                errno,
            });
        }
    }

    Ok(SavedFd {
        original: redir.fd,
        save,
    })
}

/// `Env` wrapper for performing redirections
///
/// This is an RAII-style wrapper of [`Env`] in which redirections are
/// performed. The guard keeps track of the file descriptors it modified so
/// they can be restored afterwards.
///
/// There are two ways to clear the saved state. One is
/// [`undo_redirs`](Self::undo_redirs), which restores the file descriptors
/// to their original state; dropping the guard calls it implicitly. The
/// other is [`preserve_redirs`](Self::preserve_redirs), which discards the
/// saved copies and thus makes the redirections permanent.
#[derive(Debug)]
pub struct RedirGuard<'e> {
    /// Environment in which redirections are performed
    env: &'e mut Env,
    /// Records of file descriptors modified by redirections
    saved_fds: Vec<SavedFd>,
}

impl Deref for RedirGuard<'_> {
    type Target = Env;
    fn deref(&self) -> &Env {
        self.env
    }
}

impl DerefMut for RedirGuard<'_> {
    fn deref_mut(&mut self) -> &mut Env {
        self.env
    }
}

impl Drop for RedirGuard<'_> {
    fn drop(&mut self) {
        self.undo_redirs()
    }
}

impl<'e> RedirGuard<'e> {
    /// Creates a new `RedirGuard`.
    pub fn new(env: &'e mut Env) -> Self {
        let saved_fds = Vec::new();
        RedirGuard { env, saved_fds }
    }

    /// Performs a redirection.
    ///
    /// If successful, the guard internally keeps a backing copy of the
    /// file descriptor affected by the redirection so it can be restored
    /// later.
    pub fn perform_redir(&mut self, redir: &Redir) -> Result<(), Error> {
        let saved_fd = perform(redir)?;
        self.saved_fds.push(saved_fd);
        Ok(())
    }

    /// Undoes the effect of the redirections.
    ///
    /// This function restores the affected file descriptors to their
    /// original state and closes the internal backing copies.
    pub fn undo_redirs(&mut self) {
        for SavedFd { original, save } in self.saved_fds.drain(..).rev() {
            if let Some(save) = save {
                debug_assert_ne!(save, original);
                let _ = system::dup2(save, original);
                let _ = system::close(save);
            } else {
                let _ = system::close(original);
            }
        }
    }

    /// Makes the redirections permanent.
    ///
    /// This function closes the internal backing copies without restoring
    /// the original file descriptor state.
    pub fn preserve_redirs(&mut self) {
        for SavedFd { original: _, save } in self.saved_fds.drain(..) {
            if let Some(save) = save {
                let _ = system::close(save);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use minish_syntax::syntax::Word;

    // These tests redirect a file descriptor far above anything the
    // lowest-free allocation of parallel tests can reach, so a bug cannot
    // corrupt another test's descriptors. They still share that one
    // descriptor with each other and must run one at a time.
    const SCRATCH_FD: Fd = Fd(107);

    static FD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn lock_fds() -> std::sync::MutexGuard<'static, ()> {
        FD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn redir_to(path: &Path, op: RedirOp) -> Redir {
        Redir {
            fd: SCRATCH_FD,
            op,
            target: Word::from(path.to_str().unwrap()),
        }
    }

    #[test]
    fn redirection_writes_to_the_target_file() {
        let _lock = lock_fds();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        let mut env = Env::new();
        let mut guard = RedirGuard::new(&mut env);

        guard.perform_redir(&redir_to(&path, RedirOp::FileOut)).unwrap();
        system::write_all(SCRATCH_FD, b"redirected\n").unwrap();
        drop(guard);

        assert_eq!(std::fs::read(&path).unwrap(), b"redirected\n");
        // The scratch fd was closed (it did not exist before), so writing
        // to it now must fail.
        assert_eq!(
            system::write_all(SCRATCH_FD, b"x"),
            Err(Errno::EBADF)
        );
    }

    #[test]
    fn truncating_redirection_discards_previous_content() {
        let _lock = lock_fds();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        std::fs::write(&path, "previous content\n").unwrap();
        let mut env = Env::new();
        let mut guard = RedirGuard::new(&mut env);

        guard.perform_redir(&redir_to(&path, RedirOp::FileOut)).unwrap();
        system::write_all(SCRATCH_FD, b"new\n").unwrap();
        drop(guard);

        assert_eq!(std::fs::read(&path).unwrap(), b"new\n");
    }

    #[test]
    fn appending_redirection_keeps_previous_content() {
        let _lock = lock_fds();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        std::fs::write(&path, "first\n").unwrap();
        let mut env = Env::new();
        let mut guard = RedirGuard::new(&mut env);

        guard
            .perform_redir(&redir_to(&path, RedirOp::FileAppend))
            .unwrap();
        system::write_all(SCRATCH_FD, b"second\n").unwrap();
        drop(guard);

        assert_eq!(std::fs::read(&path).unwrap(), b"first\nsecond\n");
    }

    #[test]
    fn dropping_the_guard_restores_the_original_descriptor() {
        let _lock = lock_fds();
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("kept");
        let redirected = dir.path().join("redirected");

        // Point the scratch fd at one file, then redirect it to another.
        let mut env = Env::new();
        let mut outer = RedirGuard::new(&mut env);
        outer.perform_redir(&redir_to(&kept, RedirOp::FileOut)).unwrap();
        {
            let mut inner = RedirGuard::new(&mut outer);
            inner
                .perform_redir(&redir_to(&redirected, RedirOp::FileOut))
                .unwrap();
            system::write_all(SCRATCH_FD, b"inner\n").unwrap();
        }
        system::write_all(SCRATCH_FD, b"outer\n").unwrap();
        drop(outer);

        assert_eq!(std::fs::read(&redirected).unwrap(), b"inner\n");
        assert_eq!(std::fs::read(&kept).unwrap(), b"outer\n");
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let _lock = lock_fds();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/out");
        let mut env = Env::new();
        let mut guard = RedirGuard::new(&mut env);

        guard.perform_redir(&redir_to(&path, RedirOp::FileOut)).unwrap();
        system::write_all(SCRATCH_FD, b"deep\n").unwrap();
        drop(guard);

        assert_eq!(std::fs::read(&path).unwrap(), b"deep\n");
    }

    #[test]
    fn unopenable_target_reports_open_file_error() {
        let _lock = lock_fds();
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for writing.
        let mut env = Env::new();
        let mut guard = RedirGuard::new(&mut env);

        let error = guard
            .perform_redir(&redir_to(dir.path(), RedirOp::FileOut))
            .unwrap_err();
        assert_matches!(error, Error::OpenFile { errno, .. } => {
            assert_eq!(errno, Errno::EISDIR);
        });
        // Nothing to restore, nothing leaked.
        assert_eq!(
            system::write_all(SCRATCH_FD, b"x"),
            Err(Errno::EBADF)
        );
    }
}
