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

//! Interface to the underlying operating system.
//!
//! These are thin wrappers around the system calls the shell uses,
//! expressed in terms of the shell's own [`Fd`] type. The wrappers add no
//! policy beyond retrying on `EINTR` where that is always the right thing
//! to do; everything else is left to the callers in `minish-semantics`.

use crate::io::{Fd, MIN_INTERNAL_FD};
use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};

pub use nix::errno::Errno;
pub use nix::fcntl::OFlag;
pub use nix::sys::stat::Mode;
pub use nix::sys::wait::WaitStatus;
pub use nix::unistd::{ForkResult, Pid};

/// File permission bits for files created by redirections (before umask)
pub const REDIR_MODE: Mode = Mode::from_bits_truncate(0o666);

fn is_executable(path: &CStr) -> bool {
    nix::unistd::access(path, nix::unistd::AccessFlags::X_OK).is_ok()
}

fn is_regular_file(path: &CStr) -> bool {
    use nix::libc::{S_IFMT, S_IFREG};
    match nix::sys::stat::stat(path) {
        Ok(stat) => stat.st_mode & S_IFMT == S_IFREG,
        Err(_) => false,
    }
}

/// Whether there is an executable regular file at the given path.
#[must_use]
pub fn is_executable_file(path: &CStr) -> bool {
    is_regular_file(path) && is_executable(path)
}

/// Opens a file.
pub fn open(path: &CStr, flags: OFlag, mode: Mode) -> Result<Fd, Errno> {
    nix::fcntl::open(path, flags, mode).map(Fd)
}

/// Closes a file descriptor.
pub fn close(fd: Fd) -> Result<(), Errno> {
    match nix::unistd::close(fd.0) {
        Err(Errno::EINTR) => Ok(()),
        other => other,
    }
}

/// Duplicates a file descriptor into the shell-internal range.
///
/// The copy is made at [`MIN_INTERNAL_FD`] or above and carries the
/// CLOEXEC flag, so it stays out of the user-visible range and never leaks
/// into an executed utility.
pub fn save_fd(fd: Fd) -> Result<Fd, Errno> {
    nix::fcntl::fcntl(fd.0, nix::fcntl::FcntlArg::F_DUPFD_CLOEXEC(MIN_INTERNAL_FD.0)).map(Fd)
}

/// Duplicates `from` onto `to`, closing whatever `to` referred to.
pub fn dup2(from: Fd, to: Fd) -> Result<Fd, Errno> {
    nix::unistd::dup2(from.0, to.0).map(Fd)
}

/// Creates an anonymous pipe, returning `(reader, writer)`.
pub fn pipe() -> Result<(Fd, Fd), Errno> {
    let (reader, writer) = nix::unistd::pipe()?;
    Ok((Fd(reader), Fd(writer)))
}

/// Creates a child process.
///
/// # Safety
///
/// See [`nix::unistd::fork`]. In this shell the child either replaces its
/// image with `execv` or exits after running a builtin, which keeps the
/// usage within the documented constraints.
pub unsafe fn fork() -> Result<ForkResult, Errno> {
    nix::unistd::fork()
}

/// Replaces the current process image.
///
/// Retries when the underlying system call is interrupted, so an `Err`
/// return is a real failure.
pub fn execv(path: &CStr, argv: &[CString]) -> Result<Infallible, Errno> {
    loop {
        let result = nix::unistd::execv(path, argv);
        if result != Err(Errno::EINTR) {
            return result;
        }
    }
}

/// Waits for the given child process to terminate.
pub fn wait_for_child(pid: Pid) -> Result<WaitStatus, Errno> {
    loop {
        match nix::sys::wait::waitpid(pid, None) {
            Err(Errno::EINTR) => (),
            other => return other,
        }
    }
}

/// Sends SIGTERM to the given child process.
pub fn terminate(pid: Pid) -> Result<(), Errno> {
    nix::sys::signal::kill(pid, nix::sys::signal::Signal::SIGTERM)
}

/// Returns the working directory as the kernel reports it.
pub fn getcwd() -> Result<PathBuf, Errno> {
    nix::unistd::getcwd()
}

/// Changes the working directory.
pub fn chdir(path: &Path) -> Result<(), Errno> {
    nix::unistd::chdir(path)
}

/// Writes the whole buffer to a file descriptor.
///
/// Short writes are continued and interruptions are retried until every
/// byte is written or a real error occurs.
pub fn write_all(fd: Fd, mut bytes: &[u8]) -> Result<(), Errno> {
    while !bytes.is_empty() {
        match nix::unistd::write(fd.0, bytes) {
            Ok(count) => bytes = &bytes[count..],
            Err(Errno::EINTR) => (),
            Err(errno) => return Err(errno),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::PermissionsExt;

    fn c_string(path: &Path) -> CString {
        CString::new(path.as_os_str().as_bytes()).unwrap()
    }

    #[test]
    fn executable_file_detection() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script");
        let data = dir.path().join("data");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::write(&data, "text").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(is_executable_file(&c_string(&script)));
        assert!(!is_executable_file(&c_string(&data)));
        assert!(!is_executable_file(&c_string(&dir.path().join("absent"))));
        // A directory is executable but not a regular file.
        assert!(!is_executable_file(&c_string(dir.path())));
    }

    #[test]
    fn write_all_writes_every_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        let fd = open(
            &c_string(&path),
            OFlag::O_WRONLY | OFlag::O_CREAT,
            REDIR_MODE,
        )
        .unwrap();
        write_all(fd, b"hello world\n").unwrap();
        close(fd).unwrap();

        let mut content = String::new();
        std::fs::File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello world\n");
    }

    #[test]
    fn save_fd_lands_in_the_internal_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f");
        std::fs::write(&path, "").unwrap();
        let fd = open(&c_string(&path), OFlag::O_RDONLY, Mode::empty()).unwrap();
        let saved = save_fd(fd).unwrap();
        assert!(saved >= MIN_INTERNAL_FD, "saved = {saved}");
        close(saved).unwrap();
        close(fd).unwrap();
    }
}
