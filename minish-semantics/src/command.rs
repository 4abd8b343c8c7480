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

//! Execution of parsed commands.
//!
//! [`execute_pipeline`] dispatches a [`Pipeline`] to one of two paths. A
//! single segment runs in the current process when its command is a
//! builtin, so that `cd` and `exit` can affect the shell itself; external
//! utilities are forked and awaited. A multi-stage pipeline forks one
//! child per segment, builtin or not: forking is the only way to wire a
//! builtin into a pipe without giving up the parent's own standard
//! descriptors.
//!
//! Whatever happens, every child forked for a pipeline is reaped before
//! this module returns, and the shell's exit status tracks the last
//! command of the pipeline.

use crate::command_search::{search, Target};
use crate::redir::RedirGuard;
use minish_env::builtin::Builtin;
use minish_env::io::Fd;
use minish_env::semantics::{ExitStatus, Field};
use minish_env::system::{self, Errno, ForkResult, Pid, WaitStatus};
use minish_env::Env;
use minish_syntax::syntax::{Pipeline, Segment};
use std::ffi::{CStr, CString};
use std::ops::ControlFlow::Continue;

/// Executes a pipeline.
///
/// The shell's exit status is updated to that of the last command. The
/// returned value is `Break` only when an in-process builtin requested a
/// divert (that is, `exit` outside a pipeline).
pub fn execute_pipeline(env: &mut Env, pipeline: &Pipeline) -> crate::Result {
    match pipeline.segments.as_slice() {
        [] => {
            env.exit_status = ExitStatus::SUCCESS;
            Continue(())
        }
        [segment] => execute_single(env, segment),
        segments => execute_multi(env, segments),
    }
}

/// Converts a segment's argument words into fields for a builtin.
fn fields_of(segment: &Segment) -> Vec<Field> {
    segment.words[1..].iter().cloned().map(Field::from).collect()
}

/// Executes one segment in the current shell environment.
fn execute_single(env: &mut Env, segment: &Segment) -> crate::Result {
    let Some(name) = segment.words.first() else {
        // A lone redirection with no command runs nothing.
        env.exit_status = ExitStatus::SUCCESS;
        return Continue(());
    };

    match search(env, &name.value) {
        Some(Target::Builtin(builtin)) => execute_builtin(env, builtin, segment),
        Some(Target::External { path }) => execute_external(env, &path, segment),
        None => {
            report_not_found(env, &name.value, segment);
            Continue(())
        }
    }
}

/// Runs a builtin in the current process, under a scoped redirection.
fn execute_builtin(env: &mut Env, builtin: Builtin, segment: &Segment) -> crate::Result {
    let args = fields_of(segment);

    let mut env = RedirGuard::new(env);
    if let Some(redir) = &segment.redir {
        if let Err(error) = env.perform_redir(redir) {
            env.print_error(&format!("minish: {error}\n"));
            env.exit_status = ExitStatus::FAILURE;
            return Continue(());
        }
    }

    let result = (builtin.execute)(&mut env, args);
    env.exit_status = result.exit_status();
    result.divert()
}

/// Reports a command that was not found, with the segment's redirection in
/// effect so that a `2>` redirection captures the message.
fn report_not_found(env: &mut Env, name: &str, segment: &Segment) {
    let mut env = RedirGuard::new(env);
    if let Some(redir) = &segment.redir {
        if let Err(error) = env.perform_redir(redir) {
            env.print_error(&format!("minish: {error}\n"));
            env.exit_status = ExitStatus::FAILURE;
            return;
        }
    }
    env.print_error(&format!("{name}: command not found\n"));
    env.exit_status = ExitStatus::NOT_FOUND;
}

/// Forks and executes an external utility, then awaits it.
fn execute_external(env: &mut Env, path: &CStr, segment: &Segment) -> crate::Result {
    // SAFETY: the child never returns to the caller; it either replaces
    // its image or exits.
    match unsafe { system::fork() } {
        Ok(ForkResult::Child) => exec_in_child(env, path, segment),
        Ok(ForkResult::Parent { child }) => {
            env.exit_status = wait_for_child(env, child);
            Continue(())
        }
        Err(errno) => {
            env.print_system_error(errno, format_args!("cannot fork a new process"));
            env.exit_status = ExitStatus::NOEXEC;
            Continue(())
        }
    }
}

/// Applies the segment's redirection permanently in a forked child.
///
/// Returns false after printing a diagnostic if the redirection failed.
fn apply_redir_in_child(env: &mut Env, segment: &Segment) -> bool {
    let Some(redir) = &segment.redir else {
        return true;
    };
    let mut guard = RedirGuard::new(env);
    match guard.perform_redir(redir) {
        Ok(()) => {
            guard.preserve_redirs();
            true
        }
        Err(error) => {
            guard.print_error(&format!("minish: {error}\n"));
            false
        }
    }
}

/// Replaces the current (child) process with an external utility.
fn exec_in_child(env: &mut Env, path: &CStr, segment: &Segment) -> ! {
    if !apply_redir_in_child(env, segment) {
        std::process::exit(ExitStatus::FAILURE.0);
    }

    let argv: Result<Vec<CString>, _> = segment
        .words
        .iter()
        .map(|word| CString::new(word.value.as_str()))
        .collect();
    let Ok(argv) = argv else {
        env.print_error("minish: invalid nul byte in command arguments\n");
        std::process::exit(ExitStatus::NOEXEC.0);
    };

    match system::execv(path, &argv) {
        Ok(infallible) => match infallible {},
        Err(errno) => {
            let name = &segment.words[0];
            env.print_error(&format!("minish: {}: {}\n", name, errno.desc()));
            let status = match errno {
                Errno::ENOENT => ExitStatus::NOT_FOUND,
                _ => ExitStatus::NOEXEC,
            };
            std::process::exit(status.0)
        }
    }
}

/// Awaits the termination of the given child.
fn wait_for_child(env: &Env, pid: Pid) -> ExitStatus {
    loop {
        match system::wait_for_child(pid) {
            Ok(WaitStatus::Exited(_, status)) => return ExitStatus(status),
            Ok(WaitStatus::Signaled(_, signal, _)) => return ExitStatus(128 + signal as i32),
            Ok(_) => (),
            Err(errno) => {
                env.print_system_error(errno, format_args!("cannot await the child process"));
                return ExitStatus::FAILURE;
            }
        }
    }
}

/// Set of pipe file descriptors that connect pipeline stages
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct PipeSet {
    /// Read end of the pipe from the previous stage
    read_previous: Option<Fd>,
    /// Reader and writer of the pipe to the next stage
    next: Option<(Fd, Fd)>,
}

impl PipeSet {
    fn new() -> Self {
        Self::default()
    }

    /// Updates the pipe set for the next stage.
    ///
    /// Closes the file descriptors that are no longer necessary in the
    /// parent and opens a new pipe if there is a next stage.
    fn shift(&mut self, has_next: bool) -> Result<(), Errno> {
        if let Some(fd) = self.read_previous {
            let _ = system::close(fd);
        }

        if let Some((reader, writer)) = self.next {
            let _ = system::close(writer);
            self.read_previous = Some(reader);
        } else {
            self.read_previous = None;
        }

        self.next = None;
        if has_next {
            self.next = Some(system::pipe()?);
        }

        Ok(())
    }

    /// Moves the pipe file descriptors onto stdin/stdout in a forked child
    /// and closes the originals.
    fn move_to_stdin_stdout(self) -> Result<(), Errno> {
        if let Some((reader, writer)) = self.next {
            debug_assert_ne!(reader, writer);
            debug_assert_ne!(self.read_previous, Some(reader));
            debug_assert_ne!(self.read_previous, Some(writer));

            system::close(reader)?;
            if writer != Fd::STDOUT {
                system::dup2(writer, Fd::STDOUT)?;
                system::close(writer)?;
            }
        }
        if let Some(reader) = self.read_previous {
            if reader != Fd::STDIN {
                system::dup2(reader, Fd::STDIN)?;
                system::close(reader)?;
            }
        }
        Ok(())
    }

    /// Closes every file descriptor this set still holds.
    fn close_all(&mut self) {
        if let Some(fd) = self.read_previous.take() {
            let _ = system::close(fd);
        }
        if let Some((reader, writer)) = self.next.take() {
            let _ = system::close(reader);
            let _ = system::close(writer);
        }
    }
}

/// Executes a pipeline of two or more segments.
fn execute_multi(env: &mut Env, segments: &[Segment]) -> crate::Result {
    let mut pipes = PipeSet::new();
    let mut pids = Vec::with_capacity(segments.len());
    let mut segments_iter = segments.iter().peekable();

    while let Some(segment) = segments_iter.next() {
        let has_next = segments_iter.peek().is_some();
        if let Err(errno) = pipes.shift(has_next) {
            return abort_pipeline(env, &mut pipes, &pids, errno, "cannot connect pipes");
        }

        // SAFETY: the child never returns to the caller; it either
        // replaces its image or exits.
        match unsafe { system::fork() } {
            Ok(ForkResult::Child) => run_pipeline_stage(env, pipes, segment),
            Ok(ForkResult::Parent { child }) => pids.push(child),
            Err(errno) => {
                return abort_pipeline(env, &mut pipes, &pids, errno, "cannot fork a new process");
            }
        }
    }

    let _ = pipes.shift(false);
    // The parent must hold no pipe fd here, or the children never see EOF.
    debug_assert_eq!(pipes, PipeSet::new());

    env.exit_status = reap_in_order(env, &pids);
    Continue(())
}

/// Cleans up after a failure in the middle of pipeline setup.
///
/// Already-forked children are terminated and reaped, and all pipe file
/// descriptors are closed.
fn abort_pipeline(
    env: &mut Env,
    pipes: &mut PipeSet,
    pids: &[Pid],
    errno: Errno,
    what: &str,
) -> crate::Result {
    env.print_system_error(errno, format_args!("{what} in the pipeline"));
    pipes.close_all();
    for &pid in pids {
        let _ = system::terminate(pid);
    }
    reap_in_order(env, pids);
    env.exit_status = ExitStatus::NOEXEC;
    Continue(())
}

/// Awaits every child in fork order and returns the status of the last.
fn reap_in_order(env: &Env, pids: &[Pid]) -> ExitStatus {
    let mut last_status = ExitStatus::SUCCESS;
    for &pid in pids {
        last_status = wait_for_child(env, pid);
    }
    last_status
}

/// Runs one stage of a multi-command pipeline in a forked child.
fn run_pipeline_stage(env: &mut Env, pipes: PipeSet, segment: &Segment) -> ! {
    if let Err(errno) = pipes.move_to_stdin_stdout() {
        env.print_system_error(errno, format_args!("cannot connect pipes in the pipeline"));
        std::process::exit(ExitStatus::NOEXEC.0);
    }

    // The segment's own redirection is applied after the pipe wiring, so
    // an explicit `>` wins over the pipe for the same file descriptor.
    let Some(name) = segment.words.first() else {
        std::process::exit(ExitStatus::SUCCESS.0);
    };
    match search(env, &name.value) {
        Some(Target::Builtin(builtin)) => {
            if !apply_redir_in_child(env, segment) {
                std::process::exit(ExitStatus::FAILURE.0);
            }
            let args = fields_of(segment);
            let result = (builtin.execute)(env, args);
            // A divert request cannot outlive this child.
            std::process::exit(result.exit_status().0)
        }
        Some(Target::External { path }) => exec_in_child(env, &path, segment),
        None => {
            report_not_found(env, &name.value, segment);
            std::process::exit(ExitStatus::NOT_FOUND.0)
        }
    }
}
