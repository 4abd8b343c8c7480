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

//! End-to-end tests that drive the `minish` binary with scripted standard
//! input and examine its output and exit status. The standard input is a
//! pipe, not a terminal, so the shell reads plainly and prints no prompt.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_minish");

/// Runs the shell with the given script as its standard input.
fn run_shell_in<F>(script: &str, configure: F) -> Output
where
    F: FnOnce(&mut Command),
{
    let mut command = Command::new(BIN);
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    configure(&mut command);

    let mut child = command.spawn().unwrap();
    // The shell may exit (e.g. on `exit`) before the whole script is
    // consumed; a failed write only means that.
    let _ = child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes());
    child.wait_with_output().unwrap()
}

fn run_shell(script: &str) -> Output {
    run_shell_in(script, |_| ())
}

fn stdout_of(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

fn stderr_of(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).unwrap()
}

#[test]
fn echo_prints_its_arguments() {
    let output = run_shell("echo hello world\n");
    assert_eq!(stdout_of(&output), "hello world\n");
    assert_eq!(stderr_of(&output), "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn quoting_is_resolved_before_echo_sees_its_arguments() {
    let output = run_shell("echo 'a  b'   \"c\\$d\"\n");
    assert_eq!(stdout_of(&output), "a  b c$d\n");
}

#[test]
fn adjacent_quoted_runs_form_one_argument() {
    let output = run_shell("echo foo\"bar\"'baz'\n");
    assert_eq!(stdout_of(&output), "foobarbaz\n");
}

#[test]
fn backslash_escapes_in_bare_words() {
    let output = run_shell("echo a\\ b\n");
    assert_eq!(stdout_of(&output), "a b\n");
}

#[test]
fn type_identifies_builtins_path_commands_and_unknowns() {
    let output = run_shell("type echo\n");
    assert_eq!(stdout_of(&output), "echo is a shell builtin\n");

    let output = run_shell("type cat\n");
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("cat is /"), "stdout = {stdout:?}");
    assert!(stdout.ends_with("/cat\n"), "stdout = {stdout:?}");

    let output = run_shell("type nosuch\n");
    assert_eq!(stdout_of(&output), "nosuch: not found\n");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn pwd_prints_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let expected = dir.path().canonicalize().unwrap();
    let output = run_shell_in("pwd\n", |command| {
        command.current_dir(dir.path());
    });
    assert_eq!(stdout_of(&output), format!("{}\n", expected.display()));
}

#[test]
fn cd_changes_the_directory_for_later_commands() {
    let output = run_shell("cd /\npwd\n");
    assert_eq!(stdout_of(&output), "/\n");
}

#[test]
fn cd_expands_a_leading_tilde_to_home() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().canonicalize().unwrap();
    let output = run_shell_in("cd ~\npwd\n", |command| {
        command.env("HOME", &home);
    });
    assert_eq!(stdout_of(&output), format!("{}\n", home.display()));
}

#[test]
fn cd_without_operand_is_an_error() {
    let output = run_shell("cd\n");
    assert_eq!(stderr_of(&output), "cd: missing argument\n");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn cd_reports_chdir_failures_and_continues() {
    let output = run_shell("cd /no/such/dir\necho still here\n");
    assert!(
        stderr_of(&output).starts_with("cd: /no/such/dir: "),
        "stderr = {:?}",
        stderr_of(&output)
    );
    assert_eq!(stdout_of(&output), "still here\n");
}

#[test]
fn unknown_command_reports_not_found_on_stderr() {
    let output = run_shell("nosuchcmd\n");
    assert_eq!(stderr_of(&output), "nosuchcmd: command not found\n");
    assert_eq!(stdout_of(&output), "");
    assert_eq!(output.status.code(), Some(127));
}

#[test]
fn exit_terminates_the_shell_with_the_given_status() {
    let output = run_shell("exit 42\necho after\n");
    assert_eq!(stdout_of(&output), "");
    assert_eq!(output.status.code(), Some(42));
}

#[test]
fn exit_without_operand_exits_zero_even_after_a_failure() {
    let output = run_shell("nosuchcmd\nexit\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn exit_with_non_numeric_operand_keeps_the_shell_running() {
    let output = run_shell("exit oops\necho still here\n");
    assert_eq!(stderr_of(&output), "exit: oops: numeric argument required\n");
    assert_eq!(stdout_of(&output), "still here\n");
}

#[test]
fn syntax_error_abandons_the_line_and_the_shell_continues() {
    let output = run_shell("echo 'oops\necho ok\n");
    assert!(
        stderr_of(&output).contains("unmatched single quote"),
        "stderr = {:?}",
        stderr_of(&output)
    );
    assert_eq!(stdout_of(&output), "ok\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn lone_syntax_error_exits_with_error_status() {
    let output = run_shell("echo |\n");
    assert!(
        stderr_of(&output).contains("empty command in pipeline"),
        "stderr = {:?}",
        stderr_of(&output)
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn stdout_redirection_truncates_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let script = "echo one > f\n\
                  echo two >> f\n\
                  cat f\n\
                  echo three > f\n\
                  cat f\n";
    let output = run_shell_in(script, |command| {
        command.current_dir(dir.path());
    });
    assert_eq!(stdout_of(&output), "one\ntwo\nthree\n");
}

#[test]
fn explicit_fd_one_redirection_works_like_plain() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_shell_in("echo x 1> f\ncat f\n", |command| {
        command.current_dir(dir.path());
    });
    assert_eq!(stdout_of(&output), "x\n");
}

#[test]
fn stderr_redirection_of_a_builtin_captures_nothing_extra() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_shell_in("echo oops 2> e\ncat e\n", |command| {
        command.current_dir(dir.path());
    });
    // echo wrote nothing to stderr, so the file is empty and the message
    // went to stdout as usual.
    assert_eq!(stdout_of(&output), "oops\n");
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn stderr_redirection_captures_not_found_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_shell_in("nosuchcmd 2> e\ncat e\n", |command| {
        command.current_dir(dir.path());
    });
    assert_eq!(stdout_of(&output), "nosuchcmd: command not found\n");
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn redirection_target_parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_shell_in("echo deep > a/b/c/out\ncat a/b/c/out\n", |command| {
        command.current_dir(dir.path());
    });
    assert_eq!(stdout_of(&output), "deep\n");
}

#[test]
fn quoted_redirection_target_may_contain_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_shell_in("echo hi > 'my file'\ncat 'my file'\n", |command| {
        command.current_dir(dir.path());
    });
    assert_eq!(stdout_of(&output), "hi\n");
}

#[test]
fn pipeline_feeds_builtin_output_into_an_external() {
    let output = run_shell("echo hello | cat\n");
    assert_eq!(stdout_of(&output), "hello\n");
}

#[test]
fn pipeline_counts_words_with_wc() {
    let output = run_shell("echo one two three | wc -w\n");
    assert_eq!(stdout_of(&output).trim(), "3");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn three_stage_pipeline_passes_data_through() {
    let output = run_shell("echo x | cat | cat\n");
    assert_eq!(stdout_of(&output), "x\n");
}

#[test]
fn pipeline_status_is_the_last_stage_status() {
    let output = run_shell("sh -c 'exit 3' | sh -c 'exit 5'\n");
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn pipeline_segments_honor_their_own_redirections() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_shell_in("echo gone > f | cat\ncat f\n", |command| {
        command.current_dir(dir.path());
    });
    // The first stage's output went to the file, so the pipe carried
    // nothing; the later cat shows the file content.
    assert_eq!(stdout_of(&output), "gone\n");
}

#[test]
fn unquoted_pipe_splits_but_quoted_pipe_does_not() {
    let output = run_shell("echo 'a|b'\n");
    assert_eq!(stdout_of(&output), "a|b\n");
}

#[test]
fn blank_lines_are_ignored() {
    let output = run_shell("\n\n   \necho done\n");
    assert_eq!(stdout_of(&output), "done\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn end_of_input_reports_the_last_command_status() {
    let output = run_shell("sh -c 'exit 9'\n");
    assert_eq!(output.status.code(), Some(9));
}
