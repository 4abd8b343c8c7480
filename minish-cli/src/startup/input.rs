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

//! Selection and implementation of the line input source.
//!
//! When the standard input is a terminal, lines are read through
//! `rustyline`: the prompt is displayed, cooked-mode editing and history
//! work, and the first word of a line tab-completes to builtin names and
//! executables found in `$PATH` ([`ShellHelper`]). Otherwise lines come
//! from a plain buffered stream with no prompt, which is what scripted
//! use and the test suite see.

use minish_env::input::Input;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::io::{BufRead, IsTerminal, StdinLock};

/// The prompt written before each interactive read
const PROMPT: &str = "$ ";

/// Picks the input source for this invocation of the shell.
pub fn prepare_input(builtin_names: Vec<&'static str>) -> Box<dyn Input> {
    if std::io::stdin().is_terminal() {
        if let Ok(editor) = LineEditor::new(builtin_names) {
            return Box::new(editor);
        }
    }
    Box::new(Stream::new())
}

/// Plain line input from the standard input, prompt-less
pub struct Stream {
    stdin: StdinLock<'static>,
}

impl Stream {
    pub fn new() -> Stream {
        Stream {
            stdin: std::io::stdin().lock(),
        }
    }
}

impl Default for Stream {
    fn default() -> Stream {
        Stream::new()
    }
}

impl Input for Stream {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stdin.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                }
                Some(line)
            }
        }
    }
}

/// Interactive line input through `rustyline`
pub struct LineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl LineEditor {
    pub fn new(builtin_names: Vec<&'static str>) -> rustyline::Result<LineEditor> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(ShellHelper::new(builtin_names)));
        Ok(LineEditor { editor })
    }
}

impl Input for LineEditor {
    fn next_line(&mut self) -> Option<String> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            // An interrupted edit abandons the line and prompts again.
            Err(ReadlineError::Interrupted) => Some(String::new()),
            Err(_) => None,
        }
    }
}

/// `rustyline` helper providing command-name completion
///
/// The first word of a line completes to builtin names and to executables
/// found in the directories of `$PATH`; any later word completes as a
/// filesystem path.
pub struct ShellHelper {
    builtin_names: Vec<&'static str>,
    filenames: FilenameCompleter,
}

impl ShellHelper {
    pub fn new(builtin_names: Vec<&'static str>) -> ShellHelper {
        ShellHelper {
            builtin_names,
            filenames: FilenameCompleter::new(),
        }
    }

    /// Collects the command names that start with the given prefix.
    fn command_candidates(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .builtin_names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| (*name).to_owned())
            .collect();

        if let Some(path) = std::env::var_os("PATH") {
            for dir in std::env::split_paths(&path) {
                let Ok(entries) = std::fs::read_dir(dir) else {
                    continue;
                };
                for entry in entries.flatten() {
                    let Ok(name) = entry.file_name().into_string() else {
                        continue;
                    };
                    if name.starts_with(prefix) && is_executable_entry(&entry) {
                        names.push(name);
                    }
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }
}

fn is_executable_entry(entry: &std::fs::DirEntry) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match entry.metadata() {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let word_start = before
            .rfind([' ', '\t'])
            .map(|index| index + 1)
            .unwrap_or(0);

        // Only the command position completes to command names.
        if line[..word_start].trim().is_empty() {
            let prefix = &before[word_start..];
            let candidates = self
                .command_candidates(prefix)
                .into_iter()
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: format!("{name} "),
                })
                .collect();
            return Ok((word_start, candidates));
        }

        self.filenames.complete(line, pos, ctx)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> ShellHelper {
        ShellHelper::new(vec!["echo", "exit", "cd"])
    }

    #[test]
    fn builtin_names_complete_by_prefix() {
        let candidates = helper().command_candidates("e");
        assert!(candidates.contains(&"echo".to_owned()));
        assert!(candidates.contains(&"exit".to_owned()));
        assert!(!candidates.contains(&"cd".to_owned()));
    }

    #[test]
    fn candidates_are_sorted_and_unique() {
        // `echo` may be both a builtin and an executable in `$PATH`; it
        // must appear only once either way.
        let candidates = helper().command_candidates("echo");
        let occurrences = candidates.iter().filter(|name| *name == "echo").count();
        assert_eq!(occurrences, 1);
        let mut sorted = candidates.clone();
        sorted.sort();
        assert_eq!(candidates, sorted);
    }
}
