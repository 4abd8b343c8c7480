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

//! Abstraction of the source of command lines.
//!
//! The read-eval loop pulls lines through the [`Input`] trait and does not
//! care where they come from: an interactive line editor, a plain byte
//! stream, or an in-memory script in tests ([`Memory`]).

/// Source of command lines
pub trait Input {
    /// Reads the next line, without its trailing newline.
    ///
    /// Returns `None` at the end of input. An interactive implementation
    /// writes the prompt, handles editing, and records history before
    /// returning; none of that is visible here.
    fn next_line(&mut self) -> Option<String>;
}

/// Input function that provides lines from an in-memory string
///
/// This is mainly for testing the read-eval loop.
#[derive(Clone, Debug)]
pub struct Memory {
    lines: std::vec::IntoIter<String>,
}

impl Memory {
    /// Creates an input function from the given script.
    #[must_use]
    pub fn new(script: &str) -> Memory {
        let lines = script
            .lines()
            .map(str::to_owned)
            .collect::<Vec<String>>()
            .into_iter();
        Memory { lines }
    }
}

impl Input for Memory {
    fn next_line(&mut self) -> Option<String> {
        self.lines.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_yields_lines_then_none() {
        let mut input = Memory::new("echo a\necho b\n");
        assert_eq!(input.next_line().as_deref(), Some("echo a"));
        assert_eq!(input.next_line().as_deref(), Some("echo b"));
        assert_eq!(input.next_line(), None);
    }

    #[test]
    fn memory_of_empty_script_is_immediately_exhausted() {
        let mut input = Memory::new("");
        assert_eq!(input.next_line(), None);
    }
}
