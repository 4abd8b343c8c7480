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

//! Syntactic entities a parsed command line is made of.
//!
//! Every entity is created when a line is parsed and dropped when its
//! execution completes. Nothing defined here survives across prompts.

use itertools::Itertools;
use std::fmt;
use std::os::unix::io::RawFd;

/// File descriptor
///
/// This is the shell's own representation of a file descriptor: a transparent
/// wrapper around the raw integer the kernel uses.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fd(pub RawFd);

impl Fd {
    /// File descriptor for the standard input
    pub const STDIN: Fd = Fd(0);
    /// File descriptor for the standard output
    pub const STDOUT: Fd = Fd(1);
    /// File descriptor for the standard error
    pub const STDERR: Fd = Fd(2);
}

impl From<RawFd> for Fd {
    fn from(raw_fd: RawFd) -> Fd {
        Fd(raw_fd)
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Quoting-resolved token passed as an argument to a command
///
/// A word stores its final literal value; quote and escape characters have
/// already been interpreted and removed by the
/// [lexer](crate::parser::lex::split_words). Adjacent quoted and unquoted
/// runs of the input concatenate into a single word, so `foo"bar"'baz'`
/// produces one word with the value `foobarbaz`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Word {
    /// Literal value of this word
    pub value: String,
}

impl Word {
    /// Creates a word with the given literal value.
    pub fn new<S: Into<String>>(value: S) -> Word {
        Word {
            value: value.into(),
        }
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Word {
        Word::new(value)
    }
}

impl From<String> for Word {
    fn from(value: String) -> Word {
        Word { value }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Redirection operator
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirOp {
    /// `>`: opens the target file for writing, truncating it
    FileOut,
    /// `>>`: opens the target file for appending
    FileAppend,
}

impl fmt::Display for RedirOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirOp::FileOut => ">".fmt(f),
            RedirOp::FileAppend => ">>".fmt(f),
        }
    }
}

/// Directive that rewires one of a command's file descriptors to a file
///
/// Only output redirections exist in this shell; `<` forms and fd-copying
/// forms like `2>&1` are not part of the syntax.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redir {
    /// File descriptor the redirection applies to
    pub fd: Fd,
    /// Redirection operator
    pub op: RedirOp,
    /// Pathname of the target file
    pub target: Word,
}

impl Redir {
    /// Creates a redirection of the standard output.
    pub fn stdout<W: Into<Word>>(op: RedirOp, target: W) -> Redir {
        Redir {
            fd: Fd::STDOUT,
            op,
            target: target.into(),
        }
    }
}

impl fmt::Display for Redir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fd != Fd::STDOUT {
            write!(f, "{}", self.fd)?;
        }
        write!(f, "{} {}", self.op, self.target)
    }
}

/// One command of a pipeline: words plus an optional redirection
///
/// A segment with no words is a no-op when it is the whole line; inside a
/// multi-stage pipeline it is rejected by the parser.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    /// Command name and arguments, in order
    pub words: Vec<Word>,
    /// Redirection extracted from this segment, if any
    pub redir: Option<Redir>,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.iter().format(" "))?;
        if let Some(redir) = &self.redir {
            if !self.words.is_empty() {
                write!(f, " ")?;
            }
            write!(f, "{}", redir)?;
        }
        Ok(())
    }
}

/// Ordered chain of segments connected by anonymous pipes
///
/// A pipeline of length 1 is the common case and runs without any pipe.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    /// Segments, in left-to-right order; never empty
    pub segments: Vec<Segment>,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().format(" | "))
    }
}
