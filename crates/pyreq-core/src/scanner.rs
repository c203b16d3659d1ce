//! Shared lexical rules for specifier parsing.
//!
//! [`Cursor`] scans one borrowed line with byte-offset tracking and produces
//! tokens on demand. A cursor is created fresh per parse call and carries no
//! state across calls. Whitespace is insignificant between tokens; version
//! text is returned verbatim.

use crate::types::Comparator;

/// Offset-tracking scanner over a single specifier line.
#[derive(Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset into the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Consumes and returns the remainder of the input.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        rest
    }

    pub fn eat_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Consumes `expected` if it is the next character.
    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Identifier token: letters, digits, `-`, `_`, `.`; must start with an
    /// alphanumeric character. Returns `None` without consuming on a miss.
    pub fn take_identifier(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(c) if c.is_ascii_alphanumeric() => {}
            _ => return None,
        }
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        Some(&self.input[start..self.pos])
    }

    /// Comparator token, longest match first (`===` before `==`, `<=` before
    /// `<`). Returns `None` without consuming when the input does not start
    /// with a recognized operator.
    pub fn take_comparator(&mut self) -> Option<Comparator> {
        for (text, op) in Comparator::OPERATORS {
            if self.input[self.pos..].starts_with(text) {
                self.pos += text.len();
                return Some(op);
            }
        }
        None
    }

    /// True when the next character could begin a comparator token. Used to
    /// tell "no constraint here" apart from "operator-like but unrecognized".
    pub fn at_comparator_start(&self) -> bool {
        matches!(self.peek(), Some('<' | '>' | '=' | '!' | '~'))
    }

    /// Version token: digits, letters, `.`, `*`, `+`, `!`, `-`, `_`. Covers
    /// epochs (`1!2.0`), pre/post/dev suffixes, local segments (`+local`) and
    /// trailing wildcards (`4.*`). Returned verbatim.
    pub fn take_version(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '*' | '+' | '!' | '-' | '_') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            None
        } else {
            Some(&self.input[start..self.pos])
        }
    }

    /// URL token: maximal non-whitespace run.
    pub fn take_url(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
        if self.pos == start {
            None
        } else {
            Some(&self.input[start..self.pos])
        }
    }
}
