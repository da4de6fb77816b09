// {{{ Copyright (c) LCFG Project, 2024
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE. }}}
//! The single-character prefix operator on a spec line (spec §3.1, §4.4).

use crate::error::Error;
use std::fmt;

/// A prefix operator, consumed by the merge engine (spec §4.4) rather than
/// the parser -- the parser only recognizes and stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// `+` -- add, replacing any existing record unconditionally.
    Add,
    /// `-` -- remove any existing record; do not add a new one.
    Remove,
    /// `=` -- add and pin; future non-`=` merges against this key are
    /// rejected until the pinned record itself is removed or replaced.
    Pin,
    /// `?` -- replace if present, otherwise no-op.
    IfPresent,
    /// `~` -- add only if absent, otherwise no-op.
    IfAbsent,
}

impl Prefix {
    /// The fixed set of characters recognized as prefixes.
    pub const CHARS: [char; 5] = ['+', '-', '=', '?', '~'];

    /// Render back to the single character this variant was parsed from.
    pub const fn as_char(self) -> char {
        match self {
            Prefix::Add => '+',
            Prefix::Remove => '-',
            Prefix::Pin => '=',
            Prefix::IfPresent => '?',
            Prefix::IfAbsent => '~',
        }
    }
}

impl TryFrom<char> for Prefix {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self, Error> {
        match ch {
            '+' => Ok(Prefix::Add),
            '-' => Ok(Prefix::Remove),
            '=' => Ok(Prefix::Pin),
            '?' => Ok(Prefix::IfPresent),
            '~' => Ok(Prefix::IfAbsent),
            other => Err(Error::invalid(
                "prefix",
                format!("'{other}' is not a valid prefix character"),
            )),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}


// vim: foldmethod=marker
