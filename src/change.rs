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
//! Change codes returned by mutating container operations.

use std::fmt;

/// Outcome of a mutating operation against a [crate::list::PackageList] or
/// [crate::set::PackageSet].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// Accepted, but nothing structural changed.
    None,
    /// A new record was appended.
    Added,
    /// An existing record was removed with nothing taking its place.
    Removed,
    /// An existing record was removed and a new one appended in its place.
    Replaced,
    /// Aggregate result of a multi-record operation where at least one
    /// sub-operation was non-[Change::None].
    Modified,
    /// The operation was rejected; see the accompanying [crate::error::Error].
    Error,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Change::None => "none",
            Change::Added => "added",
            Change::Removed => "removed",
            Change::Replaced => "replaced",
            Change::Modified => "modified",
            Change::Error => "error",
        };
        write!(f, "{s}")
    }
}

// vim: foldmethod=marker
