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
//! Crate-wide error taxonomy.
//!
//! Every fallible operation in this crate returns this [Error] type rather
//! than a module-local one; the variants mirror the taxonomy of spec §7 --
//! bad input, merge conflicts, missing records, allocator-level resource
//! failure, stream I/O, and internal invariant violations.

use std::fmt;

/// Error conditions which may be encountered anywhere in this crate.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A field failed validation, a spec line was malformed, or a prefix
    /// character was not one of the recognized set.
    InvalidInput {
        /// Name of the field (or parser production) that failed.
        field: &'static str,
        /// Human-readable detail.
        message: String,
    },

    /// A merge was rejected: a pinned version, an unresolved priority tie,
    /// or an outright version conflict.
    Conflict(String),

    /// An operation expected a record or bucket that was not present.
    NotFound(String),

    /// The underlying allocator or container bookkeeping failed.
    Resource(String),

    /// Failure reading or opening an ingestion stream.
    Io(String),

    /// An invariant that this crate is supposed to uphold internally was
    /// violated; seeing this means there's a bug in this crate, not in
    /// the caller's input.
    Internal(String),
}

impl Error {
    /// Build an [Error::InvalidInput] for the named field.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Attach package identity context to an error message, per spec §7's
    /// "for package '<spec>'" convention.
    pub fn with_package(self, spec: &str) -> Self {
        let suffix = format!(" for package '{spec}'");
        match self {
            Error::InvalidInput { field, message } => Error::InvalidInput {
                field,
                message: message + &suffix,
            },
            Error::Conflict(message) => Error::Conflict(message + &suffix),
            Error::NotFound(message) => Error::NotFound(message + &suffix),
            Error::Resource(message) => Error::Resource(message + &suffix),
            Error::Io(message) => Error::Io(message + &suffix),
            Error::Internal(message) => Error::Internal(message + &suffix),
        }
    }

    /// Prefix an error with `<file>:<line>: ` per spec §4.6/§7's ingestion
    /// stream-location convention.
    pub fn with_location(self, file: &str, line: usize) -> Self {
        let prefix = format!("{file}:{line}: ");
        match self {
            Error::InvalidInput { field, message } => Error::InvalidInput {
                field,
                message: prefix + &message,
            },
            Error::Conflict(message) => Error::Conflict(prefix + &message),
            Error::NotFound(message) => Error::NotFound(prefix + &message),
            Error::Resource(message) => Error::Resource(prefix + &message),
            Error::Io(message) => Error::Io(prefix + &message),
            Error::Internal(message) => Error::Internal(prefix + &message),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
            Error::Conflict(message) => write!(f, "{message}"),
            Error::NotFound(message) => write!(f, "not found: {message}"),
            Error::Resource(message) => write!(f, "resource error: {message}"),
            Error::Io(message) => write!(f, "i/o error: {message}"),
            Error::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_package_appends_identity_suffix() {
        let err = Error::Conflict("Version conflict".into()).with_package("foo");
        assert_eq!("Version conflict for package 'foo'", err.to_string());
    }

    #[test]
    fn with_location_prepends_file_and_line() {
        let err = Error::invalid("name", "empty").with_location("manifest.h", 12);
        assert_eq!("invalid name: manifest.h:12: empty", err.to_string());
    }
}

// vim: foldmethod=marker
