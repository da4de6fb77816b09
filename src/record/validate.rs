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
//! Field validators for [super::PackageRecord] setters. Each returns a
//! structured [Error] rather than a bare `bool` so setters can surface a
//! useful message, while [valid] predicates (used by the parser, which
//! wants a plain boolean before it commits to an [Error] variant of its
//! own) stay pure booleans.

use crate::error::Error;

fn first_char_alnum(s: &str) -> bool {
    s.chars().next().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false)
}

/// `name`: non-empty; first character alphanumeric; remaining characters
/// from `[A-Za-z0-9_.+-]`.
pub fn is_valid_name(s: &str) -> bool {
    !s.is_empty()
        && first_char_alnum(s)
        && s.chars()
            .skip(1)
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
}

/// `arch`: non-empty; characters from `[A-Za-z0-9_-]`.
pub fn is_valid_arch(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

/// `version`/`release`: non-empty; must not contain `-` or whitespace.
pub fn is_valid_version(s: &str) -> bool {
    !s.is_empty() && !s.contains('-') && !s.chars().any(char::is_whitespace)
}

/// `flags`: non-empty; characters from `[A-Za-z0-9]`.
pub fn is_valid_flags(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validate `name`, returning a field-tagged [Error] on failure.
pub fn validate_name(s: &str) -> Result<(), Error> {
    if is_valid_name(s) {
        Ok(())
    } else {
        Err(Error::invalid("name", format!("'{s}' is not a valid package name")))
    }
}

/// Validate `arch`, returning a field-tagged [Error] on failure.
pub fn validate_arch(s: &str) -> Result<(), Error> {
    if is_valid_arch(s) {
        Ok(())
    } else {
        Err(Error::invalid("arch", format!("'{s}' is not a valid architecture")))
    }
}

/// Validate `version`, returning a field-tagged [Error] on failure.
pub fn validate_version(s: &str) -> Result<(), Error> {
    if is_valid_version(s) {
        Ok(())
    } else {
        Err(Error::invalid("version", format!("'{s}' is not a valid version")))
    }
}

/// Validate `release`, returning a field-tagged [Error] on failure.
pub fn validate_release(s: &str) -> Result<(), Error> {
    if is_valid_version(s) {
        Ok(())
    } else {
        Err(Error::invalid("release", format!("'{s}' is not a valid release")))
    }
}

/// Validate `flags`, returning a field-tagged [Error] on failure.
pub fn validate_flags(s: &str) -> Result<(), Error> {
    if is_valid_flags(s) {
        Ok(())
    } else {
        Err(Error::invalid("flags", format!("'{s}' is not a valid flag set")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requires_alnum_start() {
        assert!(is_valid_name("foo-bar.1_2"));
        assert!(!is_valid_name("_foo"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn arch_rejects_dots() {
        assert!(is_valid_arch("x86_64"));
        assert!(!is_valid_arch("x86.64"));
    }

    #[test]
    fn version_rejects_dash_and_whitespace() {
        assert!(is_valid_version("1.2.3"));
        assert!(!is_valid_version("1-2"));
        assert!(!is_valid_version("1 2"));
        assert!(!is_valid_version(""));
    }

    #[test]
    fn flags_alnum_only() {
        assert!(is_valid_flags("dev3"));
        assert!(!is_valid_flags("dev-3"));
    }
}

// vim: foldmethod=marker
