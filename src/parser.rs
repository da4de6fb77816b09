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
//! The Spec Parser (spec §4.2, §6.1): a deterministic, hand-rolled
//! left-then-right-to-left scanner over a single already-trimmed line.
//!
//! This is implemented as a plain `&str`-slicing state machine rather than
//! a `pest` grammar. The algorithm is an explicit sequence of prefix/affix
//! scans, not a recursive grammar -- the teacher crate itself reaches for
//! `pest` only where the format is genuinely recursive (`Dependency`,
//! `RawParagraph`) and hand-rolls `FromStr` for formats that are not
//! (`Version`); this format falls in the latter camp.

use crate::context::{ContextValidator, PermissiveContextValidator};
use crate::error::Error;
use crate::record::{Prefix, PackageRecord};

fn is_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Parse a single already-trimmed spec line into a [PackageRecord], using
/// the permissive default [ContextValidator].
pub fn parse(line: &str) -> Result<PackageRecord, Error> {
    parse_with(line, &PermissiveContextValidator)
}

/// Parse a single already-trimmed spec line into a [PackageRecord],
/// validating any context expression with the supplied `validator`.
pub fn parse_with(line: &str, validator: &dyn ContextValidator) -> Result<PackageRecord, Error> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Error::invalid("spec", "empty spec line"));
    }

    let mut rest = line;

    // 1. PREFIX
    let mut prefix: Option<Prefix> = None;
    if let Some(first) = rest.chars().next() {
        if !is_word(first) {
            prefix = Some(Prefix::try_from(first)?);
            rest = &rest[first.len_utf8()..];
        }
    }

    // 2. ARCH2 (forward scan)
    let mut arch2: Option<&str> = None;
    if let Some(slash_idx) = rest.find('/') {
        let candidate = &rest[..slash_idx];
        if !candidate.is_empty() && candidate.chars().all(is_word) {
            arch2 = Some(candidate);
            rest = &rest[slash_idx + 1..];
        }
    }

    // 3. CONTEXT (backward scan, bracket matching)
    let mut context: Option<&str> = None;
    if rest.ends_with(']') {
        let mut depth = 0i32;
        let mut open_idx = None;
        for (i, ch) in rest.char_indices().rev() {
            match ch {
                ']' => depth += 1,
                '[' => {
                    depth -= 1;
                    if depth == 0 {
                        open_idx = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let open_idx = open_idx.ok_or_else(|| Error::invalid("context", "unmatched ']' in spec line"))?;
        context = Some(&rest[open_idx + 1..rest.len() - 1]);
        rest = &rest[..open_idx];
    }

    // 4. FLAGS (backward scan, stop at first '/' or '-')
    let mut flags: Option<&str> = None;
    {
        let mut colon_idx = None;
        for (i, ch) in rest.char_indices().rev() {
            match ch {
                ':' => {
                    colon_idx = Some(i);
                    break;
                }
                '/' | '-' => break,
                _ => {}
            }
        }
        if let Some(idx) = colon_idx {
            flags = Some(&rest[idx + 1..]);
            rest = &rest[..idx];
        }
    }

    // 5. ARCH1 (backward scan for a remaining '/')
    let mut arch1: Option<&str> = None;
    if let Some(slash_idx) = rest.rfind('/') {
        arch1 = Some(&rest[slash_idx + 1..]);
        rest = &rest[..slash_idx];
    }
    let arch = arch2.or(arch1);

    // 6. RELEASE then VERSION (both required, backward scans)
    let dash_idx = rest
        .rfind('-')
        .ok_or_else(|| Error::invalid("release", "spec line is missing '-RELEASE'"))?;
    let release = &rest[dash_idx + 1..];
    if release.is_empty() {
        return Err(Error::invalid("release", "release must be non-empty"));
    }
    rest = &rest[..dash_idx];

    let dash_idx = rest
        .rfind('-')
        .ok_or_else(|| Error::invalid("version", "spec line is missing '-VERSION'"))?;
    let version = &rest[dash_idx + 1..];
    if version.is_empty() {
        return Err(Error::invalid("version", "version must be non-empty"));
    }

    // 7. NAME (remainder)
    let name = &rest[..dash_idx];
    if name.is_empty() {
        return Err(Error::invalid("name", "name must be non-empty"));
    }

    let record = PackageRecord::new();
    record.set_name(name)?;
    record.set_version(version)?;
    record.set_release(release)?;
    if let Some(arch) = arch {
        record.set_arch(arch)?;
    }
    if let Some(flags) = flags {
        record.set_flags(flags)?;
    }
    if let Some(context) = context {
        record.set_context(context, validator)?;
    }
    if let Some(prefix) = prefix {
        record.set_prefix(prefix);
    }
    Ok(record)
}


// vim: foldmethod=marker
