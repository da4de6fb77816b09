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
//! The canonical spec-line formatter (spec §6.1), the exact inverse of
//! [crate::parser::parse].

use crate::record::PackageRecord;
use crate::rules::Options;

/// Format `record` as a canonical spec line:
/// `[PREFIX]NAME-VERSION-RELEASE[/ARCH][:FLAGS][[CONTEXT]]`.
///
/// `default_arch`, when supplied, suppresses the `/ARCH` segment if the
/// record's architecture matches it exactly.
pub fn format(record: &PackageRecord, default_arch: Option<&str>, options: Options) -> String {
    let mut out = String::new();

    if !options.contains(Options::NOPREFIX) {
        if let Some(prefix) = record.prefix() {
            out.push_str(&prefix.to_string());
        }
    }

    out.push_str(&record.name());
    out.push('-');
    out.push_str(&record.full_version());

    if record.has_arch() && default_arch != Some(&*record.arch()) {
        out.push('/');
        out.push_str(&record.arch());
    }

    if record.has_flags() {
        out.push(':');
        out.push_str(&record.flags());
    }

    if record.has_context() && !options.contains(Options::NOCONTEXT) {
        out.push('[');
        out.push_str(&record.context());
        out.push(']');
    }

    if options.contains(Options::NEWLINE) {
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn formats_minimal_record() {
        let record = parser::parse("foo-1-1").unwrap();
        assert_eq!("foo-1-1", format(&record, None, Options::NONE));
    }

    #[test]
    fn omits_arch_matching_default() {
        let record = parser::parse("foo-1-1/x86_64").unwrap();
        assert_eq!("foo-1-1", format(&record, Some("x86_64"), Options::NONE));
        assert_eq!("foo-1-1/x86_64", format(&record, Some("armel"), Options::NONE));
    }

    #[test]
    fn suppresses_prefix_and_context_when_asked() {
        let record = parser::parse("+foo-1-1[!server]").unwrap();
        let options = Options::NOPREFIX | Options::NOCONTEXT;
        assert_eq!("foo-1-1", format(&record, None, options));
    }

    #[test]
    fn missing_version_release_render_as_wildcard() {
        let record = PackageRecord::new();
        record.set_name("foo").unwrap();
        assert_eq!("foo-*-*", format(&record, None, Options::NONE));
    }

    #[test]
    fn newline_option_appends_trailing_newline() {
        let record = parser::parse("foo-1-1").unwrap();
        assert_eq!("foo-1-1\n", format(&record, None, Options::NEWLINE));
    }
}

// vim: foldmethod=marker
