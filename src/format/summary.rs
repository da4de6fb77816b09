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
//! One-line human summary formatter (spec §6.6).

use crate::record::PackageRecord;

/// Render a short human-readable summary: `name full_version (arch)
/// [flags]`, omitting the parenthesized/bracketed segments when absent.
pub fn format(record: &PackageRecord) -> String {
    let mut out = format!("{} {}", record.name(), record.full_version());
    if record.has_arch() {
        out.push_str(&format!(" ({})", record.arch()));
    }
    if record.has_flags() {
        out.push_str(&format!(" [{}]", record.flags()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn includes_arch_and_flags_when_present() {
        let record = parser::parse("foo-1-1/x86_64:dev").unwrap();
        assert_eq!("foo 1-1 (x86_64) [dev]", format(&record));
    }

    #[test]
    fn bare_when_arch_and_flags_absent() {
        let record = parser::parse("foo-1-1").unwrap();
        assert_eq!("foo 1-1", format(&record));
    }
}

// vim: foldmethod=marker
