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
//! Shell-eval formatter (spec §6.6): renders a record as `PKG_*` shell
//! variable assignments suitable for `eval`.

use crate::record::PackageRecord;

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Render `record` as a sequence of `PKG_NAME=...` shell assignments,
/// one per populated field.
pub fn format(record: &PackageRecord) -> String {
    let mut lines = vec![format!("PKG_NAME={}", shell_quote(&record.name()))];
    if record.has_arch() {
        lines.push(format!("PKG_ARCH={}", shell_quote(&record.arch())));
    }
    lines.push(format!("PKG_VERSION={}", shell_quote(&record.version())));
    lines.push(format!("PKG_RELEASE={}", shell_quote(&record.release())));
    if record.has_flags() {
        lines.push(format!("PKG_FLAGS={}", shell_quote(&record.flags())));
    }
    if record.has_context() {
        lines.push(format!("PKG_CONTEXT={}", shell_quote(&record.context())));
    }
    lines.join("\n")
}


// vim: foldmethod=marker
