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
//! XML fragment formatter (spec §6.6). Out-of-scope for core correctness;
//! a total, deterministic rendering of the populated fields.

use crate::record::PackageRecord;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn attr(out: &mut String, key: &str, value: &str) {
    if !value.is_empty() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
}

/// Render `record` as a single self-closing `<package>` XML element.
pub fn format(record: &PackageRecord) -> String {
    let mut out = String::from("<package");
    attr(&mut out, "name", &record.name());
    attr(&mut out, "arch", &record.arch());
    attr(&mut out, "version", &record.version());
    attr(&mut out, "release", &record.release());
    attr(&mut out, "flags", &record.flags());
    attr(&mut out, "context", &record.context());
    out.push_str("/>");
    out
}


// vim: foldmethod=marker
