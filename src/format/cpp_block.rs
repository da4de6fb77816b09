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
//! CPP-block formatter (spec §6.6): renders a record as the pragma
//! block plus spec line that a manifest `cpp`-preprocessed source would
//! contain, the inverse shape of [crate::ingest::cpp]'s pragma handling.

use crate::record::PackageRecord;
use crate::rules::Options;

/// Render `record` as a `#pragma LCFG ...` metadata block (when
/// `Options::USE_META` is set and the corresponding field is present)
/// followed by its canonical spec line.
pub fn format(record: &PackageRecord, default_arch: Option<&str>, options: Options) -> String {
    let mut out = String::new();
    if options.contains(Options::USE_META) {
        if record.has_derivation() {
            out.push_str(&format!("#pragma LCFG derive \"{}\"\n", record.derivation()));
        }
        if record.has_context() {
            out.push_str(&format!("#pragma LCFG context \"{}\"\n", record.context()));
        }
    }
    out.push_str(&super::spec::format(record, default_arch, options));
    out
}


// vim: foldmethod=marker
