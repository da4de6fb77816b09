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
//! `fnmatch`-style glob matching (`?`, `*`) and anchor-based substring
//! search (spec §4.3), hand-rolled because no crate in the corpus this
//! implementation is grounded on supplies either primitive.

/// `fnmatch`-style match: `?` matches exactly one character, `*` matches
/// any run of zero or more characters. An empty pattern matches only an
/// empty value; callers implementing "empty glob means don't filter"
/// should check for that before calling this.
pub fn fnmatch(pattern: &str, value: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let value: Vec<char> = value.chars().collect();
    fnmatch_chars(&pattern, &value)
}

fn fnmatch_chars(pattern: &[char], value: &[char]) -> bool {
    match pattern.first() {
        None => value.is_empty(),
        Some('*') => {
            fnmatch_chars(&pattern[1..], value)
                || (!value.is_empty() && fnmatch_chars(pattern, &value[1..]))
        }
        Some('?') => !value.is_empty() && fnmatch_chars(&pattern[1..], &value[1..]),
        Some(ch) => value.first() == Some(ch) && fnmatch_chars(&pattern[1..], &value[1..]),
    }
}

/// Anchor-syntax match (spec §4.3 "Search"): a pattern may begin with `^`
/// (starts-with) and/or end with `$` (ends-with); both anchors present
/// means exact match, neither means substring match.
pub fn anchor_match(pattern: &str, value: &str) -> bool {
    let starts = pattern.starts_with('^');
    let ends = pattern.ends_with('$');
    let inner_start = if starts { 1 } else { 0 };
    let inner_end = pattern.len() - if ends { 1 } else { 0 };
    let needle = if inner_start <= inner_end {
        &pattern[inner_start..inner_end]
    } else {
        ""
    };

    match (starts, ends) {
        (true, true) => value == needle,
        (true, false) => value.starts_with(needle),
        (false, true) => value.ends_with(needle),
        (false, false) => value.contains(needle),
    }
}


// vim: foldmethod=marker
