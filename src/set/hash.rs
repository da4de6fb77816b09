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
//! The djb2-variant string hash used to place names into buckets (spec
//! §4.5). Any string hash with similar collision behavior would satisfy
//! the contract; this is the conventional djb2 recurrence.

/// `hash = hash * 33 + byte`, seeded at `5381`, folded over the name's
/// bytes (case-sensitive -- bucket placement, unlike primary-key lookup
/// elsewhere in this crate, does not fold case).
pub fn djb_hash(name: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in name.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        assert_eq!(djb_hash("foo"), djb_hash("foo"));
    }

    #[test]
    fn differs_for_different_input() {
        assert_ne!(djb_hash("foo"), djb_hash("bar"));
    }

    #[test]
    fn is_case_sensitive() {
        assert_ne!(djb_hash("Foo"), djb_hash("foo"));
    }
}

// vim: foldmethod=marker
