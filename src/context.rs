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
//! External collaborators that the core treats as pure functions over a
//! trait object, per spec §1/§2: context-expression evaluation, context
//! validation, context combination, and RPM-style version comparison are
//! all out of scope for this crate's own logic, but the core needs a seam
//! to call into them. Each seam is a small trait with a permissive or
//! byte-lexicographic default implementation, in the same spirit as the
//! teacher crate shipping a deliberately limited default (`control::de`'s
//! documented "very very basic" serde support) and leaving room for a
//! caller to substitute something more capable.

use crate::error::Error;
use std::cmp::Ordering;

/// Evaluates a context expression against the current context list to
/// produce a priority integer (spec §2 item 3, §4.1 `eval_priority`).
pub trait ContextEvaluator {
    /// Evaluate `expr` against `ctxlist`, yielding the priority to assign.
    fn eval(&self, expr: &str, ctxlist: &[String]) -> Result<i32, Error>;
}

/// Default [ContextEvaluator]: every expression evaluates to priority `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullContextEvaluator;

impl ContextEvaluator for NullContextEvaluator {
    fn eval(&self, _expr: &str, _ctxlist: &[String]) -> Result<i32, Error> {
        Ok(0)
    }
}

/// Validates that a context expression string is well-formed (spec §3.1:
/// "validated by the external context-expression validator").
pub trait ContextValidator {
    /// Return `true` if `expr` is an acceptable context expression.
    fn is_valid(&self, expr: &str) -> bool;
}

/// Default [ContextValidator]: accepts any non-empty string containing no
/// whitespace. This is the minimal contract the core itself needs; the
/// real LCFG context-expression grammar is explicitly out of scope (spec
/// §1).
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveContextValidator;

impl ContextValidator for PermissiveContextValidator {
    fn is_valid(&self, expr: &str) -> bool {
        !expr.is_empty() && !expr.chars().any(char::is_whitespace)
    }
}

/// Combines two context expressions into one (spec §4.1: "context append
/// (delegated to the external context combiner)").
pub trait ContextCombiner {
    /// Combine `existing` and `extra` into a single context expression.
    fn combine(&self, existing: &str, extra: &str) -> String;
}

/// Default [ContextCombiner]: boolean AND of the two expressions,
/// parenthesizing each side when both are present.
#[derive(Clone, Copy, Debug, Default)]
pub struct AndContextCombiner;

impl ContextCombiner for AndContextCombiner {
    fn combine(&self, existing: &str, extra: &str) -> String {
        match (existing.is_empty(), extra.is_empty()) {
            (true, true) => String::new(),
            (true, false) => extra.to_owned(),
            (false, true) => existing.to_owned(),
            (false, false) => format!("({existing})&({extra})"),
        }
    }
}

/// Orders two version/release strings (spec §4.1 `compare`: "Version/
/// release comparison uses an externally supplied RPM-style comparator
/// when available; otherwise byte-lexicographic").
pub trait VersionComparator {
    /// Compare `a` against `b`.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Default [VersionComparator]: plain byte-lexicographic `str` ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexicographicVersionComparator;

impl VersionComparator for LexicographicVersionComparator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}


// vim: foldmethod=marker
