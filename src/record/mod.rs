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
//! The Package Record value object (spec §3.1, §4.1): seven string-valued
//! fields plus a prefix character, a signed priority, and reference-counted
//! sharing across containers.

mod prefix;
pub mod validate;

pub use prefix::Prefix;

use crate::context::{ContextCombiner, ContextEvaluator, ContextValidator, VersionComparator};
use crate::error::Error;
use std::cell::{Ref, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Inner {
    name: String,
    arch: String,
    version: String,
    release: String,
    flags: String,
    context: String,
    derivation: String,
    prefix: Option<Prefix>,
    priority: i32,
}

/// A single package specification: name, architecture, version, release,
/// flags, context expression, derivation, prefix, and priority.
///
/// Cheaply [Clone]-able -- cloning shares the same underlying record (an
/// `Rc`-backed cell), matching spec §5's reference-counted ownership
/// model where "the same record may appear in multiple containers
/// simultaneously". To obtain an independent deep copy with every string
/// field copied and the prefix/priority preserved (spec §4.1's "clone"
/// operation), use [PackageRecord::duplicate] instead.
#[derive(Clone, Debug)]
pub struct PackageRecord(Rc<RefCell<Inner>>);

impl Default for PackageRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageRecord {
    /// Construct a new, empty record. All fields start unset (`""`);
    /// priority starts at `0`.
    pub fn new() -> Self {
        PackageRecord(Rc::new(RefCell::new(Inner::default())))
    }

    /// Deep-copy every string field plus prefix and priority into a brand
    /// new, independently-owned record (spec §4.1's "clone").
    pub fn duplicate(&self) -> PackageRecord {
        let inner = self.0.borrow();
        PackageRecord(Rc::new(RefCell::new(Inner {
            name: inner.name.clone(),
            arch: inner.arch.clone(),
            version: inner.version.clone(),
            release: inner.release.clone(),
            flags: inner.flags.clone(),
            context: inner.context.clone(),
            derivation: inner.derivation.clone(),
            prefix: inner.prefix,
            priority: inner.priority,
        })))
    }

    /// True if this handle and `other` refer to the very same underlying
    /// record (used by the merge engine's identity short-circuit, spec
    /// §4.4 step 2).
    pub fn is_same(&self, other: &PackageRecord) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A record is "valid" iff it has a well-formed name.
    pub fn is_valid(&self) -> bool {
        validate::is_valid_name(&self.0.borrow().name)
    }

    /// A record is "active" iff `priority >= 0`.
    pub fn is_active(&self) -> bool {
        self.0.borrow().priority >= 0
    }

    // -- presence predicates --------------------------------------------

    /// True if `name` has been set.
    pub fn has_name(&self) -> bool {
        !self.0.borrow().name.is_empty()
    }

    /// True if `arch` has been set.
    pub fn has_arch(&self) -> bool {
        !self.0.borrow().arch.is_empty()
    }

    /// True if `version` has been set.
    pub fn has_version(&self) -> bool {
        !self.0.borrow().version.is_empty()
    }

    /// True if `release` has been set.
    pub fn has_release(&self) -> bool {
        !self.0.borrow().release.is_empty()
    }

    /// True if `flags` has been set.
    pub fn has_flags(&self) -> bool {
        !self.0.borrow().flags.is_empty()
    }

    /// True if `context` has been set.
    pub fn has_context(&self) -> bool {
        !self.0.borrow().context.is_empty()
    }

    /// True if `derivation` has been set.
    pub fn has_derivation(&self) -> bool {
        !self.0.borrow().derivation.is_empty()
    }

    /// True if a prefix has been set.
    pub fn has_prefix(&self) -> bool {
        self.0.borrow().prefix.is_some()
    }

    // -- borrowing accessors ---------------------------------------------

    /// Borrow the `name` field. Empty string means unset.
    pub fn name(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.name.as_str())
    }

    /// Borrow the `arch` field. Empty string means unset.
    pub fn arch(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.arch.as_str())
    }

    /// Borrow the `version` field. Empty string means unset.
    pub fn version(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.version.as_str())
    }

    /// Borrow the `release` field. Empty string means unset.
    pub fn release(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.release.as_str())
    }

    /// Borrow the `flags` field. Empty string means unset.
    pub fn flags(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.flags.as_str())
    }

    /// Borrow the `context` field. Empty string means unset.
    pub fn context(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.context.as_str())
    }

    /// Borrow the `derivation` field. Empty string means unset.
    pub fn derivation(&self) -> Ref<'_, str> {
        Ref::map(self.0.borrow(), |inner| inner.derivation.as_str())
    }

    /// The prefix character, if set.
    pub fn prefix(&self) -> Option<Prefix> {
        self.0.borrow().prefix
    }

    /// The signed priority; default `0`.
    pub fn priority(&self) -> i32 {
        self.0.borrow().priority
    }

    // -- validated setters -------------------------------------------------

    /// Set `name`, rejecting and leaving the record unchanged on invalid
    /// input.
    pub fn set_name(&self, name: &str) -> Result<(), Error> {
        validate::validate_name(name)?;
        self.0.borrow_mut().name = name.to_owned();
        Ok(())
    }

    /// Set `arch`, rejecting and leaving the record unchanged on invalid
    /// input.
    pub fn set_arch(&self, arch: &str) -> Result<(), Error> {
        validate::validate_arch(arch)?;
        self.0.borrow_mut().arch = arch.to_owned();
        Ok(())
    }

    /// Set `version`, rejecting and leaving the record unchanged on
    /// invalid input.
    pub fn set_version(&self, version: &str) -> Result<(), Error> {
        validate::validate_version(version)?;
        self.0.borrow_mut().version = version.to_owned();
        Ok(())
    }

    /// Set `release`, rejecting and leaving the record unchanged on
    /// invalid input.
    pub fn set_release(&self, release: &str) -> Result<(), Error> {
        validate::validate_release(release)?;
        self.0.borrow_mut().release = release.to_owned();
        Ok(())
    }

    /// Replace `flags` wholesale, rejecting and leaving the record
    /// unchanged on invalid input. See [PackageRecord::add_flags] for the
    /// union-of-sets variant.
    pub fn set_flags(&self, flags: &str) -> Result<(), Error> {
        validate::validate_flags(flags)?;
        self.0.borrow_mut().flags = sorted_dedup_flags(flags);
        Ok(())
    }

    /// Add `extra` flag characters to the existing set: computes the
    /// union of the current and extra character sets and replaces the
    /// field with the sorted, deduplicated result (spec §4.1).
    pub fn add_flags(&self, extra: &str) -> Result<(), Error> {
        validate::validate_flags(extra)?;
        let mut inner = self.0.borrow_mut();
        let union: String = inner.flags.chars().chain(extra.chars()).collect();
        inner.flags = sorted_dedup_flags(&union);
        Ok(())
    }

    /// Set the context expression, delegating validation to the external
    /// [ContextValidator].
    pub fn set_context(&self, context: &str, validator: &dyn ContextValidator) -> Result<(), Error> {
        if !validator.is_valid(context) {
            return Err(Error::invalid("context", format!("'{context}' is not a valid context expression")));
        }
        self.0.borrow_mut().context = context.to_owned();
        Ok(())
    }

    /// Append to the context expression via the external [ContextCombiner].
    pub fn append_context(&self, extra: &str, combiner: &dyn ContextCombiner) -> Result<(), Error> {
        let combined = {
            let inner = self.0.borrow();
            combiner.combine(&inner.context, extra)
        };
        self.0.borrow_mut().context = combined;
        Ok(())
    }

    /// Append to the derivation string: joined with a single space, but
    /// skipped entirely when `extra` is already a substring of the
    /// current derivation. This is a deliberately cheap dedup (spec §4.1,
    /// §9) that can miss overlapping tokens; it is preserved as-is.
    pub fn append_derivation(&self, extra: &str) {
        if extra.is_empty() {
            return;
        }
        let mut inner = self.0.borrow_mut();
        if inner.derivation.contains(extra) {
            return;
        }
        if inner.derivation.is_empty() {
            inner.derivation = extra.to_owned();
        } else {
            inner.derivation.push(' ');
            inner.derivation.push_str(extra);
        }
    }

    /// Set the derivation string outright.
    pub fn set_derivation(&self, derivation: &str) {
        self.0.borrow_mut().derivation = derivation.to_owned();
    }

    /// Set the prefix character.
    pub fn set_prefix(&self, prefix: Prefix) {
        self.0.borrow_mut().prefix = Some(prefix);
    }

    /// Clear the prefix.
    pub fn clear_prefix(&self) {
        self.0.borrow_mut().prefix = None;
    }

    /// Set the priority directly.
    pub fn set_priority(&self, priority: i32) {
        self.0.borrow_mut().priority = priority;
    }

    // -- derived values ----------------------------------------------------

    /// `version + "-" + release`, substituting the wildcard `"*"` for
    /// either side when absent.
    pub fn full_version(&self) -> String {
        let inner = self.0.borrow();
        let version = if inner.version.is_empty() { "*" } else { &inner.version };
        let release = if inner.release.is_empty() { "*" } else { &inner.release };
        format!("{version}-{release}")
    }

    /// `name + "." + arch` when arch is present, else just `name`.
    pub fn id(&self) -> String {
        let inner = self.0.borrow();
        if inner.arch.is_empty() {
            inner.name.clone()
        } else {
            format!("{}.{}", inner.name, inner.arch)
        }
    }

    /// Evaluate the context expression (if any) against `ctxlist` via the
    /// external [ContextEvaluator], assigning the resulting integer to
    /// `priority`. A record with no context expression always evaluates
    /// to priority `0`. On evaluator failure the record is left
    /// unchanged.
    pub fn eval_priority(&self, ctxlist: &[String], evaluator: &dyn ContextEvaluator) -> Result<(), Error> {
        let expr = self.0.borrow().context.clone();
        let priority = if expr.is_empty() { 0 } else { evaluator.eval(&expr, ctxlist)? };
        self.0.borrow_mut().priority = priority;
        Ok(())
    }

    /// True iff name matches `name_glob` and arch matches `arch_glob`
    /// (fnmatch-style `?`/`*`); `"*"` for `arch_glob` matches any arch,
    /// including an absent one.
    pub fn matches(&self, name_glob: &str, arch_glob: &str) -> bool {
        let inner = self.0.borrow();
        crate::list::glob::fnmatch(name_glob, &inner.name) && crate::list::glob::fnmatch(arch_glob, &inner.arch)
    }

    /// Two records are equal iff name (case-insensitive), arch, version,
    /// release, flags, and context all match. Prefix and derivation are
    /// NOT part of equality.
    pub fn equals(&self, other: &PackageRecord) -> bool {
        let a = self.0.borrow();
        let b = other.0.borrow();
        a.name.eq_ignore_ascii_case(&b.name)
            && a.arch == b.arch
            && a.version == b.version
            && a.release == b.release
            && a.flags == b.flags
            && a.context == b.context
    }

    /// Lexicographic comparison by `(name case-insensitive, arch, version,
    /// release)`, using `comparator` for the version/release components.
    pub fn compare_with(&self, other: &PackageRecord, comparator: &dyn VersionComparator) -> Ordering {
        let a = self.0.borrow();
        let b = other.0.borrow();
        a.name
            .to_ascii_lowercase()
            .cmp(&b.name.to_ascii_lowercase())
            .then_with(|| a.arch.cmp(&b.arch))
            .then_with(|| comparator.compare(&a.version, &b.version))
            .then_with(|| comparator.compare(&a.release, &b.release))
    }

    /// [PackageRecord::compare_with] using the default byte-lexicographic
    /// comparator.
    pub fn compare(&self, other: &PackageRecord) -> Ordering {
        self.compare_with(other, &crate::context::LexicographicVersionComparator)
    }
}

/// Serializes as the canonical spec-line string (spec §6.1), the same
/// form [fmt::Display] produces. Round-trips through [crate::parser::parse].
#[cfg(feature = "serde")]
impl serde::Serialize for PackageRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&crate::format::spec::format(self, None, crate::rules::Options::NONE))
    }
}

/// Deserializes from the canonical spec-line string via [crate::parser::parse].
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PackageRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let line = String::deserialize(deserializer)?;
        crate::parser::parse(&line).map_err(serde::de::Error::custom)
    }
}

fn sorted_dedup_flags(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    chars.sort_unstable();
    chars.dedup();
    chars.into_iter().collect()
}

impl PartialEq for PackageRecord {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PackageRecord {}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::spec::format(self, None, crate::rules::Options::NONE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(name: &str, version: &str, release: &str) -> PackageRecord {
        let record = PackageRecord::new();
        record.set_name(name).unwrap();
        record.set_version(version).unwrap();
        record.set_release(release).unwrap();
        record
    }

    #[test]
    fn equals_clone() {
        let record = make("foo", "1.0", "1");
        assert!(record.equals(&record.duplicate()));
    }

    #[test]
    fn equals_ignores_prefix_and_derivation() {
        let a = make("foo", "1.0", "1");
        let b = a.duplicate();
        b.set_prefix(Prefix::Add);
        b.append_derivation("somewhere:3");
        assert!(a.equals(&b));
    }

    #[test]
    fn setters_reject_invalid_input_without_mutating() {
        let record = make("foo", "1.0", "1");
        assert!(record.set_name("").is_err());
        assert_eq!("foo", &*record.name());
    }

    #[test]
    fn add_flags_unions_and_sorts() {
        let record = make("foo", "1.0", "1");
        record.set_flags("db").unwrap();
        record.add_flags("ab2").unwrap();
        assert_eq!("2abd", &*record.flags());
    }

    #[test]
    fn derivation_dedup_skips_substring() {
        let record = make("foo", "1.0", "1");
        record.append_derivation("base/foo.h:17");
        record.append_derivation("foo.h:17");
        assert_eq!("base/foo.h:17", &*record.derivation());
    }

    #[test]
    fn full_version_uses_wildcard_for_missing_side() {
        let record = PackageRecord::new();
        record.set_name("foo").unwrap();
        record.set_version("1.0").unwrap();
        assert_eq!("1.0-*", record.full_version());
    }

    #[test]
    fn id_includes_arch_only_when_present() {
        let record = make("foo", "1.0", "1");
        assert_eq!("foo", record.id());
        record.set_arch("x86_64").unwrap();
        assert_eq!("foo.x86_64", record.id());
    }

    #[test]
    fn is_same_checks_identity_not_equality() {
        let a = make("foo", "1.0", "1");
        let b = a.clone();
        let c = a.duplicate();
        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));
        assert!(a.equals(&c));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trips_through_spec_line() {
        let record = crate::parser::parse("+foo-1.2-3/x86_64:dev[!server]").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(r#""+foo-1.2-3/x86_64:dev[!server]""#, json);
        let back: PackageRecord = serde_json::from_str(&json).unwrap();
        assert!(record.equals(&back));
        assert_eq!(record.prefix(), back.prefix());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_malformed_spec_line() {
        let err = serde_json::from_str::<PackageRecord>(r#""nodashesatall""#);
        assert!(err.is_err());
    }
}

// vim: foldmethod=marker
