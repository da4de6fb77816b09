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
//! The Package List (spec §3.2, §4.3, §4.4): an ordered sequence of
//! [PackageRecord]s with a configurable merge-rule bitmask and primary-key
//! mask, and the merge algebra that is this crate's hardest subsystem.

pub mod glob;

use crate::change::Change;
use crate::error::Error;
use crate::record::{PackageRecord, Prefix};
use crate::rules::{MergeRules, PrimaryKey};

/// An ordered, insertion-order sequence of [PackageRecord]s.
#[derive(Clone, Debug, Default)]
pub struct PackageList {
    records: Vec<PackageRecord>,
    merge_rules: MergeRules,
    primary_key: PrimaryKey,
}

impl PackageList {
    /// A new, empty list with no merge rules and the default primary key
    /// (`NAME | ARCH`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A new, empty list with the given merge rules and primary key.
    pub fn with_rules(merge_rules: MergeRules, primary_key: PrimaryKey) -> Self {
        PackageList {
            records: Vec::new(),
            merge_rules,
            primary_key,
        }
    }

    /// The configured merge-rule bitmask.
    pub fn merge_rules(&self) -> MergeRules {
        self.merge_rules
    }

    /// The configured primary-key bitmask.
    pub fn primary_key(&self) -> PrimaryKey {
        self.primary_key
    }

    /// Override the primary-key bitmask in place. Used by the ingestion
    /// loop's `ALL_CONTEXTS` option (spec §6.7) to widen the key to
    /// include `CTX` for the duration of a stream so that
    /// context-conflicting duplicates are kept apart instead of
    /// colliding on `NAME`/`ARCH` alone.
    pub fn set_primary_key(&mut self, primary_key: PrimaryKey) {
        self.primary_key = primary_key;
    }

    /// Number of records currently in the list.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first record, if any.
    pub fn head(&self) -> Option<&PackageRecord> {
        self.records.first()
    }

    /// The last record, if any.
    pub fn tail(&self) -> Option<&PackageRecord> {
        self.records.last()
    }

    /// Forward iterator over the records, in insertion order (modulo
    /// [PackageList::sort]).
    pub fn iter(&self) -> std::slice::Iter<'_, PackageRecord> {
        self.records.iter()
    }

    /// Append `record` to the tail of the list unconditionally (bypasses
    /// the merge engine).
    pub fn append(&mut self, record: PackageRecord) {
        self.records.push(record);
    }

    /// Index of the first record matching `name`/`arch` under the
    /// `find`/`contains` lookup rule of spec §4.3: `arch == "*"` matches
    /// any architecture (including absent); an empty/absent `arch`
    /// matches only records without an architecture set.
    pub fn find_index(&self, name: &str, arch: &str) -> Option<usize> {
        self.records.iter().position(|r| r.matches_lookup(name, arch))
    }

    /// The first record matching `name`/`arch`, per [PackageList::find_index].
    pub fn find_package(&self, name: &str, arch: &str) -> Option<&PackageRecord> {
        self.find_index(name, arch).map(|idx| &self.records[idx])
    }

    /// True if a record matching `name`/`arch` is present.
    pub fn has_package(&self, name: &str, arch: &str) -> bool {
        self.find_index(name, arch).is_some()
    }

    /// Stable sort by [PackageRecord::compare] (default byte-lexicographic
    /// version ordering).
    pub fn sort(&mut self) {
        self.records.sort_by(|a, b| a.compare(b));
    }

    /// Stable sort using an injected [crate::context::VersionComparator].
    pub fn sort_with(&mut self, comparator: &dyn crate::context::VersionComparator) {
        self.records.sort_by(|a, b| a.compare_with(b, comparator));
    }

    /// Glob-match (`?`/`*`) against name/arch/version/release; an empty
    /// glob for a field means "don't filter on that field". Invalid
    /// records are skipped. Returns a new list sharing the matched
    /// records (not deep copies).
    pub fn match_glob(&self, name: &str, arch: &str, version: &str, release: &str) -> PackageList {
        let mut out = PackageList::with_rules(self.merge_rules, self.primary_key);
        for record in &self.records {
            if !record.is_valid() {
                continue;
            }
            if !name.is_empty() && !glob::fnmatch(name, &record.name()) {
                continue;
            }
            if !arch.is_empty() && !glob::fnmatch(arch, &record.arch()) {
                continue;
            }
            if !version.is_empty() && !glob::fnmatch(version, &record.version()) {
                continue;
            }
            if !release.is_empty() && !glob::fnmatch(release, &record.release()) {
                continue;
            }
            out.records.push(record.clone());
        }
        out
    }

    /// Anchor-syntax search (`^`/`$`) against name/arch/version/release;
    /// an empty pattern for a field means "don't filter on that field".
    pub fn search(&self, name: &str, arch: &str, version: &str, release: &str) -> PackageList {
        let mut out = PackageList::with_rules(self.merge_rules, self.primary_key);
        for record in &self.records {
            if !record.is_valid() {
                continue;
            }
            if !name.is_empty() && !glob::anchor_match(name, &record.name()) {
                continue;
            }
            if !arch.is_empty() && !glob::anchor_match(arch, &record.arch()) {
                continue;
            }
            if !version.is_empty() && !glob::anchor_match(version, &record.version()) {
                continue;
            }
            if !release.is_empty() && !glob::anchor_match(release, &record.release()) {
                continue;
            }
            out.records.push(record.clone());
        }
        out
    }

    fn key_index(&self, new_pkg: &PackageRecord) -> Option<usize> {
        self.records.iter().position(|existing| {
            existing.name().eq(&*new_pkg.name())
                && (!self.primary_key.contains(PrimaryKey::ARCH) || existing.arch().eq(&*new_pkg.arch()))
                && (!self.primary_key.contains(PrimaryKey::CTX) || existing.context().eq(&*new_pkg.context()))
        })
    }

    /// The algebraic heart of this crate (spec §4.4): merge `new_pkg`
    /// into the list according to the configured merge rules and primary
    /// key, applying the first applicable rule in contractual order.
    pub fn merge_package(&mut self, new_pkg: PackageRecord) -> Result<Change, Error> {
        if !new_pkg.is_valid() {
            return Err(Error::invalid("package", "cannot merge an invalid (unnamed) package"));
        }

        let existing_idx = self.key_index(&new_pkg);

        // Step 2: identity short-circuit.
        if let Some(idx) = existing_idx {
            if self.records[idx].is_same(&new_pkg) {
                return Ok(Change::None);
            }
        }

        // Step 3: prefix rule.
        if self.merge_rules.contains(MergeRules::USE_PREFIX) {
            if let Some(idx) = existing_idx {
                if self.records[idx].prefix() == Some(Prefix::Pin) {
                    return Err(Error::Conflict(format!(
                        "Version is pinned for package '{}'",
                        new_pkg.id()
                    )));
                }
            }
            if let Some(prefix) = new_pkg.prefix() {
                return self.apply_prefix(prefix, existing_idx, new_pkg);
            }
            // new_pkg has no prefix: fall through to the remaining rules.
        }

        // Step 4: no existing record.
        let Some(idx) = existing_idx else {
            self.records.push(new_pkg);
            return Ok(Change::Added);
        };

        // Step 5: squash identical.
        if self.merge_rules.contains(MergeRules::SQUASH_IDENTICAL) && self.records[idx].equals(&new_pkg) {
            self.records.remove(idx);
            self.records.push(new_pkg);
            return Ok(Change::Replaced);
        }

        // Step 6: keep all.
        if self.merge_rules.contains(MergeRules::KEEP_ALL) {
            self.records.push(new_pkg);
            return Ok(Change::Added);
        }

        // Step 7: replace.
        if self.merge_rules.contains(MergeRules::REPLACE) {
            self.records.remove(idx);
            self.records.push(new_pkg);
            return Ok(Change::Replaced);
        }

        // Step 8: priority.
        if self.merge_rules.contains(MergeRules::USE_PRIORITY) {
            let existing_priority = self.records[idx].priority();
            let new_priority = new_pkg.priority();
            return match new_priority.cmp(&existing_priority) {
                std::cmp::Ordering::Greater => {
                    self.records.remove(idx);
                    self.records.push(new_pkg);
                    Ok(Change::Replaced)
                }
                std::cmp::Ordering::Less => Ok(Change::None),
                std::cmp::Ordering::Equal => Err(Error::Conflict(format!(
                    "Version conflict for package '{}'",
                    new_pkg.id()
                ))),
            };
        }

        // Step 9: no rule accepted.
        Err(Error::Conflict(format!("Version conflict for package '{}'", new_pkg.id())))
    }

    fn apply_prefix(
        &mut self,
        prefix: Prefix,
        existing_idx: Option<usize>,
        new_pkg: PackageRecord,
    ) -> Result<Change, Error> {
        match prefix {
            Prefix::Remove => match existing_idx {
                Some(idx) => {
                    self.records.remove(idx);
                    Ok(Change::Removed)
                }
                None => Ok(Change::None),
            },
            Prefix::Add | Prefix::Pin => {
                let had_existing = existing_idx.is_some();
                if let Some(idx) = existing_idx {
                    self.records.remove(idx);
                }
                self.records.push(new_pkg);
                Ok(if had_existing { Change::Replaced } else { Change::Added })
            }
            Prefix::IfAbsent => match existing_idx {
                Some(_) => Ok(Change::None),
                None => {
                    self.records.push(new_pkg);
                    Ok(Change::Added)
                }
            },
            Prefix::IfPresent => match existing_idx {
                Some(idx) => {
                    self.records.remove(idx);
                    self.records.push(new_pkg);
                    Ok(Change::Replaced)
                }
                None => Ok(Change::None),
            },
        }
    }

    /// Merge every valid record of `src` into `self`, in order. The first
    /// [Error] is terminal; invalid records in `src` are silently
    /// skipped. Returns [Change::Modified] if any sub-merge was
    /// non-[Change::None], else [Change::None].
    pub fn merge_list(&mut self, src: &PackageList) -> Result<Change, Error> {
        let mut modified = false;
        for record in &src.records {
            if !record.is_valid() {
                continue;
            }
            match self.merge_package(record.clone())? {
                Change::None => {}
                _ => modified = true,
            }
        }
        Ok(if modified { Change::Modified } else { Change::None })
    }
}

impl PackageRecord {
    fn matches_lookup(&self, name: &str, arch: &str) -> bool {
        if &*self.name() != name {
            return false;
        }
        if arch == "*" {
            return true;
        }
        if arch.is_empty() {
            return !self.has_arch();
        }
        &*self.arch() == arch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn list(rules: MergeRules) -> PackageList {
        PackageList::with_rules(rules, PrimaryKey::default())
    }

    #[test]
    fn append_updates_size_and_tail() {
        let mut list = PackageList::new();
        let record = parser::parse("foo-1-1").unwrap();
        list.append(record.clone());
        assert_eq!(1, list.len());
        assert!(list.tail().unwrap().equals(&record));
        assert!(list.has_package("foo", ""));
    }

    #[test]
    fn find_index_arch_wildcard_and_absent() {
        let mut list = PackageList::new();
        list.append(parser::parse("foo-1-1/x86_64").unwrap());
        assert!(list.find_index("foo", "*").is_some());
        assert!(list.find_index("foo", "").is_none());
        assert!(list.find_index("foo", "x86_64").is_some());
    }

    #[test]
    fn merge_identity_short_circuit_is_noop() {
        let mut list = list(MergeRules::USE_PRIORITY);
        let record = parser::parse("foo-1-1").unwrap();
        list.append(record.clone());
        let change = list.merge_package(record).unwrap();
        assert_eq!(Change::None, change);
        assert_eq!(1, list.len());
    }

    #[test]
    fn prefix_add_twice_leaves_one_copy() {
        let mut list = list(MergeRules::USE_PREFIX);
        let first = parser::parse("+a-1-1").unwrap();
        let second = parser::parse("+a-2-1").unwrap();
        assert_eq!(Change::Added, list.merge_package(first).unwrap());
        assert_eq!(Change::Replaced, list.merge_package(second).unwrap());
        assert_eq!(1, list.len());
        assert_eq!("2", &*list.head().unwrap().version());
    }

    #[test]
    fn prefix_pin_rejects_subsequent_add() {
        let mut list = list(MergeRules::USE_PREFIX);
        list.merge_package(parser::parse("=a-3-1").unwrap()).unwrap();
        let err = list.merge_package(parser::parse("+a-4-1").unwrap()).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref msg) if msg.contains("pinned")));
        assert_eq!("3", &*list.head().unwrap().version());
    }

    #[test]
    fn prefix_remove_against_empty_is_noop_accept() {
        let mut list = list(MergeRules::USE_PREFIX);
        let change = list.merge_package(parser::parse("-a-1-1").unwrap()).unwrap();
        assert_eq!(Change::None, change);
        assert!(list.is_empty());
    }

    #[test]
    fn prefix_if_absent_then_present_is_noop() {
        let mut list = list(MergeRules::USE_PREFIX);
        list.merge_package(parser::parse("~a-1-1").unwrap()).unwrap();
        let change = list.merge_package(parser::parse("~a-2-1").unwrap()).unwrap();
        assert_eq!(Change::None, change);
        assert_eq!("1", &*list.head().unwrap().version());
    }

    #[test]
    fn squash_identical_refreshes_and_reports_replaced() {
        let mut list = list(MergeRules::SQUASH_IDENTICAL);
        list.merge_package(parser::parse("a-1-1").unwrap()).unwrap();
        let change = list.merge_package(parser::parse("a-1-1").unwrap()).unwrap();
        assert_eq!(Change::Replaced, change);
        assert_eq!(1, list.len());
    }

    #[test]
    fn priority_rule_keeps_higher_regardless_of_order() {
        let mut forward = list(MergeRules::USE_PRIORITY);
        let low = parser::parse("a-1-1").unwrap();
        low.set_priority(5);
        let high = parser::parse("a-2-1").unwrap();
        high.set_priority(7);
        forward.merge_package(low.clone()).unwrap();
        forward.merge_package(high.clone()).unwrap();
        assert_eq!(1, forward.len());
        assert_eq!("2", &*forward.head().unwrap().version());

        let mut backward = list(MergeRules::USE_PRIORITY);
        backward.merge_package(high).unwrap();
        backward.merge_package(low).unwrap();
        assert_eq!(1, backward.len());
        assert_eq!("2", &*backward.head().unwrap().version());
    }

    #[test]
    fn priority_tie_is_conflict() {
        let mut list = list(MergeRules::USE_PRIORITY);
        let a = parser::parse("a-1-1").unwrap();
        a.set_priority(5);
        let b = parser::parse("a-2-1").unwrap();
        b.set_priority(5);
        list.merge_package(a).unwrap();
        assert!(matches!(list.merge_package(b), Err(Error::Conflict(_))));
    }

    #[test]
    fn keep_all_permits_duplicates() {
        let mut list = list(MergeRules::KEEP_ALL);
        list.merge_package(parser::parse("a-1-1").unwrap()).unwrap();
        list.merge_package(parser::parse("a-2-1").unwrap()).unwrap();
        assert_eq!(2, list.len());
    }

    #[test]
    fn no_rule_set_is_conflict_on_second_merge() {
        let mut list = PackageList::new();
        list.merge_package(parser::parse("a-1-1").unwrap()).unwrap();
        assert!(matches!(
            list.merge_package(parser::parse("a-2-1").unwrap()),
            Err(Error::Conflict(_))
        ));
    }

    #[test]
    fn merge_list_aggregates_to_modified() {
        let mut dst = list(MergeRules::KEEP_ALL);
        let mut src = list(MergeRules::KEEP_ALL);
        src.append(parser::parse("a-1-1").unwrap());
        src.append(parser::parse("b-1-1").unwrap());
        assert_eq!(Change::Modified, dst.merge_list(&src).unwrap());
        assert_eq!(2, dst.len());
    }

    #[test]
    fn merge_list_skips_invalid_records() {
        let mut dst = list(MergeRules::KEEP_ALL);
        let mut src = list(MergeRules::KEEP_ALL);
        src.append(PackageRecord::new()); // invalid: no name
        src.append(parser::parse("a-1-1").unwrap());
        assert_eq!(Change::Modified, dst.merge_list(&src).unwrap());
        assert_eq!(1, dst.len());
    }

    #[test]
    fn match_glob_filters_by_populated_fields_only() {
        let mut list = PackageList::new();
        list.append(parser::parse("foo-1-1/x86_64").unwrap());
        list.append(parser::parse("bar-1-1/armel").unwrap());
        let matched = list.match_glob("foo", "", "", "");
        assert_eq!(1, matched.len());
        let matched = list.match_glob("*", "x86_64", "", "");
        assert_eq!(1, matched.len());
    }

    #[test]
    fn search_anchor_semantics() {
        let mut list = PackageList::new();
        list.append(parser::parse("foobar-1-1").unwrap());
        assert_eq!(1, list.search("^foo", "", "", "").len());
        assert_eq!(0, list.search("^bar", "", "", "").len());
        assert_eq!(1, list.search("bar$", "", "", "").len());
        assert_eq!(1, list.search("oob", "", "", "").len());
    }
}

// vim: foldmethod=marker
