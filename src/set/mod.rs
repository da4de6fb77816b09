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
//! The Package Set (spec §3.3, §4.5): an open-addressed hash table of
//! buckets, each bucket owning a [PackageList] whose records all share a
//! package name.

pub mod hash;

use crate::change::Change;
use crate::error::Error;
use crate::list::PackageList;
use crate::record::PackageRecord;
use crate::rules::{MergeRules, PrimaryKey};

const INITIAL_BUCKETS: usize = 113;
const LOAD_MAX: f64 = 0.75;
const LOAD_INIT: f64 = 0.5;

/// A hash-indexed collection of [PackageList]s keyed by package name.
#[derive(Clone, Debug)]
pub struct PackageSet {
    buckets: Vec<Option<PackageList>>,
    entries: usize,
    merge_rules: MergeRules,
    primary_key: PrimaryKey,
}

impl Default for PackageSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageSet {
    /// A new, empty set with no merge rules and the default primary key.
    pub fn new() -> Self {
        Self::with_rules(MergeRules::NONE, PrimaryKey::default())
    }

    /// A new, empty set with the given merge rules and primary key,
    /// inherited by every bucket's [PackageList] as it is lazily created.
    pub fn with_rules(merge_rules: MergeRules, primary_key: PrimaryKey) -> Self {
        PackageSet {
            buckets: (0..INITIAL_BUCKETS).map(|_| None).collect(),
            entries: 0,
            merge_rules,
            primary_key,
        }
    }

    /// Total number of records across every bucket.
    pub fn len(&self) -> usize {
        self.buckets.iter().flatten().map(PackageList::len).sum()
    }

    /// True if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current bucket array capacity.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of occupied buckets (distinct names present).
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// The configured merge-rule bitmask.
    pub fn merge_rules(&self) -> MergeRules {
        self.merge_rules
    }

    /// The configured primary-key bitmask.
    pub fn primary_key(&self) -> PrimaryKey {
        self.primary_key
    }

    /// Override the primary-key bitmask that will be inherited by buckets
    /// created from now on (spec §6.7 `ALL_CONTEXTS`). Buckets already
    /// created keep whatever key their own [PackageList] was built with.
    pub fn set_primary_key(&mut self, primary_key: PrimaryKey) {
        self.primary_key = primary_key;
    }

    /// Linear-probe from `djb_hash(name) mod buckets` for `name`'s
    /// bucket, stopping at an empty bucket (which proves absence).
    pub fn find_list(&self, name: &str) -> Option<&PackageList> {
        let buckets_len = self.buckets.len();
        let start = (hash::djb_hash(name) % buckets_len as u64) as usize;
        for offset in 0..buckets_len {
            let idx = (start + offset) % buckets_len;
            match &self.buckets[idx] {
                None => return None,
                Some(list) => {
                    if bucket_name_matches(list, name) {
                        return Some(list);
                    }
                }
            }
        }
        None
    }

    /// Delegate to [PackageList::find_package] on `name`'s bucket, if any.
    pub fn find_package(&self, name: &str, arch: &str) -> Option<&PackageRecord> {
        self.find_list(name)?.find_package(name, arch)
    }

    /// True if a record matching `name`/`arch` is present anywhere in the set.
    pub fn has_package(&self, name: &str, arch: &str) -> bool {
        self.find_package(name, arch).is_some()
    }

    /// Probe for the bucket index that is "the right one" for `name`: an
    /// empty slot (absent name) or an occupied bucket whose first record
    /// bears this name.
    fn probe(&self, name: &str) -> Result<usize, Error> {
        let buckets_len = self.buckets.len();
        let start = (hash::djb_hash(name) % buckets_len as u64) as usize;
        for offset in 0..buckets_len {
            let idx = (start + offset) % buckets_len;
            match &self.buckets[idx] {
                None => return Ok(idx),
                Some(list) => {
                    if bucket_name_matches(list, name) {
                        return Ok(idx);
                    }
                }
            }
        }
        Err(Error::Resource(format!(
            "package set has no free bucket for '{name}' (table full)"
        )))
    }

    /// Merge `new_pkg` into its bucket's list, lazily creating the bucket
    /// if its name is new, and resizing the table if the load factor is
    /// exceeded afterward (spec §4.5).
    pub fn merge_package(&mut self, new_pkg: PackageRecord) -> Result<Change, Error> {
        if !new_pkg.is_valid() {
            return Err(Error::invalid("package", "cannot merge an invalid (unnamed) package"));
        }
        let name = new_pkg.name().to_string();
        let idx = self.probe(&name)?;
        let is_new = self.buckets[idx].is_none();
        if is_new {
            self.buckets[idx] = Some(PackageList::with_rules(self.merge_rules, self.primary_key));
        }

        let change = self.buckets[idx].as_mut().expect("just installed above").merge_package(new_pkg)?;

        let became_empty = self.buckets[idx].as_ref().expect("just installed above").is_empty();
        if became_empty {
            self.buckets[idx] = None;
            if !is_new {
                self.entries -= 1;
            }
        } else if is_new && change != Change::None {
            self.entries += 1;
            self.maybe_resize()?;
        }
        Ok(change)
    }

    /// Merge every valid record of `src` into `self`, in order. The first
    /// [Error] is terminal; invalid records are silently skipped.
    pub fn merge_list(&mut self, src: &PackageList) -> Result<Change, Error> {
        let mut modified = false;
        for record in src.iter() {
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

    /// Glob-match across every bucket, collecting results into a single
    /// list whose rules are `SQUASH_IDENTICAL | KEEP_ALL` so that
    /// context-distinct duplicates aren't lost (spec §4.5).
    pub fn match_glob(&self, name: &str, arch: &str, version: &str, release: &str) -> PackageList {
        let mut out = PackageList::with_rules(
            MergeRules::SQUASH_IDENTICAL | MergeRules::KEEP_ALL,
            self.primary_key,
        );
        for list in self.buckets.iter().flatten() {
            for record in list.match_glob(name, arch, version, release).iter() {
                out.append(record.clone());
            }
        }
        out
    }

    /// Records in print order (spec §4.5): buckets sorted by their first
    /// record's name (case-insensitive), each bucket's records then
    /// sorted by [PackageRecord::compare].
    pub fn print_order(&self) -> Vec<PackageRecord> {
        let mut bucket_refs: Vec<&PackageList> = self.buckets.iter().flatten().collect();
        bucket_refs.sort_by_key(|list| {
            list.head().map(|r| r.name().to_ascii_lowercase()).unwrap_or_default()
        });
        let mut out = Vec::new();
        for list in bucket_refs {
            let mut records: Vec<PackageRecord> = list.iter().cloned().collect();
            records.sort_by(|a, b| a.compare(b));
            out.extend(records);
        }
        out
    }

    fn maybe_resize(&mut self) -> Result<(), Error> {
        let load = self.entries as f64 / self.buckets.len() as f64;
        if load >= LOAD_MAX {
            let target = ((self.entries as f64) / LOAD_INIT).ceil() as usize;
            self.resize(target.max(INITIAL_BUCKETS))?;
        }
        Ok(())
    }

    fn resize(&mut self, new_capacity: usize) -> Result<(), Error> {
        let old_buckets = std::mem::replace(&mut self.buckets, (0..new_capacity).map(|_| None).collect());
        self.entries = 0;
        for list in old_buckets.into_iter().flatten() {
            self.merge_list(&list)?;
        }
        Ok(())
    }
}

fn bucket_name_matches(list: &PackageList, name: &str) -> bool {
    list.head().map(|r| &*r.name() == name).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn merge_and_find_roundtrip() {
        let mut set = PackageSet::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
        set.merge_package(parser::parse("foo-1-1").unwrap()).unwrap();
        assert!(set.has_package("foo", ""));
        assert_eq!(1, set.len());
        assert_eq!(1, set.entry_count());
    }

    #[test]
    fn distinct_names_occupy_distinct_buckets() {
        let mut set = PackageSet::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
        set.merge_package(parser::parse("foo-1-1").unwrap()).unwrap();
        set.merge_package(parser::parse("bar-1-1").unwrap()).unwrap();
        assert_eq!(2, set.entry_count());
        assert_eq!(2, set.len());
    }

    #[test]
    fn removing_last_record_drops_bucket() {
        let mut set = PackageSet::with_rules(MergeRules::USE_PREFIX, PrimaryKey::default());
        set.merge_package(parser::parse("+foo-1-1").unwrap()).unwrap();
        assert_eq!(1, set.entry_count());
        set.merge_package(parser::parse("-foo-1-1").unwrap()).unwrap();
        assert_eq!(0, set.entry_count());
        assert!(!set.has_package("foo", ""));
    }

    #[test]
    fn resize_preserves_contents() {
        let mut set = PackageSet::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
        for i in 0..200 {
            let spec = format!("pkg{i}-1-1");
            set.merge_package(parser::parse(&spec).unwrap()).unwrap();
        }
        assert_eq!(200, set.len());
        assert!(set.bucket_count() > INITIAL_BUCKETS);
        for i in 0..200 {
            assert!(set.has_package(&format!("pkg{i}"), ""));
        }
    }

    #[test]
    fn print_order_is_sorted_by_name_case_insensitive() {
        let mut set = PackageSet::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
        set.merge_package(parser::parse("Zebra-1-1").unwrap()).unwrap();
        set.merge_package(parser::parse("apple-1-1").unwrap()).unwrap();
        let ordered = set.print_order();
        let names: Vec<String> = ordered.iter().map(|r| r.name().to_string()).collect();
        assert_eq!(vec!["apple".to_string(), "Zebra".to_string()], names);
    }

    #[test]
    fn match_glob_searches_every_bucket() {
        let mut set = PackageSet::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
        set.merge_package(parser::parse("foo-1-1/x86_64").unwrap()).unwrap();
        set.merge_package(parser::parse("bar-1-1/armel").unwrap()).unwrap();
        let matched = set.match_glob("*", "x86_64", "", "");
        assert_eq!(1, matched.len());
    }
}

// vim: foldmethod=marker
