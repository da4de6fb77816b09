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
//! The Debian-index stanza consumer (spec §6.4): blank-line-separated
//! stanzas of `Key: Value` lines, each stanza yielding one record.

use super::MergeTarget;
use crate::change::Change;
use crate::error::Error;
use crate::record::PackageRecord;
use std::io::BufRead;

#[derive(Default)]
struct Stanza {
    name: Option<String>,
    version: Option<String>,
    arch: Option<String>,
}

impl Stanza {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.version.is_none() && self.arch.is_none()
    }

    fn field(&mut self, key: &str, value: &str) {
        match key {
            "Package" => self.name = Some(value.to_owned()),
            "Version" => self.version = Some(value.to_owned()),
            "Architecture" => self.arch = Some(value.to_owned()),
            _ => {}
        }
    }

    fn into_record(self, line: usize, default_arch: Option<&str>) -> Result<PackageRecord, Error> {
        let name = self
            .name
            .ok_or_else(|| Error::invalid("Package", "stanza is missing a 'Package:' field").with_location("", line))?;

        let record = PackageRecord::new();
        record.set_name(&name).map_err(|e| e.with_location("", line))?;

        if let Some(version) = self.version {
            let (version, release) = match version.rsplit_once('-') {
                Some((version, release)) => (version, Some(release)),
                None => (version.as_str(), None),
            };
            record.set_version(version).map_err(|e| e.with_location("", line))?;
            if let Some(release) = release {
                record.set_release(release).map_err(|e| e.with_location("", line))?;
            }
        }

        match self.arch.as_deref().or(default_arch) {
            Some(arch) => record.set_arch(arch).map_err(|e| e.with_location("", line))?,
            None => {}
        }

        Ok(record)
    }
}

fn combine(aggregate: Change, change: Change) -> Change {
    match change {
        Change::None => aggregate,
        _ => Change::Modified,
    }
}

/// Consume a Debian-index stream from `reader`: blank-line-separated
/// stanzas of `Key: Value` lines. `Package`/`Version`/`Architecture`
/// populate a record; end of stanza (blank line or end of stream)
/// triggers a merge into `target`.
pub fn ingest<R: BufRead>(
    reader: R,
    target: &mut MergeTarget<'_>,
    default_arch: Option<&str>,
) -> Result<Change, Error> {
    let mut aggregate = Change::None;
    let mut stanza = Stanza::default();
    let mut line_no = 0usize;
    let mut stanza_start = 0usize;

    let mut flush = |stanza: &mut Stanza, target: &mut MergeTarget<'_>, line_no: usize| -> Result<Option<Change>, Error> {
        if stanza.is_empty() {
            return Ok(None);
        }
        let taken = std::mem::take(stanza);
        let record = taken.into_record(line_no, default_arch)?;
        let change = target.merge(record).map_err(|e| e.with_location("", line_no))?;
        Ok(Some(change))
    };

    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            if let Some(change) = flush(&mut stanza, target, stanza_start)? {
                aggregate = combine(aggregate, change);
            }
            continue;
        }
        if stanza.is_empty() {
            stanza_start = line_no;
        }
        if let Some((key, value)) = trimmed.split_once(':') {
            stanza.field(key.trim(), value.trim());
        }
    }

    if let Some(change) = flush(&mut stanza, target, stanza_start)? {
        aggregate = combine(aggregate, change);
    }

    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::PackageList;
    use crate::rules::MergeRules;

    #[test]
    fn ingests_two_stanzas() {
        let index = "Package: foo\nVersion: 1.2-3\nArchitecture: amd64\n\nPackage: bar\nVersion: 2.0\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let change = ingest(index.as_bytes(), &mut target, None).unwrap();
        assert_eq!(Change::Modified, change);
        assert_eq!(2, list.len());
        let foo = list.find_package("foo", "amd64").unwrap();
        assert_eq!("1.2", &*foo.version());
        assert_eq!("3", &*foo.release());
    }

    #[test]
    fn eof_without_trailing_blank_line_still_flushes() {
        let index = "Package: foo\nVersion: 1.0\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        ingest(index.as_bytes(), &mut target, None).unwrap();
        assert_eq!(1, list.len());
    }

    #[test]
    fn default_arch_used_when_stanza_has_none() {
        let index = "Package: foo\nVersion: 1.0\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        ingest(index.as_bytes(), &mut target, Some("x86_64")).unwrap();
        assert_eq!("x86_64", &*list.head().unwrap().arch());
    }

    #[test]
    fn missing_package_field_is_an_error() {
        let index = "Version: 1.0\n\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        assert!(ingest(index.as_bytes(), &mut target, None).is_err());
    }
}

// vim: foldmethod=marker
