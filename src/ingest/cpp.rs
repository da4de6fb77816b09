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
//! The CPP manifest stream consumer (spec §4.6, §6.2): a text stream,
//! typically produced by running a C preprocessor over an LCFG manifest
//! file, consumed line by line.

use super::{CarryForward, MergeTarget, Position};
use crate::change::Change;
use crate::error::Error;
use crate::parser;
use crate::rules::Options;
use std::io::BufRead;

enum Directive {
    Line { lineno: usize, file: String, flags: Vec<u32> },
    Pragma(&'static str, String),
    Unknown,
}

/// Bit in a CPP line directive's flag list marking entry into a new
/// (possibly previously unseen) file.
const FLAG_ENTRY: u32 = 1;

fn parse_directive(content: &str) -> Directive {
    let trimmed = content.trim_start();
    if let Some(rest) = trimmed.strip_prefix("pragma") {
        let rest = rest.trim_start();
        if let Some(rest) = rest.strip_prefix("LCFG") {
            let rest = rest.trim_start();
            for kind in ["derive", "context", "category"] {
                if let Some(rest) = rest.strip_prefix(kind) {
                    let value = rest.trim().trim_matches('"').to_string();
                    return Directive::Pragma(kind, value);
                }
            }
        }
        return Directive::Unknown;
    }

    let mut parts = trimmed.split_whitespace();
    let lineno = parts.next().and_then(|s| s.parse::<usize>().ok());
    let file = parts.next().map(|s| s.trim_matches('"').to_string());
    let flags: Vec<u32> = parts.filter_map(|s| s.parse::<u32>().ok()).collect();
    match (lineno, file) {
        (Some(lineno), Some(file)) => Directive::Line { lineno, file, flags },
        _ => Directive::Unknown,
    }
}

fn apply_directive(
    content: &str,
    pos: &mut Position,
    carry: &mut CarryForward,
    options: Options,
    dependencies: &mut Vec<String>,
) {
    match parse_directive(content) {
        Directive::Line { lineno, file, flags } => {
            if flags.contains(&FLAG_ENTRY) && !dependencies.contains(&file) {
                dependencies.push(file.clone());
            }
            pos.file = file;
            // The directive states the line number of the *next* physical
            // line; the main loop unconditionally advances once per line,
            // so pre-bias by one.
            pos.line = lineno.saturating_sub(1);
        }
        Directive::Pragma(kind, value) => {
            if !options.contains(Options::USE_META) {
                return;
            }
            match kind {
                "derive" => carry.derivation = Some(value),
                "context" => carry.context = Some(value),
                "category" => carry.category = Some(value),
                _ => {}
            }
        }
        Directive::Unknown => {}
    }
}

fn combine(aggregate: Change, change: Change) -> Change {
    match change {
        Change::None => aggregate,
        _ => Change::Modified,
    }
}

fn process_line(
    trimmed: &str,
    pos: &mut Position,
    carry: &mut CarryForward,
    target: &mut MergeTarget<'_>,
    default_arch: Option<&str>,
    options: Options,
    dependencies: &mut Vec<String>,
) -> Result<Option<Change>, Error> {
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(content) = trimmed.strip_prefix('#') {
        apply_directive(content, pos, carry, options, dependencies);
        return Ok(None);
    }

    let record = parser::parse(trimmed).map_err(|e| e.with_location(&pos.file, pos.line))?;
    if !record.has_arch() {
        if let Some(arch) = default_arch {
            record.set_arch(arch).map_err(|e| e.with_location(&pos.file, pos.line))?;
        }
    }
    if options.contains(Options::USE_META) {
        carry.apply(&record, &pos.file, pos.line).map_err(|e| e.with_location(&pos.file, pos.line))?;
    }
    let change = target.merge(record).map_err(|e| e.with_location(&pos.file, pos.line))?;
    Ok(Some(change))
}

/// Consume a CPP manifest stream from `reader`, merging every parsed
/// spec line into `target`. Returns the aggregate [Change]: `Modified`
/// if any record changed the container, else `None`. The first error
/// encountered (parse or merge) is terminal and carries a
/// `<file>:<line>:` prefix.
///
/// `dependencies` accumulates, deduplicated, every file entered via a
/// CPP line directive whose flags include the "new file" bit.
pub fn ingest<R: BufRead>(
    reader: R,
    target: &mut MergeTarget<'_>,
    default_arch: Option<&str>,
    options: Options,
    dependencies: &mut Vec<String>,
) -> Result<Change, Error> {
    let mut pos = Position::default();
    let mut carry = CarryForward::default();
    let mut aggregate = Change::None;

    if options.contains(Options::ALL_CONTEXTS) {
        target.widen_primary_key_for_all_contexts();
    }

    for line in reader.lines() {
        let line = line?;
        pos.advance();
        let trimmed = line.trim();
        if let Some(change) = process_line(trimmed, &mut pos, &mut carry, target, default_arch, options, dependencies)? {
            aggregate = combine(aggregate, change);
        }
    }
    Ok(aggregate)
}

#[cfg(feature = "tokio")]
/// [ingest]'s `tokio`-backed async twin, reading from any
/// [tokio::io::AsyncBufRead], mirroring the way the teacher gates an
/// async reader path behind the same feature.
pub async fn ingest_async<R>(
    reader: R,
    target: &mut MergeTarget<'_>,
    default_arch: Option<&str>,
    options: Options,
    dependencies: &mut Vec<String>,
) -> Result<Change, Error>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    use tokio::io::AsyncBufReadExt;

    let mut pos = Position::default();
    let mut carry = CarryForward::default();
    let mut aggregate = Change::None;
    let mut lines = reader.lines();

    if options.contains(Options::ALL_CONTEXTS) {
        target.widen_primary_key_for_all_contexts();
    }

    while let Some(line) = lines.next_line().await? {
        pos.advance();
        let trimmed = line.trim();
        if let Some(change) = process_line(trimmed, &mut pos, &mut carry, target, default_arch, options, dependencies)? {
            aggregate = combine(aggregate, change);
        }
    }
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::PackageList;
    use crate::rules::MergeRules;

    #[test]
    fn ingests_simple_manifest() {
        let manifest = "foo-1-1\nbar-2-1\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        let change = ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap();
        assert_eq!(Change::Modified, change);
        assert_eq!(2, list.len());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let manifest = "foo-1-1\n\n\nbar-2-1\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap();
        assert_eq!(2, list.len());
    }

    #[test]
    fn default_arch_applied_when_absent() {
        let manifest = "foo-1-1\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        ingest(manifest.as_bytes(), &mut target, Some("x86_64"), Options::NONE, &mut deps).unwrap();
        assert_eq!("x86_64", &*list.head().unwrap().arch());
    }

    #[test]
    fn line_directive_tracks_file_and_dependency_list() {
        let manifest = "# 5 \"base.h\" 1\nfoo-1-1\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap();
        assert_eq!(vec!["base.h".to_string()], deps);
    }

    #[test]
    fn error_carries_file_and_line_prefix() {
        let manifest = "# 1 \"base.h\"\n???-bad-spec\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        let err = ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap_err();
        assert!(err.to_string().contains("base.h:1:"));
    }

    #[test]
    fn metadata_pragmas_carry_forward_when_requested() {
        let manifest = "#pragma LCFG derive \"manifest:top\"\nfoo-1-1\nbar-2-1\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        ingest(manifest.as_bytes(), &mut target, None, Options::USE_META, &mut deps).unwrap();
        for record in list.iter() {
            assert_eq!("manifest:top", &*record.derivation());
        }
    }

    #[test]
    fn all_contexts_keeps_context_conflicting_duplicates() {
        let manifest = "foo-1-1[!server]\nfoo-2-1[server]\n";
        let mut list = PackageList::with_rules(MergeRules::USE_PRIORITY, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        ingest(manifest.as_bytes(), &mut target, None, Options::ALL_CONTEXTS, &mut deps).unwrap();
        assert_eq!(2, list.len());
    }

    #[test]
    fn without_all_contexts_differing_context_is_still_a_conflict() {
        let manifest = "foo-1-1[!server]\nfoo-2-1[server]\n";
        let mut list = PackageList::with_rules(MergeRules::USE_PRIORITY, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        let err = ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn derivation_defaults_to_file_and_line_without_pragma() {
        let manifest = "# 3 \"base.h\"\nfoo-1-1\n";
        let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, Default::default());
        let mut target = MergeTarget::List(&mut list);
        let mut deps = Vec::new();
        ingest(manifest.as_bytes(), &mut target, None, Options::USE_META, &mut deps).unwrap();
        assert_eq!("base.h:3", &*list.head().unwrap().derivation());
    }
}

// vim: foldmethod=marker
