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
//! The ingestion loop (spec §4.6, §6.2, §6.4): line-oriented consumers
//! that turn an external byte stream into merges against a
//! [crate::list::PackageList] or [crate::set::PackageSet].
//!
//! Grounded in the teacher's `control::de` reader-driven decoding style
//! (`BufRead`-over-`Read`, `tokio`-gated async twin) generalized from
//! "decode one RFC2822 paragraph at a time" to "decode one spec line (or
//! stanza) at a time, tracking carried-forward metadata across lines".

pub mod cpp;
pub mod debian_index;

use crate::change::Change;
use crate::error::Error;
use crate::list::PackageList;
use crate::record::PackageRecord;
use crate::rules::PrimaryKey;
use crate::set::PackageSet;

/// The container an ingestion consumer merges parsed records into.
pub enum MergeTarget<'a> {
    /// Merge into a single [PackageList].
    List(&'a mut PackageList),
    /// Merge into a [PackageSet].
    Set(&'a mut PackageSet),
}

impl MergeTarget<'_> {
    fn merge(&mut self, record: PackageRecord) -> Result<Change, Error> {
        match self {
            MergeTarget::List(list) => list.merge_package(record),
            MergeTarget::Set(set) => set.merge_package(record),
        }
    }

    /// Widen the primary key to include `CTX`, per spec §6.7's
    /// `ALL_CONTEXTS` ingest option: context-conflicting duplicates stop
    /// colliding on `NAME`/`ARCH` alone and are kept apart instead of
    /// being merged away.
    fn widen_primary_key_for_all_contexts(&mut self) {
        match self {
            MergeTarget::List(list) => list.set_primary_key(list.primary_key() | PrimaryKey::CTX),
            MergeTarget::Set(set) => set.set_primary_key(set.primary_key() | PrimaryKey::CTX),
        }
    }
}

/// Metadata carried forward across spec lines by `#pragma LCFG ...`
/// directives (spec §4.6). Each field is sticky: once set, it applies to
/// every subsequent record until overwritten by another pragma of the
/// same kind.
#[derive(Debug, Clone, Default)]
pub struct CarryForward {
    derivation: Option<String>,
    context: Option<String>,
    category: Option<String>,
}

impl CarryForward {
    /// Apply the carried-forward metadata to `record`: derivation (or
    /// `<file>:<line>` if none has been carried), context (via
    /// `set_context` using a permissive validator), and category --
    /// which has no dedicated field on [PackageRecord] (spec §3.1 lists
    /// seven fields, none named "category"), so it is folded into
    /// derivation as a `category:<value>` tag rather than inventing a
    /// field the record model doesn't have.
    ///
    /// A carried `#pragma LCFG context` value that the validator rejects
    /// is a terminal error rather than a silent no-op: a caller who asked
    /// for metadata carry-forward expects a rejected context to surface,
    /// not to vanish from the record (spec §4.6, §7).
    fn apply(&self, record: &PackageRecord, file: &str, line: usize) -> Result<(), Error> {
        let derivation = self.derivation.clone().unwrap_or_else(|| format!("{file}:{line}"));
        record.set_derivation(&derivation);
        if let Some(context) = &self.context {
            record.set_context(context, &crate::context::PermissiveContextValidator)?;
        }
        if let Some(category) = &self.category {
            record.append_derivation(&format!("category:{category}"));
        }
        Ok(())
    }
}

/// Tracks the current source position as CPP line directives rewrite it.
#[derive(Debug, Clone, Default)]
struct Position {
    file: String,
    line: usize,
}

impl Position {
    fn advance(&mut self) {
        self.line += 1;
    }
}

#[cfg(feature = "tokio")]
mod _tokio {
    pub use super::cpp::ingest_async;
}

#[cfg(feature = "tokio")]
pub use _tokio::ingest_async;

// vim: foldmethod=marker
