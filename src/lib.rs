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
//! `lcfg-pkgspec` is the core data model, spec-line parser, merge engine,
//! and indexed package set behind LCFG's package specification language.
//!
//! LCFG configures a host by resolving, for every package a profile
//! names, which version (and from which architecture/context) should
//! actually be installed, out of possibly many conflicting candidate
//! lines contributed by different parts of a profile. This crate is the
//! reusable core of that resolution: parsing one spec line into a
//! [record::PackageRecord], accumulating records into an ordered
//! [list::PackageList] or a hash-indexed [set::PackageSet], and merging
//! new records against what's already there according to a configurable
//! rule set ([rules::MergeRules]).
//!
//! # Overview
//!
//! - [record] -- the [record::PackageRecord] value object: name,
//!   architecture, version, release, flags, context expression,
//!   derivation, prefix, and priority.
//! - [parser] -- the spec-line grammar, turning `[PREFIX]NAME-VERSION-RELEASE[/ARCH][:FLAGS][[CONTEXT]]`
//!   text into a [record::PackageRecord].
//! - [list] -- [list::PackageList], an ordered sequence of records, and
//!   the merge algebra ([list::PackageList::merge_package]) that is this
//!   crate's hardest subsystem.
//! - [set] -- [set::PackageSet], an open-addressed hash table of
//!   [list::PackageList] buckets keyed by package name.
//! - [ingest] -- line-oriented stream consumers (a CPP-preprocessed
//!   manifest, a Debian-index stanza stream) that drive the merge engine
//!   from external input.
//! - [format] -- pure formatters rendering a record back out: the
//!   canonical spec line, RPM/Debian filenames, an XML fragment, a CPP
//!   metadata block, a one-line summary, and shell-eval assignments.
//! - [context] -- traits an embedder implements to plug in real context
//!   expression evaluation, validation, combination, and version
//!   comparison; permissive/lexicographic defaults are provided.
//! - [rules] -- the [rules::MergeRules], [rules::PrimaryKey], and
//!   [rules::Options] bitmasks threaded through the container and
//!   ingestion APIs.
//! - [change] -- the [change::Change] outcome code every mutating
//!   container operation returns.
//! - [error] -- the crate-wide [error::Error] type.
//!
//! # Feature Flags
//!
//! | Flag      | Description                                                         |
//! | --------- | -------------------------------------------------------------------- |
//! | `full`    | Enable all optional features.                                        |
//! | `chrono`  | Pulls in [chrono] for callers that want timestamped metadata of their |
//! |           | own; derivation itself stays exactly `<file>:<line>` (spec §4.6).    |
//! | `serde`   | [serde::Serialize]/[serde::Deserialize] for the value types.          |
//! | `tokio`   | Async ingestion variants reading from [tokio::io::AsyncBufRead].      |
//!
//! # Concurrency
//!
//! Single-threaded cooperative by design (spec's concurrency model): no
//! operation in this crate blocks or suspends outside the ingestion
//! loop's read of its input stream, and there is no internal event loop
//! or shared global mutable state. [record::PackageRecord] is
//! reference-counted (`Rc`-backed) rather than thread-safe; callers
//! wanting multi-threaded access must serialize it themselves or
//! substitute their own concurrency-safe container wrapper.

#![deny(missing_docs)]
#![deny(missing_copy_implementations)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod change;
pub mod context;
pub mod error;
pub mod format;
pub mod ingest;
pub mod list;
pub mod parser;
pub mod record;
pub mod rules;
pub mod set;

// vim: foldmethod=marker
