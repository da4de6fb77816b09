//! End-to-end ingestion-stream fixtures (spec §8's concrete scenarios),
//! exercised through the public crate API rather than any internal
//! module, the way the teacher's `tests/generated-fixture-tests` drives
//! its parsers from outside the crate boundary.

use lcfg_pkgspec::ingest::{cpp, MergeTarget};
use lcfg_pkgspec::list::PackageList;
use lcfg_pkgspec::rules::{MergeRules, Options, PrimaryKey};
use lcfg_pkgspec::set::PackageSet;
use lcfg_pkgspec::{format, parser};

#[test]
fn parse_full_spec_line() {
    let record = parser::parse("+foo-1.2-3/x86_64:dev[!server]").unwrap();
    assert_eq!("foo", &*record.name());
    assert_eq!("1.2", &*record.version());
    assert_eq!("3", &*record.release());
    assert_eq!("x86_64", &*record.arch());
    assert_eq!("dev", &*record.flags());
    assert_eq!("!server", &*record.context());
}

#[test]
fn parse_secondary_arch_before_name() {
    let record = parser::parse("x86_64/bar-2.0-1").unwrap();
    assert_eq!("x86_64", &*record.arch());
    assert_eq!("bar", &*record.name());
    assert_eq!("2.0", &*record.version());
    assert_eq!("1", &*record.release());
}

#[test]
fn prefix_add_twice_leaves_one_copy_and_reports_replaced() {
    let mut list = PackageList::with_rules(
        MergeRules::USE_PREFIX | MergeRules::SQUASH_IDENTICAL,
        PrimaryKey::default(),
    );
    list.merge_package(parser::parse("+a-1-1").unwrap()).unwrap();
    let change = list.merge_package(parser::parse("+a-2-1").unwrap()).unwrap();
    assert_eq!(lcfg_pkgspec::change::Change::Replaced, change);
    assert_eq!(1, list.len());
    assert_eq!("2", &*list.head().unwrap().version());
}

#[test]
fn pinned_version_rejects_subsequent_add() {
    let mut list = PackageList::with_rules(MergeRules::USE_PREFIX, PrimaryKey::default());
    list.merge_package(parser::parse("=a-3-1").unwrap()).unwrap();
    let err = list.merge_package(parser::parse("+a-4-1").unwrap()).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("pinned"));
    assert_eq!("3", &*list.head().unwrap().version());
}

#[test]
fn priority_rule_keeps_higher_regardless_of_arrival_order() {
    let mut forward = PackageList::with_rules(MergeRules::USE_PRIORITY, PrimaryKey::default());
    let low = parser::parse("a-1-1").unwrap();
    low.set_priority(5);
    let high = parser::parse("a-2-1").unwrap();
    high.set_priority(7);
    forward.merge_package(low.clone()).unwrap();
    forward.merge_package(high.clone()).unwrap();
    assert_eq!(1, forward.len());
    assert_eq!("2", &*forward.head().unwrap().version());

    let mut backward = PackageList::with_rules(MergeRules::USE_PRIORITY, PrimaryKey::default());
    backward.merge_package(high).unwrap();
    backward.merge_package(low).unwrap();
    assert_eq!(1, backward.len());
    assert_eq!("2", &*backward.head().unwrap().version());
}

#[test]
fn cpp_ingest_with_derive_pragma_sets_derivation() {
    let manifest = "#pragma LCFG derive \"base/foo.h:17\"\nfoo-1-1\n";
    let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
    let mut target = MergeTarget::List(&mut list);
    let mut deps = Vec::new();
    cpp::ingest(manifest.as_bytes(), &mut target, None, Options::USE_META, &mut deps).unwrap();
    assert_eq!(1, list.len());
    assert_eq!("base/foo.h:17", &*list.head().unwrap().derivation());
}

#[test]
fn cpp_ingest_into_a_set_dispatches_per_name_bucket() {
    let manifest = "foo-1-1/x86_64\nbar-2-1/armel\nfoo-2-1/x86_64\n";
    let mut set = PackageSet::with_rules(MergeRules::REPLACE, PrimaryKey::default());
    let mut target = MergeTarget::Set(&mut set);
    let mut deps = Vec::new();
    let change = cpp::ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap();
    assert_eq!(lcfg_pkgspec::change::Change::Modified, change);
    assert_eq!(2, set.len());
    assert_eq!("2", &*set.find_package("foo", "x86_64").unwrap().version());
}

#[test]
fn cpp_ingest_surfaces_file_and_line_on_error() {
    let manifest = "# 1 \"manifest.h\"\nnodashesatall\n";
    let mut list = PackageList::with_rules(MergeRules::KEEP_ALL, PrimaryKey::default());
    let mut target = MergeTarget::List(&mut list);
    let mut deps = Vec::new();
    let err = cpp::ingest(manifest.as_bytes(), &mut target, None, Options::NONE, &mut deps).unwrap_err();
    assert!(err.to_string().contains("manifest.h:1:"));
}

#[test]
fn spec_line_round_trips_through_the_formatter() {
    let original = parser::parse("+foo-1.2-3/x86_64:dev[!server]").unwrap();
    let rendered = format::spec::format(&original, None, Options::NONE);
    let reparsed = parser::parse(&rendered).unwrap();
    assert!(original.equals(&reparsed));
    assert_eq!(original.prefix(), reparsed.prefix());
}
