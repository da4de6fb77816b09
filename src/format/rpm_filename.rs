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
//! RPM-style filename parse/emit (spec §6.3): `NAME-VERSION-RELEASE.ARCH.rpm`.

use crate::error::Error;
use crate::record::PackageRecord;

/// Parse an RPM-style filename, walking backward: strip `.rpm`, split on
/// the last `.` for ARCH, then split on `-` twice for RELEASE and
/// VERSION; the remainder is NAME.
pub fn parse(filename: &str) -> Result<PackageRecord, Error> {
    let rest = filename
        .strip_suffix(".rpm")
        .ok_or_else(|| Error::invalid("rpm_filename", "missing '.rpm' suffix"))?;

    let dot_idx = rest
        .rfind('.')
        .ok_or_else(|| Error::invalid("rpm_filename", "missing '.ARCH' segment"))?;
    let arch = &rest[dot_idx + 1..];
    let rest = &rest[..dot_idx];

    let dash_idx = rest
        .rfind('-')
        .ok_or_else(|| Error::invalid("rpm_filename", "missing '-RELEASE' segment"))?;
    let release = &rest[dash_idx + 1..];
    let rest = &rest[..dash_idx];

    let dash_idx = rest
        .rfind('-')
        .ok_or_else(|| Error::invalid("rpm_filename", "missing '-VERSION' segment"))?;
    let version = &rest[dash_idx + 1..];
    let name = &rest[..dash_idx];

    if name.is_empty() {
        return Err(Error::invalid("rpm_filename", "name must be non-empty"));
    }

    let record = PackageRecord::new();
    record.set_name(name)?;
    record.set_version(version)?;
    record.set_release(release)?;
    record.set_arch(arch)?;
    Ok(record)
}

/// Emit an RPM-style filename. Requires name, version, release, and arch
/// to all be present and non-empty.
pub fn format(record: &PackageRecord) -> Result<String, Error> {
    if !record.has_name() || !record.has_version() || !record.has_release() || !record.has_arch() {
        return Err(Error::invalid(
            "rpm_filename",
            "name, version, release, and arch are all required",
        ));
    }
    Ok(format!(
        "{}-{}-{}.{}.rpm",
        record.name(),
        record.version(),
        record.release(),
        record.arch()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let record = parse("foo-1.2-3.x86_64.rpm").unwrap();
        assert_eq!("foo", &*record.name());
        assert_eq!("1.2", &*record.version());
        assert_eq!("3", &*record.release());
        assert_eq!("x86_64", &*record.arch());
        assert_eq!("foo-1.2-3.x86_64.rpm", format(&record).unwrap());
    }

    #[test]
    fn emit_rejects_missing_fields() {
        let record = PackageRecord::new();
        record.set_name("foo").unwrap();
        assert!(format(&record).is_err());
    }

    #[test]
    fn parse_rejects_missing_suffix() {
        assert!(parse("foo-1.2-3.x86_64").is_err());
    }
}

// vim: foldmethod=marker
