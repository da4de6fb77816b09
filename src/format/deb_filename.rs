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
//! Debian-style filename parse/emit (spec §6.5): `NAME_VERSION[-RELEASE]_ARCH.deb`.

use crate::error::Error;
use crate::record::PackageRecord;

/// Default architecture name mappings applied when emitting a `.deb`
/// filename (spec §6.5).
const ARCH_MAP: &[(&str, &str)] = &[("x86_64", "amd64"), ("noarch", "all")];

fn map_arch(arch: &str) -> &str {
    ARCH_MAP
        .iter()
        .find(|(from, _)| *from == arch)
        .map(|(_, to)| *to)
        .unwrap_or(arch)
}

fn strip_epoch(version: &str) -> &str {
    match version.find(':') {
        Some(idx) => &version[idx + 1..],
        None => version,
    }
}

/// Parse a Debian-style filename: `NAME_VERSION[-RELEASE]_ARCH.deb`.
pub fn parse(filename: &str) -> Result<PackageRecord, Error> {
    let rest = filename
        .strip_suffix(".deb")
        .ok_or_else(|| Error::invalid("deb_filename", "missing '.deb' suffix"))?;

    let parts: Vec<&str> = rest.splitn(3, '_').collect();
    let [name, version_release, arch]: [&str; 3] = parts
        .try_into()
        .map_err(|_| Error::invalid("deb_filename", "expected NAME_VERSION[-RELEASE]_ARCH"))?;

    let (version, release) = match version_release.rsplit_once('-') {
        Some((version, release)) => (version, Some(release)),
        None => (version_release, None),
    };

    let record = PackageRecord::new();
    record.set_name(name)?;
    record.set_version(version)?;
    if let Some(release) = release {
        record.set_release(release)?;
    }
    record.set_arch(arch)?;
    Ok(record)
}

/// Emit a Debian-style filename. Requires name, version, and arch; release
/// is optional. Any epoch prefix (`N:`) on the version is stripped, and
/// the architecture is mapped through the default table (`x86_64` ->
/// `amd64`, `noarch` -> `all`).
pub fn format(record: &PackageRecord) -> Result<String, Error> {
    if !record.has_name() || !record.has_version() || !record.has_arch() {
        return Err(Error::invalid(
            "deb_filename",
            "name, version, and arch are all required",
        ));
    }

    let version = strip_epoch(&record.version());
    let version_release = if record.has_release() {
        format!("{version}-{}", record.release())
    } else {
        version.to_owned()
    };

    Ok(format!(
        "{}_{}_{}.deb",
        record.name(),
        version_release,
        map_arch(&record.arch())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_release() {
        let record = parse("foo_1.2-3_amd64.deb").unwrap();
        assert_eq!("foo", &*record.name());
        assert_eq!("1.2", &*record.version());
        assert_eq!("3", &*record.release());
        assert_eq!("amd64", &*record.arch());
        assert_eq!("foo_1.2-3_amd64.deb", format(&record).unwrap());
    }

    #[test]
    fn maps_default_architectures_on_emit() {
        let record = PackageRecord::new();
        record.set_name("foo").unwrap();
        record.set_version("1.0").unwrap();
        record.set_arch("x86_64").unwrap();
        assert_eq!("foo_1.0_amd64.deb", format(&record).unwrap());

        record.set_arch("noarch").unwrap();
        assert_eq!("foo_1.0_all.deb", format(&record).unwrap());
    }

    #[test]
    fn strips_epoch_on_emit() {
        let record = PackageRecord::new();
        record.set_name("foo").unwrap();
        record.set_version("1:1.0").unwrap();
        record.set_arch("amd64").unwrap();
        assert_eq!("foo_1.0_amd64.deb", format(&record).unwrap());
    }

    #[test]
    fn without_release_segment() {
        let record = parse("foo_1.0_amd64.deb").unwrap();
        assert!(!record.has_release());
    }
}

// vim: foldmethod=marker
