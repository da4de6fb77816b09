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
//! Bitmask types: merge rules, primary-key fields, and ingest/emit options.
//!
//! No `bitflags` dependency is pulled in for these -- none of the example
//! repos this crate was grounded on reach for that crate for a handful of
//! named, combinable flags, and a small hand-rolled newtype over `u8` is
//! the direct generalization of how the corpus represents closed sets of
//! named values (plain `enum`s and `const` tables).

use std::ops::{BitOr, BitOrAssign};

macro_rules! bitmask {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $flag:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
        pub struct $name(u8);

        impl $name {
            /// No flags set.
            pub const NONE: Self = Self(0);
            $(
                $(#[$fmeta])*
                pub const $flag: Self = Self($value);
            )+

            /// True if every flag set in `other` is also set in `self`.
            pub const fn contains(self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            /// True if no flags are set.
            pub const fn is_none(self) -> bool {
                self.0 == 0
            }

            /// Raw bitmask value.
            pub const fn bits(self) -> u8 {
                self.0
            }

            /// Construct from a raw bitmask value.
            pub const fn from_bits(bits: u8) -> Self {
                Self(bits)
            }
        }

        impl BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

bitmask! {
    /// Conflict-resolution strategy bitmask for merging into a
    /// [crate::list::PackageList] or [crate::set::PackageSet]. See spec
    /// §3.4 and §4.4. Flags are combined with bitwise OR; rule ordering at
    /// merge time is contractual (§4.4), not determined by flag value.
    MergeRules {
        /// Keep every record with no deduplication at all (duplicates
        /// permitted, appended in arrival order).
        KEEP_ALL = 0b0000_0001,
        /// Drop a new record that [crate::record::PackageRecord::equals] an
        /// existing one, but refresh its position/derivation.
        SQUASH_IDENTICAL = 0b0000_0010,
        /// Resolve a primary-key conflict by comparing `priority`; equal
        /// priorities are a conflict.
        USE_PRIORITY = 0b0000_0100,
        /// Dispatch on the new record's prefix character (`+ - = ? ~`)
        /// before falling through to the other rules.
        USE_PREFIX = 0b0000_1000,
        /// Unconditionally replace any existing record sharing a primary key.
        REPLACE = 0b0001_0000,
    }
}

bitmask! {
    /// Which fields define "the same package" for merge-conflict purposes.
    /// Default is `NAME | ARCH` per spec §3.2.
    PrimaryKey {
        /// Package name (always implicitly compared; this flag exists for
        /// symmetry with ARCH/CTX but has no effect on its own -- name is
        /// always part of the key).
        NAME = 0b0000_0001,
        /// Include architecture in the primary key.
        ARCH = 0b0000_0010,
        /// Include context expression in the primary key.
        CTX = 0b0000_0100,
    }
}

impl PrimaryKey {
    /// Default primary key: name and architecture.
    pub const DEFAULT: Self = Self::from_bits(Self::NAME.bits() | Self::ARCH.bits());
}

impl Default for PrimaryKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

bitmask! {
    /// Option bitmask threaded through spec-line/ingest/emit entry points.
    /// See spec §6.7.
    Options {
        /// Append a trailing newline to formatted output.
        NEWLINE = 0b0000_0001,
        /// Suppress the context expression when formatting.
        NOCONTEXT = 0b0000_0010,
        /// Suppress the prefix character when formatting.
        NOPREFIX = 0b0000_0100,
        /// Include derivation/context pragmas when emitting, and carry
        /// forward metadata pragmas when ingesting.
        USE_META = 0b0000_1000,
        /// Keep context-conflicting duplicates during ingest instead of
        /// merging them away.
        ALL_CONTEXTS = 0b0001_0000,
        /// Treat a missing input file as an empty stream rather than an error.
        ALLOW_NOEXIST = 0b0010_0000,
    }
}


// vim: foldmethod=marker
