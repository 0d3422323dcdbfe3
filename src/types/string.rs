//! Borrowed string values as they appear in row batches.

use std::fmt;

/// A `(ptr, len)` view of string bytes owned by someone else.
///
/// Equality, ordering and hashing are byte-wise over the window. The bytes
/// are not required to be UTF-8.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrSlice<'a> {
    bytes: &'a [u8],
}

impl<'a> StrSlice<'a> {
    /// Creates a view over `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is longer than `u32::MAX`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        assert!(
            u32::try_from(bytes.len()).is_ok(),
            "string value longer than u32::MAX bytes"
        );
        StrSlice { bytes }
    }

    /// Returns the viewed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the window length in bytes.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.bytes.len() as u32
    }

    /// Returns true for the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<'a> From<&'a str> for StrSlice<'a> {
    fn from(s: &'a str) -> Self {
        StrSlice::new(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for StrSlice<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        StrSlice::new(bytes)
    }
}

impl fmt::Debug for StrSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.bytes))
    }
}
