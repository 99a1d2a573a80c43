//! Borrowed byte views over argument and declaration text.

use std::borrow::Cow;
use std::cell::Cell;
use std::ffi::CStr;
use std::fmt;

const NUL: u8 = 0;

/// How far a [`StrView`] extends into its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extent {
    /// Explicit byte count. Embedded NULs are part of the view.
    Bounded(usize),
    /// Up to the first NUL (or the end of the buffer).
    Unbounded,
}

/// A non-owning view over a run of bytes.
///
/// A view never copies or allocates. It comes in two flavours:
///
/// - *bounded*: an explicit length, built by [`StrView::bounded`] or from a
///   `&str`. The view covers exactly that many bytes.
/// - *unbounded*: built from a C-style buffer by [`StrView::unbounded`] or
///   [`StrView::from_cstr`]. The logical length is the distance to the first
///   NUL, scanned on first use and cached.
///
/// Equality compares the logical bytes of both sides, so a bounded `"abc"`
/// equals an unbounded `"abc\0"` but not an unbounded `"ab\0c"`.
pub struct StrView<'a> {
    bytes: &'a [u8],
    extent: Extent,
    scanned: Cell<Option<usize>>,
}

impl<'a> StrView<'a> {
    /// An empty view.
    pub const fn empty() -> Self {
        Self {
            bytes: &[],
            extent: Extent::Bounded(0),
            scanned: Cell::new(None),
        }
    }

    /// View the first `len` bytes of `bytes`.
    ///
    /// `len` is clamped to the buffer length.
    pub fn bounded(bytes: &'a [u8], len: usize) -> Self {
        Self {
            bytes,
            extent: Extent::Bounded(len.min(bytes.len())),
            scanned: Cell::new(None),
        }
    }

    /// View `bytes` up to its first NUL. A buffer without a NUL is viewed in
    /// full.
    pub fn unbounded(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            extent: Extent::Unbounded,
            scanned: Cell::new(None),
        }
    }

    pub fn from_cstr(s: &'a CStr) -> Self {
        Self::unbounded(s.to_bytes_with_nul())
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self.extent, Extent::Bounded(_))
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        match self.extent {
            Extent::Bounded(len) => len,
            Extent::Unbounded => match self.scanned.get() {
                Some(len) => len,
                None => {
                    let len = self
                        .bytes
                        .iter()
                        .position(|&b| b == NUL)
                        .unwrap_or(self.bytes.len());
                    self.scanned.set(Some(len));
                    len
                }
            },
        }
    }

    /// True for an empty buffer, a zero length, or a view whose first byte is
    /// a NUL (whatever length was declared).
    pub fn is_empty(&self) -> bool {
        self.bytes.first().is_none_or(|&b| b == NUL) || self.len() == 0
    }

    /// The viewed bytes. The returned slice borrows the source buffer, not
    /// the view.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[..self.len()]
    }

    /// The viewed bytes as UTF-8, if they are valid.
    pub fn to_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Sub-view starting at `offset`, at most `count` bytes long.
    ///
    /// `count = None` means "to the end"; on an unbounded view the result
    /// stays unbounded. An empty source, a zero count, or an offset at or
    /// past the end all give an empty view.
    pub fn substr(&self, offset: usize, count: Option<usize>) -> StrView<'a> {
        let len = self.len();
        if self.is_empty() || offset >= len || count == Some(0) {
            return StrView::empty();
        }
        let rest = &self.bytes[offset..];
        match (count, self.extent) {
            (None, Extent::Unbounded) => StrView::unbounded(rest),
            (None, Extent::Bounded(_)) => StrView::bounded(rest, len - offset),
            (Some(count), _) => StrView::bounded(rest, count.min(len - offset)),
        }
    }

    /// Index of the first `c`. The scan stops at a NUL or the logical end.
    pub fn find_first_of(&self, c: u8) -> Option<usize> {
        for (i, &b) in self.as_bytes().iter().enumerate() {
            if b == NUL {
                return None;
            }
            if b == c {
                return Some(i);
            }
        }
        None
    }

    /// Index of the last `c`, scanning back from the logical end.
    pub fn find_last_of(&self, c: u8) -> Option<usize> {
        let bytes = self.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        // Index 0 is handled after the loop so the counter never wraps.
        let mut i = bytes.len() - 1;
        while i > 0 {
            if bytes[i] == c {
                return Some(i);
            }
            i -= 1;
        }
        if bytes[0] == c { Some(0) } else { None }
    }

    /// Split at the first `sep` into the part before it and, if `sep` was
    /// found, the part after it.
    pub fn split_once(&self, sep: u8) -> (StrView<'a>, Option<StrView<'a>>) {
        match self.find_first_of(sep) {
            Some(at) => (self.substr(0, Some(at)), Some(self.substr(at + 1, None))),
            None => (self.clone(), None),
        }
    }
}

impl Clone for StrView<'_> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes,
            extent: self.extent,
            scanned: Cell::new(self.scanned.get()),
        }
    }
}

impl Default for StrView<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'b> PartialEq<StrView<'b>> for StrView<'_> {
    fn eq(&self, other: &StrView<'b>) -> bool {
        if std::ptr::eq(self.bytes.as_ptr(), other.bytes.as_ptr()) && self.len() == other.len() {
            return true;
        }
        // Lengths are compared first: the shorter (or unbounded) side must end
        // exactly where the other one does.
        self.len() == other.len() && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StrView<'_> {}

impl PartialEq<str> for StrView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for StrView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a> From<&'a str> for StrView<'a> {
    fn from(s: &'a str) -> Self {
        Self::bounded(s.as_bytes(), s.len())
    }
}

impl<'a> From<&'a String> for StrView<'a> {
    fn from(s: &'a String) -> Self {
        Self::from(s.as_str())
    }
}

impl<'a> From<&'a CStr> for StrView<'a> {
    fn from(s: &'a CStr) -> Self {
        Self::from_cstr(s)
    }
}

impl fmt::Debug for StrView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrView")
            .field("text", &self.to_string_lossy())
            .field("bounded", &self.is_bounded())
            .finish()
    }
}

impl fmt::Display for StrView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_equals_unbounded_only_at_terminator() {
        let c = b"abc\0";
        let b = StrView::unbounded(c);

        assert_eq!(StrView::bounded(b"abc", 3), b);
        assert_ne!(StrView::bounded(b"ab", 2), b);
        assert_ne!(StrView::bounded(b"abcd", 4), b);

        let split = StrView::unbounded(b"ab\0c\0");
        assert_ne!(StrView::bounded(b"abc", 3), split);
        assert_eq!(StrView::bounded(b"ab\0c", 2), split);
    }

    #[test]
    fn bounded_keeps_embedded_nul() {
        let a = StrView::bounded(b"ab\0c", 4);
        let b = StrView::bounded(b"ab\0d", 4);
        assert_eq!(a.len(), 4);
        assert_ne!(a, b);
        assert_eq!(a, StrView::bounded(b"ab\0c", 4));
    }

    #[test]
    fn key_prefix_matches_registered_name() {
        let arg = StrView::unbounded(b"--output=out.txt\0");
        let (key, value) = arg.split_once(b'=');
        assert!(key.is_bounded());
        assert_eq!(key, StrView::from("--output"));
        assert_eq!(value.unwrap(), StrView::from("out.txt"));
    }

    #[test]
    fn split_without_separator_keeps_whole_token() {
        let arg = StrView::from("--test");
        let (key, value) = arg.split_once(b'=');
        assert_eq!(key, "--test");
        assert!(value.is_none());

        let (key, value) = StrView::from("-o=").split_once(b'=');
        assert_eq!(key, "-o");
        assert!(value.unwrap().is_empty());
    }

    #[test]
    fn unbounded_length_stops_at_nul() {
        let v = StrView::unbounded(b"hello\0world");
        assert_eq!(v.len(), 5);
        assert_eq!(v.as_bytes(), b"hello");
        assert_eq!(StrView::unbounded(b"no-nul").len(), 6);
    }

    #[test]
    fn substr_edge_cases_are_empty() {
        let v = StrView::from("abcdef");
        assert!(StrView::empty().substr(0, None).is_empty());
        assert!(v.substr(2, Some(0)).is_empty());
        assert!(v.substr(6, None).is_empty());
        assert!(v.substr(100, Some(3)).is_empty());

        assert_eq!(v.substr(2, Some(2)), "cd");
        assert_eq!(v.substr(4, Some(100)), "ef");
        assert_eq!(v.substr(1, None), "bcdef");
    }

    #[test]
    fn substr_of_unbounded_stays_unbounded() {
        let v = StrView::unbounded(b"key=value\0junk");
        let tail = v.substr(4, None);
        assert!(!tail.is_bounded());
        assert_eq!(tail, "value");
        assert!(v.substr(0, Some(3)).is_bounded());
    }

    #[test]
    fn leading_nul_is_empty() {
        let v = StrView::bounded(b"\0abc", 4);
        assert!(v.is_empty());
        assert_eq!(v.len(), 4);
        assert!(v.substr(1, None).is_empty());
    }

    #[test]
    fn find_first_of_stops_at_nul() {
        let v = StrView::bounded(b"ab\0=c", 5);
        assert_eq!(v.find_first_of(b'='), None);
        assert_eq!(StrView::from("a=b=c").find_first_of(b'='), Some(1));
        assert_eq!(StrView::from("abc").find_first_of(b'='), None);
    }

    #[test]
    fn find_last_of_checks_index_zero() {
        assert_eq!(StrView::from("/usr/bin/tool").find_last_of(b'/'), Some(8));
        assert_eq!(StrView::from("/tool").find_last_of(b'/'), Some(0));
        assert_eq!(StrView::from("tool").find_last_of(b'/'), None);
        assert_eq!(StrView::from("/").find_last_of(b'/'), Some(0));
        assert_eq!(StrView::empty().find_last_of(b'/'), None);
    }

    #[test]
    fn identical_views_short_circuit() {
        let text = "same";
        let a = StrView::from(text);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn cstr_views_are_unbounded() {
        let c = c"--help";
        let v = StrView::from(c);
        assert!(!v.is_bounded());
        assert_eq!(v, "--help");
        assert_eq!(v.to_str(), Some("--help"));
    }
}
