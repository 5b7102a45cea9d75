//! Percent-encoding utilities.

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{iter::FusedIterator, str};

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

pub(crate) const fn is_hexdig(x: u8) -> bool {
    OCTET_TABLE_LO[x as usize] != 0xff
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) && is_hexdig(lo)
}

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// Percent-encodes a string with the given table.
///
/// A character is preserved if the table [allows](Table::allows) it;
/// otherwise each byte of its UTF-8 encoding is percent-encoded with
/// uppercase hexadecimal digits.
///
/// Note that this function will **not** encode `U+0020` (space) as `U+002B` (+).
///
/// Borrows the input when nothing needs encoding.
///
/// # Examples
///
/// ```
/// use lenient_uri::pct_enc::{encode, table::DATA};
///
/// assert_eq!(encode("pass@(*&!$$word", DATA), "pass%40%28%2A%26%21%24%24word");
/// assert_eq!(encode("foo bar", DATA), "foo%20bar");
/// assert_eq!(encode("¡", DATA), "%C2%A1");
/// ```
#[must_use]
pub fn encode(s: &str, table: Table) -> Cow<'_, str> {
    let mut iter = Encode::new(table, s);
    match iter.next() {
        None => Cow::Borrowed(""),
        Some(EncodedChunk::Unencoded(first)) if iter.source.is_empty() && iter.to_enc.is_empty() => {
            Cow::Borrowed(first)
        }
        Some(first) => {
            let mut buf = String::with_capacity(s.len() * 3);
            buf.push_str(first.as_str());
            for chunk in iter {
                buf.push_str(chunk.as_str());
            }
            Cow::Owned(buf)
        }
    }
}

/// Percent-decodes a string leniently.
///
/// A `%` followed by two hexadecimal digits is decoded to the byte it
/// denotes. Any other `%` is kept as is. Decoded bytes that do not form
/// valid UTF-8 are replaced with [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
///
/// Note that this function will **not** decode `U+002B` (+) as `0x20` (space).
///
/// Borrows the input when it contains no `%`.
///
/// [U+FFFD]: char::REPLACEMENT_CHARACTER
///
/// # Examples
///
/// ```
/// use lenient_uri::pct_enc::decode;
///
/// assert_eq!(decode("%2Fpath%2fto"), "/path/to");
/// assert_eq!(decode("us#$%er"), "us#$%er");
/// assert_eq!(decode("a+b%"), "a+b%");
/// ```
#[must_use]
pub fn decode(s: &str) -> Cow<'_, str> {
    if !s.contains('%') {
        return Cow::Borrowed(s);
    }

    let mut buf = Vec::with_capacity(s.len());
    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
            DecodedChunk::PctDecoded(x) => buf.push(x),
        }
    }

    match String::from_utf8(buf) {
        Ok(s) => Cow::Owned(s),
        Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}

/// An iterator used to decode a string leniently.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
struct Decode<'a> {
    source: &'a str,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecodedChunk<'a> {
    /// An unencoded subslice, possibly containing stray `%` characters.
    Unencoded(&'a str),
    /// A percent-encoded octet, decoded (for example, `"%20"` decoded as `0x20`).
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn pct_encoded_at(&self, i: usize) -> bool {
        let bytes = self.source.as_bytes();
        bytes[i] == b'%' && matches!(bytes[i + 1..], [hi, lo, ..] if is_hexdig_pair(hi, lo))
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            return None;
        }

        if self.pct_encoded_at(0) {
            let bytes = self.source.as_bytes();
            let x = decode_octet(bytes[1], bytes[2]);
            self.source = &self.source[3..];
            return Some(DecodedChunk::PctDecoded(x));
        }

        // A stray '%' at the front is passed through with the unencoded run.
        let i = (1..self.source.len())
            .find(|&i| self.pct_encoded_at(i))
            .unwrap_or(self.source.len());

        let s;
        (s, self.source) = self.source.split_at(i);
        Some(DecodedChunk::Unencoded(s))
    }
}

impl FusedIterator for Decode<'_> {}

/// An iterator used to percent-encode a string slice.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
struct Encode<'s> {
    table: Table,
    source: &'s str,
    to_enc: &'s [u8],
}

impl<'s> Encode<'s> {
    fn new(table: Table, source: &'s str) -> Self {
        Self {
            table,
            source,
            to_enc: &[],
        }
    }
}

/// An item returned by the [`Encode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EncodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A byte, percent-encoded (for example, `0x20` encoded as `"%20"`).
    PctEncoded(&'static str),
}

impl<'a> EncodedChunk<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Self::Unencoded(s) | Self::PctEncoded(s) => s,
        }
    }
}

impl<'a> Iterator for Encode<'a> {
    type Item = EncodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let [x, rem @ ..] = self.to_enc {
            self.to_enc = rem;
            return Some(EncodedChunk::PctEncoded(encode_byte(*x)));
        }

        if self.source.is_empty() {
            return None;
        }

        let mut iter = self.source.char_indices();

        let first_unallowed_i = iter
            .find_map(|(i, ch)| (!self.table.allows(ch)).then_some(i))
            .unwrap_or(self.source.len());

        let next_allowed_i = iter
            .find_map(|(i, ch)| self.table.allows(ch).then_some(i))
            .unwrap_or(self.source.len());

        if first_unallowed_i == 0 {
            let (unallowed, rem) = self.source.split_at(next_allowed_i);
            self.source = rem;

            // The run is non-empty because the character at index 0 is unallowed.
            let (x, rem) = unallowed.as_bytes().split_first()?;
            self.to_enc = rem;

            Some(EncodedChunk::PctEncoded(encode_byte(*x)))
        } else {
            let allowed = &self.source[..first_unallowed_i];
            self.to_enc = &self.source.as_bytes()[first_unallowed_i..next_allowed_i];
            self.source = &self.source[next_allowed_i..];

            Some(EncodedChunk::Unencoded(allowed))
        }
    }
}

impl FusedIterator for Encode<'_> {}

#[cfg(test)]
mod tests {
    use super::{table::*, *};

    #[test]
    fn encode_rfc3986_data() {
        assert_eq!(encode("", DATA), "");
        assert_eq!(encode("abcXYZ019-._~", DATA), "abcXYZ019-._~");
        assert_eq!(
            encode(":/?#[]@!$&'()*+,;= ", DATA),
            "%3A%2F%3F%23%5B%5D%40%21%24%26%27%28%29%2A%2B%2C%3B%3D%20"
        );
        assert_eq!(encode("O=+9zLZ}%{z+:tC", DATA), "O%3D%2B9zLZ%7D%25%7Bz%2B%3AtC");
        assert_eq!(encode("测", DATA), "%E6%B5%8B");
    }

    #[test]
    fn encode_borrows_when_unchanged() {
        assert!(matches!(encode("plain", DATA), Cow::Borrowed("plain")));
        assert!(matches!(encode("a b", DATA), Cow::Owned(_)));
        assert!(matches!(encode(" ", DATA), Cow::Owned(_)));
    }

    #[test]
    fn decode_lenient() {
        assert_eq!(decode("foo%20bar"), "foo bar");
        assert_eq!(decode("%E6%B5%8B"), "测");
        assert_eq!(decode("%"), "%");
        assert_eq!(decode("%%41"), "%A");
        assert_eq!(decode("%4"), "%4");
        assert_eq!(decode("%zz%41%"), "%zzA%");
        assert_eq!(decode("ro@11!%&*(ot"), "ro@11!%&*(ot");
        assert_eq!(decode("%FF"), "\u{FFFD}");
        assert!(matches!(decode("nothing"), Cow::Borrowed("nothing")));
    }

    #[test]
    fn decode_chunks() {
        let chunks: Vec<_> = Decode::new("a%41%b").collect();
        assert_eq!(
            chunks,
            [
                DecodedChunk::Unencoded("a"),
                DecodedChunk::PctDecoded(b'A'),
                DecodedChunk::Unencoded("%b"),
            ]
        );
    }

    #[test]
    fn tables() {
        assert!(UNRESERVED.is_subset(WORD.or(new_table(b"-.~"))));
        assert!(!RESERVED.allows('a'));
        assert!(RESERVED.sub(GEN_DELIMS).is_subset(SUB_DELIMS));
        assert!(LABEL.validate(b"host-10"));
        assert!(!LABEL.validate(b"host.com"));
        assert!(HEXDIG.allows('f'));
        assert!(!DATA.allows('é'));
    }

    fn new_table(bytes: &[u8]) -> Table {
        Table::new(bytes)
    }
}
