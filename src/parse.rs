use crate::pct_enc::{
    self,
    table::{LABEL, WORD},
    Table,
};
use alloc::string::String;
use core::ops::{Deref, DerefMut};

/// Components extracted from a string by [`parse`].
///
/// Credentials are already percent-decoded. Everything else is
/// left exactly as it appeared in the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Fields<'a> {
    pub scheme: &'a str,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Splits a string into URI components on a best-effort basis.
///
/// Components are tried in the order scheme, credentials, host, port,
/// path, query, fragment. Anything that does not fit a component leaves
/// it at its default and is absorbed by the next one, so this never fails.
pub(crate) fn parse(s: &str) -> Fields<'_> {
    let mut parser = Parser {
        reader: Reader::new(s),
        out: Fields::default(),
    };
    if !s.is_empty() {
        parser.parse_from_scheme();
    }
    parser.out
}

/// Best-effort URI parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Fields<'a>,
}

struct Reader<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl DerefMut for Parser<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        Reader { s, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.s.as_bytes()
    }

    fn rest(&self) -> &'a str {
        &self.s[self.pos..]
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes().get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.s.len());
    }

    /// Counts the ASCII bytes from `pos + from` onward allowed by the table.
    fn count(&self, from: usize, table: Table) -> usize {
        self.bytes()[(self.pos + from).min(self.s.len())..]
            .iter()
            .take_while(|&&x| table.allows_ascii(x))
            .count()
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Reads up to (not including) the first of the given delimiters.
    fn read_until(&mut self, delims: &[u8]) -> &'a str {
        let rest = self.rest();
        let len = rest
            .bytes()
            .position(|x| delims.contains(&x))
            .unwrap_or(rest.len());
        // INVARIANT: Delimiters are ASCII so the end is on a code point boundary.
        self.skip(len);
        &rest[..len]
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }

    fn peek_drive_letter(&self) -> bool {
        matches!(
            (self.peek(0), self.peek(1)),
            (Some(x), Some(b':')) if x.is_ascii_alphabetic()
        )
    }
}

impl Parser<'_> {
    fn parse_from_scheme(&mut self) {
        let len = self.count(0, WORD);
        if len > 0 && self.rest()[len..].starts_with("://") {
            self.out.scheme = &self.rest()[..len];
            // INVARIANT: Skipping the scheme and "://" is fine.
            self.skip(len + 3);
        }
        self.read_credentials();
        self.read_host();
        self.read_port();
        self.parse_from_path();
    }

    /// Reads `user ":" pass "@"` or, failing that, `user "@"`.
    ///
    /// The user is the shortest non-empty prefix followed by a colon
    /// and the password runs up to the last `"@"`, so `"@"` may appear in
    /// either and `":"` may appear in the password. An empty password is
    /// absent. Credentials end at the first whitespace, `"/"` or `"?"`.
    fn read_credentials(&mut self) {
        let rest = self.rest();
        let bound = rest
            .bytes()
            .position(|x| x.is_ascii_whitespace() || x == b'/' || x == b'?')
            .unwrap_or(rest.len());
        let area = &rest[..bound];

        let at = match area.rfind('@') {
            Some(i) if i > 0 => i,
            _ => return,
        };

        // The user takes at least one character.
        let first = area.chars().next().map_or(0, char::len_utf8);
        let colon = area[first..at].find(':').map(|i| i + first);

        let (user, pass) = match colon {
            Some(i) => (&area[..i], Some(&area[i + 1..at]).filter(|s| !s.is_empty())),
            None => (&area[..at], None),
        };

        self.out.username = Some(pct_enc::decode(user).into_owned());
        self.out.password = pass.map(|s| pct_enc::decode(s).into_owned());
        // INVARIANT: Skipping the credentials and the ASCII "@" is fine.
        self.skip(at + 1);
    }

    /// Reads a run of labels separated by single dots.
    ///
    /// A single letter followed by `":"` is a drive letter, not a host.
    fn read_host(&mut self) {
        if self.peek_drive_letter() {
            return;
        }

        let mut len = self.count(0, LABEL);
        if len == 0 {
            return;
        }
        while self.peek(len) == Some(b'.') {
            let label = self.count(len + 1, LABEL);
            if label == 0 {
                break;
            }
            len += 1 + label;
        }

        let host = &self.rest()[..len];
        // INVARIANT: Labels and dots are ASCII so skipping `len` bytes is fine.
        self.skip(len);
        self.out.host = Some(host);
    }

    /// Reads `":" 1*DIGIT`, keeping the value only if it is a valid port number.
    fn read_port(&mut self) {
        if self.peek(0) != Some(b':') || self.peek_digit(1).is_none() {
            return;
        }
        let mut i = 1;
        let mut value = Some(0u16);
        while let Some(x) = self.peek_digit(i) {
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(x as u16));
            i += 1;
        }
        // INVARIANT: Skipping ":" and `i - 1` digits is fine.
        self.skip(i);
        self.out.port = value.filter(|&v| v != 0);
    }

    fn parse_from_path(&mut self) {
        let path = self.read_until(b"?#");
        self.out.path = path.strip_prefix("//").unwrap_or(path);

        if self.read_str("?") {
            self.out.query = self.read_until(b"#");
        }

        if self.read_str("#") {
            let fragment = self.rest();
            // INVARIANT: Skipping the rest of the input is fine.
            self.skip(fragment.len());
            self.out.fragment = fragment;
        }
    }
}
