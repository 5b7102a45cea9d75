//! Decoded view of a query component.

use crate::pct_enc::{self, table::DATA};
use alloc::{
    borrow::ToOwned,
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, iter::FusedIterator, slice};

/// An ordered mapping from query keys to values.
///
/// Keys and values are stored percent-decoded. A key maps to at most one
/// value: [`insert`](Self::insert) overwrites an existing key in place and
/// appends a new key at the end, and [`parse`](Self::parse) keeps the last
/// value of a repeated key.
///
/// The [`Display`](core::fmt::Display) implementation joins the pairs
/// with `'&'` and percent-encodes everything except the `unreserved`
/// characters of RFC 3986. `U+0020` (space) is encoded as `"%20"`,
/// never as `'+'`.
///
/// # Examples
///
/// ```
/// use lenient_uri::Query;
///
/// let mut query = Query::parse("ca=%2Fpath%2Fto%2Fca&ssl=1&ssl=0");
/// assert_eq!(query.get("ca"), Some("/path/to/ca"));
/// assert_eq!(query.get("ssl"), Some("0"));
/// assert!(!query.contains_key("key"));
///
/// query.insert("key", "a b");
/// assert_eq!(query.to_string(), "ca=%2Fpath%2Fto%2Fca&ssl=0&key=a%20b");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    pairs: Vec<(String, String)>,
    // Position of each key in `pairs`.
    index: BTreeMap<String, usize>,
}

impl Query {
    /// Creates an empty `Query`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw query string, without the leading `'?'`.
    ///
    /// The string is split on `'&'` and each segment on its first `'='`.
    /// A segment without `'='` is a key with an empty value. Empty segments
    /// and segments with an empty key are skipped. Malformed percent-encoded
    /// octets are kept as is.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::new();
        for segment in raw.split('&') {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            if key.is_empty() {
                continue;
            }
            query.insert(pct_enc::decode(key), pct_enc::decode(value));
        }
        query
    }

    /// Returns the value of a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.pairs[i].1.as_str())
    }

    /// Checks whether a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Sets the value of a key, returning the previous value.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let key = key.as_ref();
        let value = value.into();
        match self.position(key) {
            Some(i) => Some(core::mem::replace(&mut self.pairs[i].1, value)),
            None => {
                self.index.insert(key.to_owned(), self.pairs.len());
                self.pairs.push((key.to_owned(), value));
                None
            }
        }
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Checks whether there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns an iterator over the decoded key-value pairs in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.pairs.iter(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn encode_to<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                w.write_char('&')?;
            }
            w.write_str(&pct_enc::encode(key, DATA))?;
            w.write_char('=')?;
            w.write_str(&pct_enc::encode(value, DATA))?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Self::new();
        for (k, v) in iter {
            query.insert(k, v.to_string());
        }
        query
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over the key-value pairs of a [`Query`].
///
/// This struct is created by [`Query::iter`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
