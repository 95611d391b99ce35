//! Ordered multi-value field containers for headers and query parameters.
//!
//! HTTP headers and query strings share the same shape: a sequence of
//! name/value pairs where names may repeat and the original order matters
//! (`Set-Cookie` lines, repeated query keys). [`FieldMap`] stores both,
//! differing only in how names are compared: headers match names
//! case-insensitively while query parameters are case-sensitive, chosen at
//! construction via [`KeyCase`].
//!
//! Stored names keep their original casing regardless of how lookups are
//! normalized, so serializing a map reproduces exactly what was inserted.

use std::str::FromStr;

/// Name of the header carrying the declared body length.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Name of the header carrying the body media type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// How field names are compared during lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Names match byte-for-byte (query parameters).
    Sensitive,
    /// Names match ignoring ASCII case (headers).
    Insensitive,
}

impl KeyCase {
    fn matches(self, a: &str, b: &str) -> bool {
        match self {
            KeyCase::Sensitive => a == b,
            KeyCase::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

/// An insertion-ordered, multi-valued association of field names to values.
///
/// Duplicate names are kept as separate entries in the order they were added.
/// Lookups never fail: a missing name yields `None` or an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
    case: KeyCase,
}

impl FieldMap {
    /// Creates an empty map with the given name comparison rule.
    pub fn new(case: KeyCase) -> FieldMap {
        FieldMap { entries: Vec::new(), case }
    }

    /// Creates an empty map with case-insensitive names, as used for headers.
    pub fn case_insensitive() -> FieldMap {
        FieldMap::new(KeyCase::Insensitive)
    }

    /// Creates an empty map with case-sensitive names, as used for query parameters.
    pub fn case_sensitive() -> FieldMap {
        FieldMap::new(KeyCase::Sensitive)
    }

    /// Appends a value for `name`, keeping any values already present.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces every value currently stored for `name` with a single value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let case = self.case;
        self.entries.retain(|(stored, _)| !case.matches(stored, &name));
        self.entries.push((name, value.into()));
    }

    /// Returns the first value stored for `name`, if any.
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(stored, _)| self.case.matches(stored, name)).map(|(_, value)| value.as_str())
    }

    /// Returns every value stored for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(stored, _)| self.case.matches(stored, name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Returns true if at least one value is stored for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(stored, _)| self.case.matches(stored, name))
    }

    /// Iterates over every (name, value) pair in insertion order, duplicates
    /// included, with names in their original casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of stored pairs, duplicates counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses the first value for `name` as `T`, falling back to `default`
    /// when the field is absent or does not parse.
    pub fn get_parsed<T: FromStr>(&self, name: &str, default: T) -> T {
        self.get_first(name).and_then(|value| value.trim().parse().ok()).unwrap_or(default)
    }

    /// Like [`get_parsed`](Self::get_parsed), but the default is computed
    /// lazily and never evaluated when a stored value parses.
    pub fn get_parsed_or_else<T, F>(&self, name: &str, default: F) -> T
    where
        T: FromStr,
        F: FnOnce() -> T,
    {
        self.get_first(name).and_then(|value| value.trim().parse().ok()).unwrap_or_else(default)
    }

    /// Decodes an `application/x-www-form-urlencoded` payload into a
    /// case-sensitive map, preserving pair order and duplicate keys.
    ///
    /// Percent-escapes and `+` are decoded per the WHATWG url spec. When
    /// `strip_whitespace` is set, surrounding whitespace is trimmed from each
    /// decoded value.
    pub fn from_urlencoded(input: &str, strip_whitespace: bool) -> Result<FieldMap, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)?;

        let mut fields = FieldMap::case_sensitive();
        for (name, value) in pairs {
            if strip_whitespace {
                fields.append(name, value.trim());
            } else {
                fields.append(name, value);
            }
        }
        Ok(fields)
    }
}
