//! String helpers.
//!
//! Casing and delimiter aware splitting, `String` builder conveniences and
//! joiners that render sequences or key/value pairs as a single string.

use std::fmt::Display;

use crate::guard::{self, ArgumentError};

/// Alternates tried, in order, when the input already contains a colon.
const FALLBACK_DELIMITERS: [char; 5] = ['|', '^', '=', '/', '-'];

const LINE_TERMINATOR: &str = "\n";

/// Inserts a space before every upper-case character except the first.
///
/// ```
/// use statebag::text::add_spaces_by_casing;
///
/// assert_eq!(add_spaces_by_casing("TheQuickBrownFox"), "The Quick Brown Fox");
/// ```
pub fn add_spaces_by_casing(value: &str) -> String {
    add_characters_by_casing(value, " ")
}

/// Inserts `insert` before every character that is its own upper-case form,
/// unless nothing has been written yet.
///
/// Characters without case (digits, punctuation, whitespace) count as upper
/// case here.
pub fn add_characters_by_casing(value: &str, insert: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if is_upper_form(c) && !out.is_empty() {
            out.push_str(insert);
        }
        out.push(c);
    }
    out
}

fn is_upper_form(c: char) -> bool {
    let mut upper = c.to_uppercase();
    upper.next() == Some(c) && upper.next().is_none()
}

/// Splits `value` on `delimiter`, first swapping the delimiter for one that
/// cannot collide with a colon already in the text.
///
/// The working delimiter is `:` unless `value` contains a colon, in which case
/// the first of `| ^ = / -` absent from `value` is used. When all of them are
/// present the first character of `delimiter` is used instead, which can split
/// on characters the caller never asked for.
pub fn split_guessing(value: &str, delimiter: &str) -> Result<Vec<String>, ArgumentError> {
    guard::is_not_empty(delimiter, "delimiter")?;

    let mut working = ':';
    if value.contains(':') {
        working = FALLBACK_DELIMITERS
            .iter()
            .copied()
            .find(|candidate| !value.contains(*candidate))
            .unwrap_or_else(|| delimiter.chars().next().unwrap_or(':'));
    }

    let mut buf = [0u8; 4];
    let replaced = value.replace(delimiter, working.encode_utf8(&mut buf));
    Ok(replaced.split(working).map(str::to_string).collect())
}

pub fn is_null_or_empty(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

pub fn is_not_null_or_empty(value: Option<&str>) -> bool {
    !is_null_or_empty(value)
}

/// Returns `value` without its last `count` characters.
pub fn remove_from_end(value: &str, count: usize) -> Result<String, ArgumentError> {
    let mut out = value.to_string();
    out.remove_from_end(count)?;
    Ok(out)
}

/// Returns `value` without its first `count` characters.
pub fn remove_from_start(value: &str, count: usize) -> Result<String, ArgumentError> {
    let mut out = value.to_string();
    out.remove_from_start(count)?;
    Ok(out)
}

/// Conditional appends and trimming on a growable `String`.
///
/// The append methods return `&mut Self` so calls can be chained.
pub trait StringBuilderExt {
    fn append_if_empty(&mut self, value: &str) -> &mut Self;

    fn append_if_not_empty(&mut self, value: &str) -> &mut Self;

    /// Appends `value` followed by a line terminator when empty.
    fn append_line_if_empty(&mut self, value: &str) -> &mut Self;

    /// Appends `value` followed by a line terminator when not empty.
    fn append_line_if_not_empty(&mut self, value: &str) -> &mut Self;

    fn push_line_if_empty(&mut self) -> &mut Self;

    fn push_line_if_not_empty(&mut self) -> &mut Self;

    /// Drops the last `count` characters.
    fn remove_from_end(&mut self, count: usize) -> Result<&mut Self, ArgumentError>;

    /// Drops the first `count` characters.
    fn remove_from_start(&mut self, count: usize) -> Result<&mut Self, ArgumentError>;
}

impl StringBuilderExt for String {
    fn append_if_empty(&mut self, value: &str) -> &mut Self {
        if self.is_empty() {
            self.push_str(value);
        }
        self
    }

    fn append_if_not_empty(&mut self, value: &str) -> &mut Self {
        if !self.is_empty() {
            self.push_str(value);
        }
        self
    }

    fn append_line_if_empty(&mut self, value: &str) -> &mut Self {
        if self.is_empty() {
            self.push_str(value);
            self.push_str(LINE_TERMINATOR);
        }
        self
    }

    fn append_line_if_not_empty(&mut self, value: &str) -> &mut Self {
        if !self.is_empty() {
            self.push_str(value);
            self.push_str(LINE_TERMINATOR);
        }
        self
    }

    fn push_line_if_empty(&mut self) -> &mut Self {
        self.append_line_if_empty("")
    }

    fn push_line_if_not_empty(&mut self) -> &mut Self {
        self.append_line_if_not_empty("")
    }

    fn remove_from_end(&mut self, count: usize) -> Result<&mut Self, ArgumentError> {
        let len = self.chars().count();
        guard::is_within(count, len, "count")?;

        let cut = self
            .char_indices()
            .nth(len - count)
            .map(|(idx, _)| idx)
            .unwrap_or(self.len());
        self.truncate(cut);
        Ok(self)
    }

    fn remove_from_start(&mut self, count: usize) -> Result<&mut Self, ArgumentError> {
        guard::is_within(count, self.chars().count(), "count")?;

        let cut = self
            .char_indices()
            .nth(count)
            .map(|(idx, _)| idx)
            .unwrap_or(self.len());
        self.drain(..cut);
        Ok(self)
    }
}

/// Joins `items` with `delimiter`.
///
/// The delimiter is only written once something is in the output, so leading
/// empty items do not produce a leading delimiter.
pub fn delimit<I>(items: I, delimiter: &str) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    for item in items {
        out.append_if_not_empty(delimiter);
        out.push_str(item.as_ref());
    }
    out
}

/// Joins `key{separator}value` pairs with `delimiter`.
pub fn delimit_pairs<I, K, V>(pairs: I, delimiter: &str, separator: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    delimit_map(pairs, delimiter, false, separator)
}

/// Like [`delimit_pairs`], optionally rendering values only.
pub fn delimit_map<I, K, V>(pairs: I, delimiter: &str, exclude_keys: bool, separator: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut out = String::new();
    for (key, value) in pairs {
        out.append_if_not_empty(delimiter);
        write_pair(&mut out, &key, &value, exclude_keys, separator);
    }
    out
}

/// Joins `items` one per line.
pub fn list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    for item in items {
        out.push_line_if_not_empty();
        out.push_str(item.as_ref());
    }
    out
}

pub fn list_pairs<I, K, V>(pairs: I, separator: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    list_map(pairs, false, separator)
}

pub fn list_map<I, K, V>(pairs: I, exclude_keys: bool, separator: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_line_if_not_empty();
        write_pair(&mut out, &key, &value, exclude_keys, separator);
    }
    out
}

fn write_pair<K: Display, V: Display>(
    out: &mut String,
    key: &K,
    value: &V,
    exclude_keys: bool,
    separator: &str,
) {
    if !exclude_keys {
        out.push_str(&format!("{key}{separator}"));
    }
    out.push_str(&value.to_string());
}
