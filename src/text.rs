//! Helpers for working with the remaining input text.

use std::io;
use std::iter;

/// Number of characters of input shown in error messages.
pub const PREVIEW_LIMIT: usize = 100;

/// Utf8Chars yields the characters of a UTF-8 encoded source, skipping invalid sequences.
pub struct Utf8Chars<R: io::Read>(utf8reader::UTF8Reader<R>);

impl<R: io::Read> Utf8Chars<R> {
    pub fn new(r: R) -> Utf8Chars<R> {
        Utf8Chars(utf8reader::UTF8Reader::new(r))
    }
}

impl<R: io::Read> Iterator for Utf8Chars<R> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.0.next() {
                None => return None,
                Some(Err(_)) => continue,
                Some(Ok(c)) => return Some(c),
            }
        }
    }
}

/// Read a UTF-8 encoded source completely into a string.
pub fn read_text<R: io::Read>(r: R) -> String {
    Utf8Chars::new(r).collect()
}

/// Split `s` after `n` characters. Returns None if `s` is shorter than that.
pub fn split_chars(s: &str, n: usize) -> Option<(&str, &str)> {
    s.char_indices()
        .map(|(ix, _)| ix)
        .chain(iter::once(s.len()))
        .nth(n)
        .map(|ix| s.split_at(ix))
}

/// The first `PREVIEW_LIMIT` characters of `s`.
pub fn preview(s: &str) -> &str {
    match split_chars(s, PREVIEW_LIMIT) {
        Some((head, _)) => head,
        None => s,
    }
}

/// Whitespace is ASCII only: space, tab, newline and carriage return.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
