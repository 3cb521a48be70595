use std::collections::HashMap;

use crate::parser::{BoxedParser, Outcome, Parser};

/// The result of a `NamedPipe`: values by field name.
pub type Record<V> = HashMap<String, V>;

enum Field<V> {
    Keep(String, BoxedParser<V>),
    Skip(BoxedParser<()>),
}

/// NamedPipe applies parsers from left to right like `Pipe`, but collects the results into a
/// record instead of a tuple. Steps are added with `field()`; steps whose result is not needed
/// (punctuation, whitespace) are added with `skip()` or with an empty field name.
///
/// ```
/// use textcombinators::primitives::{literal, take, whitespace};
/// use textcombinators::record::named_pipe;
/// use textcombinators::Parser;
///
/// let pair = named_pipe()
///     .field("key", take(1))
///     .skip(whitespace())
///     .field("", literal("="))
///     .skip(whitespace())
///     .field("value", take(2));
/// let (record, rest) = pair.parse("a = bc;").unwrap();
/// assert_eq!(2, record.len());
/// assert_eq!("bc", record["value"]);
/// assert_eq!(";", rest);
/// ```
pub struct NamedPipe<V> {
    fields: Vec<Field<V>>,
}

impl<V> NamedPipe<V> {
    pub fn new() -> NamedPipe<V> {
        NamedPipe { fields: vec![] }
    }

    /// Add a step storing its result under `key`. If `key` is empty, the result is discarded. A
    /// later field with the same key overwrites an earlier one.
    pub fn field<S, P>(mut self, key: S, p: P) -> Self
    where
        S: AsRef<str>,
        P: Parser<Result = V> + Send + Sync + 'static,
    {
        let key = key.as_ref();
        if key.is_empty() {
            self.fields.push(Field::Skip(p.map(|_| ()).boxed()));
        } else {
            self.fields.push(Field::Keep(key.to_owned(), p.boxed()));
        }
        self
    }

    /// Add a step whose result is discarded. Its result type may differ from the record's.
    pub fn skip<P: Parser + Send + Sync + 'static>(mut self, p: P) -> Self {
        self.fields.push(Field::Skip(p.map(|_| ()).boxed()));
        self
    }
}

impl<V> Default for NamedPipe<V> {
    fn default() -> Self {
        NamedPipe::new()
    }
}

impl<V> Parser for NamedPipe<V> {
    type Result = Record<V>;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let mut record = Record::new();
        let mut rest = input;
        for field in self.fields.iter() {
            rest = match field {
                Field::Keep(key, p) => {
                    let (v, next) = p.parse(rest)?;
                    record.insert(key.clone(), v);
                    next
                }
                Field::Skip(p) => p.parse(rest)?.1,
            };
        }
        Ok((record, rest))
    }
}

pub fn named_pipe<V>() -> NamedPipe<V> {
    NamedPipe::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorKind;
    use crate::primitives::{any_char, literal, number_literal, search_for, whitespace, Number};
    use std::thread;

    #[test]
    fn test_keys() {
        let p = named_pipe()
            .field("a", number_literal())
            .field("", literal(",").map(|_| Number::Int(0)))
            .field("b", number_literal());
        let (r, rest) = p.parse("1.5,2;").unwrap();
        assert_eq!(vec!["a", "b"], sorted_keys(&r));
        assert_eq!(Number::Float(1.5), r["a"]);
        assert_eq!(Number::Int(2), r["b"]);
        assert_eq!(";", rest);
    }

    #[test]
    fn test_duplicate_key() {
        let p = named_pipe().field("c", any_char()).field("c", any_char());
        let (r, _) = p.parse("xy").unwrap();
        assert_eq!(1, r.len());
        assert_eq!('y', r["c"]);
    }

    #[test]
    fn test_fail() {
        let p = named_pipe()
            .field("head", search_for(":"))
            .skip(whitespace())
            .skip(literal("!"));
        let e = p.parse("key: value").unwrap_err();
        assert_eq!(ErrorKind::LiteralMismatch, e.kind);
        let e = p.parse("key value").unwrap_err();
        assert_eq!(ErrorKind::SubstringNotFound, e.kind);
    }

    #[test]
    fn test_shared_between_threads() {
        let p = named_pipe()
            .field("key", search_for("="))
            .field("value", search_for(";"));
        thread::scope(|s| {
            let first = s.spawn(|| p.parse("a=1;"));
            let second = s.spawn(|| p.parse("b=2;c"));
            let (r, rest) = first.join().unwrap().unwrap();
            assert_eq!(("a", "1", ""), (r["key"].as_str(), r["value"].as_str(), rest));
            let (r, rest) = second.join().unwrap().unwrap();
            assert_eq!(("b", "2", "c"), (r["key"].as_str(), r["value"].as_str(), rest));
        });
    }

    #[test]
    fn test_empty() {
        let p: NamedPipe<char> = NamedPipe::default();
        assert_eq!(Ok((Record::new(), "abc")), p.parse("abc"));
    }

    fn sorted_keys<V>(r: &Record<V>) -> Vec<&str> {
        let mut keys: Vec<&str> = r.keys().map(|k| k.as_str()).collect();
        keys.sort();
        keys
    }
}
