use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

use crate::combinators;

/// The reason a parser failed. The set is closed; user code reports its own failures as
/// `GenericFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is over.
    EndOfInput,
    /// Input didn't start with (or did start with, for `not_literal`) the expected text.
    LiteralMismatch,
    SubstringNotFound,
    NotWhitespace,
    NotNumber,
    GenericFailure,
    /// `end_of_input` found text left over.
    UnexpectedTrailingInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::EndOfInput => "end of input",
            ErrorKind::LiteralMismatch => "literal mismatch",
            ErrorKind::SubstringNotFound => "substring not found",
            ErrorKind::NotWhitespace => "not whitespace",
            ErrorKind::NotNumber => "not a number",
            ErrorKind::GenericFailure => "failure",
            ErrorKind::UnexpectedTrailingInput => "unexpected trailing input",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ParseError {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// This function returns a `GenericFailure` error, for use in hand-written parsers.
pub fn failure<S: Into<String>>(message: S) -> ParseError {
    ParseError::new(ErrorKind::GenericFailure, message)
}

/// The outcome of applying a parser to `&'a str`: the value and the remaining text, which is
/// always a suffix of the input.
pub type Outcome<'a, R> = Result<(R, &'a str), ParseError>;

pub type ParseResult<R> = Result<R, ParseError>;

pub trait Parser {
    type Result;

    /// parse applies the parser to `input`. It never modifies the parser, so the same parser can
    /// be applied any number of times, with the same results for the same input.
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result>;

    /// map transforms the result of this parser using a Transform combinator.
    fn map<R2, F: Fn(Self::Result) -> R2>(self, f: F) -> combinators::Transform<Self, F>
    where
        Self: Sized,
    {
        combinators::Transform::new(self, f)
    }

    /// bind continues with the parser returned by `f` for this parser's result.
    fn bind<Q: Parser, F: Fn(Self::Result) -> Q>(self, f: F) -> combinators::Bind<Self, F>
    where
        Self: Sized,
    {
        combinators::Bind::new(self, f)
    }

    /// then applies `next` after this parser and keeps only the result of `next`.
    fn then<B: Parser>(self, next: B) -> combinators::Then<Self, B>
    where
        Self: Sized,
    {
        combinators::Then::new(self, next)
    }

    fn peek(self) -> combinators::Peek<Self>
    where
        Self: Sized,
    {
        combinators::Peek::new(self)
    }

    fn optional(self) -> combinators::Maybe<Self>
    where
        Self: Sized,
    {
        combinators::Maybe::new(self)
    }

    fn many(self) -> combinators::Repeat<Self>
    where
        Self: Sized,
    {
        combinators::Repeat::new(self, combinators::RepeatSpec::Any)
    }

    fn sep_by<S: Parser>(self, sep: S) -> combinators::SepBy<Self, S>
    where
        Self: Sized,
    {
        combinators::SepBy::new(self, sep)
    }

    /// trace logs the input and the outcome of this parser at trace level.
    fn trace<S: AsRef<str>>(self, label: S) -> combinators::Trace<Self>
    where
        Self: Sized,
    {
        combinators::Trace::new(self, label)
    }

    /// boxed erases the type of this parser. Recursive rules return boxed parsers, as their type
    /// would otherwise contain itself. Boxed parsers can be shared between threads.
    fn boxed(self) -> BoxedParser<Self::Result>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Box::new(self)
    }
}

pub type BoxedParser<R> = Box<dyn Parser<Result = R> + Send + Sync>;

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Arc<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        (**self).parse(input)
    }
}

/// FnParser adapts a plain function or closure into a parser.
pub struct FnParser<F, R> {
    f: F,
    _result: PhantomData<fn() -> R>,
}

/// Create a parser from a closure taking the remaining input:
///
/// ```
/// use textcombinators::{from_fn, failure, Parser};
///
/// let vowel = from_fn(|input: &str| match input.chars().next() {
///     Some(c) if "aeiou".contains(c) => Ok((c, &input[1..])),
///     _ => Err(failure("not a vowel")),
/// });
/// assert_eq!(Ok(('a', "bc")), vowel.parse("abc"));
/// ```
pub fn from_fn<R, F>(f: F) -> FnParser<F, R>
where
    F: for<'a> Fn(&'a str) -> Outcome<'a, R>,
{
    FnParser {
        f,
        _result: PhantomData,
    }
}

impl<R, F> Parser for FnParser<F, R>
where
    F: for<'a> Fn(&'a str) -> Outcome<'a, R>,
{
    type Result = R;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        (self.f)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{any_char, literal};

    #[test]
    fn test_error_display() {
        let e = ParseError::new(ErrorKind::NotNumber, "expected a digit, found 'x'");
        assert_eq!("not a number: expected a digit, found 'x'", e.to_string());
        assert_eq!(ErrorKind::NotNumber, e.kind());
        assert_eq!(ErrorKind::GenericFailure, failure("x").kind);
    }

    #[test]
    fn test_pointer_impls() {
        let p = literal("ab");
        let shared = Rc::new(literal("ab"));
        let boxed: BoxedParser<String> = literal("ab").boxed();
        assert_eq!(Ok(("ab".to_string(), "c")), (&p).parse("abc"));
        assert_eq!(Ok(("ab".to_string(), "c")), shared.parse("abc"));
        assert_eq!(Ok(("ab".to_string(), "c")), boxed.parse("abc"));
        assert_eq!(Ok(("ab".to_string(), "c")), Arc::new(p).parse("abc"));
    }

    #[test]
    fn test_from_fn() {
        let gh = from_fn(|input: &str| {
            let (c, rest) = any_char().parse(input)?;
            if "gh".contains(c) {
                Ok((c, rest))
            } else {
                Err(failure(format!("{:?} is neither g nor h", c)))
            }
        });
        let (cs, rest) = gh.many().parse("hhhhgggghghghghgh123").unwrap();
        assert_eq!("hhhhgggghghghghgh", cs.into_iter().collect::<String>());
        assert_eq!("123", rest);
    }
}
