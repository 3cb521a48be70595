use crate::parser::{ErrorKind, Outcome, ParseError, Parser};
use crate::text;

/// StringParser matches a literal string at the start of the input.
#[derive(Clone, Debug)]
pub struct StringParser(String);

impl StringParser {
    pub fn new<S: AsRef<str>>(s: S) -> StringParser {
        StringParser(s.as_ref().to_owned())
    }
}

impl Parser for StringParser {
    type Result = String;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        match input.strip_prefix(self.0.as_str()) {
            Some(rest) => Ok((self.0.clone(), rest)),
            None => {
                let have = text::split_chars(input, self.0.chars().count())
                    .map(|(head, _)| head)
                    .unwrap_or(input);
                Err(ParseError::new(
                    ErrorKind::LiteralMismatch,
                    format!(
                        "expected {:?}, found {:?} in {:?}",
                        self.0,
                        have,
                        text::preview(input)
                    ),
                ))
            }
        }
    }
}

pub fn literal<S: AsRef<str>>(s: S) -> StringParser {
    StringParser::new(s)
}

/// NotLiteral consumes a single character, unless the input starts with the given string.
#[derive(Clone, Debug)]
pub struct NotLiteral(String);

impl Parser for NotLiteral {
    type Result = char;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        if input.starts_with(self.0.as_str()) {
            return Err(ParseError::new(
                ErrorKind::LiteralMismatch,
                format!("expected anything but {:?}", self.0),
            ));
        }
        AnyChar.parse(input)
    }
}

pub fn not_literal<S: AsRef<str>>(s: S) -> NotLiteral {
    NotLiteral(s.as_ref().to_owned())
}

#[derive(Clone, Copy, Debug)]
pub struct AnyChar;

impl Parser for AnyChar {
    type Result = char;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let mut cs = input.chars();
        match cs.next() {
            Some(c) => Ok((c, cs.as_str())),
            None => Err(ParseError::new(ErrorKind::EndOfInput, "expected any character")),
        }
    }
}

pub fn any_char() -> AnyChar {
    AnyChar
}

/// Take consumes exactly `n` characters.
#[derive(Clone, Copy, Debug)]
pub struct Take(usize);

impl Parser for Take {
    type Result = String;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        match text::split_chars(input, self.0) {
            Some((taken, rest)) => Ok((taken.to_owned(), rest)),
            None => Err(ParseError::new(
                ErrorKind::EndOfInput,
                format!(
                    "expected {} characters, only {} left",
                    self.0,
                    input.chars().count()
                ),
            )),
        }
    }
}

pub fn take(n: usize) -> Take {
    Take(n)
}

#[derive(Clone, Copy, Debug)]
pub struct WhitespaceChar;

impl Parser for WhitespaceChar {
    type Result = char;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let mut cs = input.chars();
        match cs.next() {
            Some(c) if text::is_space(c) => Ok((c, cs.as_str())),
            Some(c) => Err(ParseError::new(
                ErrorKind::NotWhitespace,
                format!("expected whitespace, found {:?}", c),
            )),
            None => Err(ParseError::new(
                ErrorKind::NotWhitespace,
                "expected whitespace, found end of input",
            )),
        }
    }
}

pub fn whitespace_char() -> WhitespaceChar {
    WhitespaceChar
}

/// Whitespace skips any amount of whitespace, including none at all.
#[derive(Clone, Copy, Debug)]
pub struct Whitespace;

impl Parser for Whitespace {
    type Result = ();
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        Ok(((), input.trim_start_matches(text::is_space)))
    }
}

pub fn whitespace() -> Whitespace {
    Whitespace
}

/// SearchFor skips ahead to the first occurrence of a string, and returns the text before it.
/// Parsing continues after the occurrence.
#[derive(Clone, Debug)]
pub struct SearchFor(String);

impl Parser for SearchFor {
    type Result = String;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        match input.find(self.0.as_str()) {
            Some(ix) => Ok((input[..ix].to_owned(), &input[ix + self.0.len()..])),
            None => Err(ParseError::new(
                ErrorKind::SubstringNotFound,
                format!("{:?} not found in {:?}", self.0, text::preview(input)),
            )),
        }
    }
}

pub fn search_for<S: AsRef<str>>(s: S) -> SearchFor {
    SearchFor(s.as_ref().to_owned())
}

/// BreakToEnd returns all of the remaining input.
#[derive(Clone, Copy, Debug)]
pub struct BreakToEnd;

impl Parser for BreakToEnd {
    type Result = String;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        Ok((input.to_owned(), &input[input.len()..]))
    }
}

pub fn break_to_end() -> BreakToEnd {
    BreakToEnd
}

#[derive(Clone, Copy, Debug)]
pub struct EndOfInput;

impl Parser for EndOfInput {
    type Result = ();
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        if input.is_empty() {
            return Ok(((), input));
        }
        Err(ParseError::new(
            ErrorKind::UnexpectedTrailingInput,
            format!(
                "{} characters left: {:?}",
                input.chars().count(),
                text::preview(input)
            ),
        ))
    }
}

pub fn end_of_input() -> EndOfInput {
    EndOfInput
}

/// A number as matched by `NumberLiteral`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<Number> for f64 {
    fn from(n: Number) -> f64 {
        n.as_f64()
    }
}

/// NumberLiteral matches a run of digits and dots starting with a digit. The result is a float if
/// the run contains a dot, otherwise an integer.
///
/// The run is not validated beyond that: `1.` is a float, and `1.2.3` is consumed completely,
/// yielding 1.2.
#[derive(Clone, Copy, Debug)]
pub struct NumberLiteral;

impl Parser for NumberLiteral {
    type Result = Number;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        match input.chars().next() {
            None => return Err(ParseError::new(ErrorKind::EndOfInput, "expected a number")),
            Some(c) if c.is_ascii_digit() => (),
            Some(c) => {
                return Err(ParseError::new(
                    ErrorKind::NotNumber,
                    format!("expected a digit, found {:?}", c),
                ))
            }
        }
        let end = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(input.len());
        let (span, rest) = input.split_at(end);

        let number = if span.contains('.') {
            // Only the part before a second dot is meaningful.
            let valid = span
                .match_indices('.')
                .nth(1)
                .map(|(ix, _)| &span[..ix])
                .unwrap_or(span);
            valid.parse().map(Number::Float)
        } else {
            match span.parse() {
                Ok(i) => Ok(Number::Int(i)),
                Err(_) => span.parse().map(Number::Float),
            }
        };
        match number {
            Ok(n) => Ok((n, rest)),
            Err(e) => Err(ParseError::new(ErrorKind::NotNumber, format!("{:?}: {}", span, e))),
        }
    }
}

pub fn number_literal() -> NumberLiteral {
    NumberLiteral
}

/// Always succeeds with a value, without consuming input.
#[derive(Clone, Debug)]
pub struct Always<T: Clone>(T);

impl<T: Clone> Parser for Always<T> {
    type Result = T;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        Ok((self.0.clone(), input))
    }
}

pub fn always<T: Clone>(value: T) -> Always<T> {
    Always(value)
}

/// Never fails with a message, without consuming input. It can be used for any result type.
#[derive(Clone, Debug)]
pub struct Never<T> {
    message: String,
    _result: std::marker::PhantomData<fn() -> T>,
}

impl<T> Parser for Never<T> {
    type Result = T;
    fn parse<'a>(&self, _input: &'a str) -> Outcome<'a, Self::Result> {
        Err(ParseError::new(ErrorKind::GenericFailure, self.message.clone()))
    }
}

pub fn never<T, S: AsRef<str>>(message: S) -> Never<T> {
    Never {
        message: message.as_ref().to_owned(),
        _result: std::marker::PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_string() {
        let p = StringParser::new("abc ");
        assert_eq!(Ok(("abc ".to_owned(), "def")), p.parse("abc def"));
        let e = p.parse("abd def").unwrap_err();
        assert_eq!(ErrorKind::LiteralMismatch, e.kind);
        assert!(e.message.contains("\"abd \""), "{}", e.message);
        assert_eq!(Ok(("".to_owned(), "xyz")), literal("").parse("xyz"));
    }

    #[test]
    fn test_not_literal() {
        let p = not_literal("\"");
        assert_eq!(Ok(('a', "\"")), p.parse("a\""));
        assert_eq!(ErrorKind::LiteralMismatch, p.parse("\"a").unwrap_err().kind);
        assert_eq!(ErrorKind::EndOfInput, p.parse("").unwrap_err().kind);
        assert_eq!(Ok(('ü', "x")), not_literal("x").parse("üx"));
    }

    #[test]
    fn test_any_char() {
        assert_eq!(Ok(('a', "bcd")), any_char().parse("abcd"));
        assert_eq!(Ok(('ð', "s")), any_char().parse("ðs"));
        assert_eq!(ErrorKind::EndOfInput, any_char().parse("").unwrap_err().kind);
    }

    #[rstest]
    #[case("", 0, Some(("", "")))]
    #[case("abc", 0, Some(("", "abc")))]
    #[case("abc", 2, Some(("ab", "c")))]
    #[case("abc", 3, Some(("abc", "")))]
    #[case("abc", 4, None)]
    #[case("üðs", 2, Some(("üð", "s")))]
    fn test_take(#[case] input: &str, #[case] n: usize, #[case] want: Option<(&str, &str)>) {
        match (take(n).parse(input), want) {
            (Ok((taken, rest)), Some((want_taken, want_rest))) => {
                assert_eq!(want_taken, taken);
                assert_eq!(want_rest, rest);
            }
            (Err(e), None) => assert_eq!(ErrorKind::EndOfInput, e.kind),
            (got, want) => panic!("take({}) on {:?}: got {:?}, want {:?}", n, input, got, want),
        }
    }

    #[test]
    fn test_whitespace_char() {
        assert_eq!(Ok((' ', "abcd")), whitespace_char().parse(" abcd"));
        assert_eq!(ErrorKind::NotWhitespace, whitespace_char().parse("").unwrap_err().kind);
        assert_eq!(ErrorKind::NotWhitespace, whitespace_char().parse("a").unwrap_err().kind);
    }

    #[rstest]
    #[case(" \n\t\r  abcd", "abcd")]
    #[case("d", "d")]
    #[case("", "")]
    #[case("   ", "")]
    #[case("\u{a0}x", "\u{a0}x")]
    fn test_whitespace(#[case] input: &str, #[case] rest: &str) {
        let (_, got) = whitespace().parse(input).unwrap();
        assert_eq!(rest, got);
        assert!(!got.starts_with(text::is_space));
    }

    #[test]
    fn test_search_for() {
        assert_eq!(
            Ok(("123".to_owned(), "321")),
            search_for("abc").parse("123abc321")
        );
        let e = search_for("abcd").parse("123abc321").unwrap_err();
        assert_eq!(ErrorKind::SubstringNotFound, e.kind);
        assert!(e.message.contains("abcd") && e.message.contains("123abc321"));
    }

    #[test]
    fn test_break_and_end() {
        assert_eq!(Ok(("hello".to_owned(), "")), break_to_end().parse("hello"));
        assert_eq!(Ok(("".to_owned(), "")), break_to_end().parse(""));
        assert_eq!(Ok(((), "")), end_of_input().parse(""));
        let e = end_of_input().parse("rest").unwrap_err();
        assert_eq!(ErrorKind::UnexpectedTrailingInput, e.kind);
        assert!(e.message.contains("rest"));
    }

    #[rstest]
    #[case("0.88787", Number::Float(0.88787), "")]
    #[case("123457890", Number::Int(123457890), "")]
    #[case("12 34", Number::Int(12), " 34")]
    #[case("1.", Number::Float(1.0), "")]
    #[case("1.2.3x", Number::Float(1.2), "x")]
    #[case("99999999999999999999", Number::Float(1e20), "")]
    fn test_number(#[case] input: &str, #[case] want: Number, #[case] rest: &str) {
        assert_eq!(Ok((want, rest)), number_literal().parse(input));
    }

    #[test]
    fn test_number_fail() {
        assert_eq!(ErrorKind::EndOfInput, number_literal().parse("").unwrap_err().kind);
        assert_eq!(ErrorKind::NotNumber, number_literal().parse("-1").unwrap_err().kind);
        assert_eq!(ErrorKind::NotNumber, number_literal().parse(".5").unwrap_err().kind);
        assert_eq!(2.5, f64::from(Number::Float(2.5)));
        assert_eq!(3.0, Number::Int(3).as_f64());
    }

    #[test]
    fn test_always_never() {
        assert_eq!(Ok(("pure", "")), always("pure").parse(""));
        assert_eq!(Ok((1, "abc")), always(1).parse("abc"));
        let e = never::<(), _>("error message").parse("abc").unwrap_err();
        assert_eq!(ErrorKind::GenericFailure, e.kind);
        assert_eq!("error message", e.message);
    }
}
