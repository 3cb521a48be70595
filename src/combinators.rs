use crate::parser::{ErrorKind, Outcome, ParseError, Parser};
use crate::text;

/// Transform applies a function to the result of a parser.
pub struct Transform<P, F> {
    f: F,
    p: P,
}

impl<P, F> Transform<P, F> {
    /// Create a new Transform parser using f.
    pub fn new(p: P, f: F) -> Transform<P, F> {
        Transform { f, p }
    }
}

impl<R2, P: Parser, F: Fn(P::Result) -> R2> Parser for Transform<P, F> {
    type Result = R2;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (r, rest) = self.p.parse(input)?;
        Ok(((self.f)(r), rest))
    }
}

pub fn map<R2, P: Parser, F: Fn(P::Result) -> R2>(p: P, f: F) -> Transform<P, F> {
    Transform::new(p, f)
}

/// Bind chooses the parser for the rest of the input based on the result of the first parser.
pub struct Bind<P, F> {
    p: P,
    f: F,
}

impl<P, F> Bind<P, F> {
    pub fn new(p: P, f: F) -> Bind<P, F> {
        Bind { p, f }
    }
}

impl<P: Parser, Q: Parser, F: Fn(P::Result) -> Q> Parser for Bind<P, F> {
    type Result = Q::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (r, rest) = self.p.parse(input)?;
        (self.f)(r).parse(rest)
    }
}

pub fn bind<P: Parser, Q: Parser, F: Fn(P::Result) -> Q>(p: P, f: F) -> Bind<P, F> {
    Bind::new(p, f)
}

/// Peek runs a parser but doesn't consume any input.
pub struct Peek<P>(P);

impl<P> Peek<P> {
    pub fn new(p: P) -> Peek<P> {
        Peek(p)
    }
}

impl<P: Parser> Parser for Peek<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (r, _) = self.0.parse(input)?;
        Ok((r, input))
    }
}

pub fn peek<P: Parser>(p: P) -> Peek<P> {
    Peek::new(p)
}

/// Alternative tries a tuple of parsers in order, each on the same input, and returns the first
/// success. If none succeeds, the error of the last alternative is returned.
pub struct Alternative<T>(T);

impl<T> Alternative<T> {
    pub fn new(tuple: T) -> Alternative<T> {
        Alternative(tuple)
    }
}

/// Macro for implementing alternative parsers for arbitrary tuples. Not for public use.
macro_rules! alt_impl {
    ( ( $($ptype:ident/$ix:tt),+ ) ) => {
        impl<R, $($ptype : Parser<Result=R>, )*> Parser for Alternative<($($ptype,)*)> {
            type Result = R;
            #[allow(unused_assignments, unused_mut)]
            fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
                let mut last;
                $(
                    match (self.0).$ix.parse(input) {
                        Ok(o) => return Ok(o),
                        Err(e) => last = e,
                    }
                )*
                Err(last)
            }
        }
    }
}

alt_impl!((P0 / 0));
alt_impl!((P0 / 0, P1 / 1));
alt_impl!((P0 / 0, P1 / 1, P2 / 2));
alt_impl!((P0 / 0, P1 / 1, P2 / 2, P3 / 3));
alt_impl!((P0 / 0, P1 / 1, P2 / 2, P3 / 3, P4 / 4));
alt_impl!((P0 / 0, P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5));
alt_impl!((P0 / 0, P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5, P6 / 6));
alt_impl!((
    P0 / 0,
    P1 / 1,
    P2 / 2,
    P3 / 3,
    P4 / 4,
    P5 / 5,
    P6 / 6,
    P7 / 7
));
alt_impl!((
    P0 / 0,
    P1 / 1,
    P2 / 2,
    P3 / 3,
    P4 / 4,
    P5 / 5,
    P6 / 6,
    P7 / 7,
    P8 / 8
));
alt_impl!((
    P0 / 0,
    P1 / 1,
    P2 / 2,
    P3 / 3,
    P4 / 4,
    P5 / 5,
    P6 / 6,
    P7 / 7,
    P8 / 8,
    P9 / 9
));

/// Ordered choice over a tuple of 1 to 10 parsers with the same result type.
pub fn or_else<T>(tuple: T) -> Alternative<T> {
    Alternative::new(tuple)
}

/// Nearest applies all parsers to the same input and picks the successful one that consumed the
/// least input. With search parsers, this finds whichever of several strings occurs first.
pub struct Nearest<P>(Vec<P>);

impl<P> Nearest<P> {
    pub fn new(alternatives: Vec<P>) -> Nearest<P> {
        Nearest(alternatives)
    }
}

impl<P: Parser> Parser for Nearest<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let mut best: Option<(P::Result, &'a str)> = None;
        for p in self.0.iter() {
            if let Ok((r, rest)) = p.parse(input) {
                match best {
                    Some((_, best_rest)) if best_rest.len() >= rest.len() => (),
                    _ => best = Some((r, rest)),
                }
            }
        }
        best.ok_or_else(|| {
            ParseError::new(
                ErrorKind::GenericFailure,
                format!(
                    "none of {} alternatives matched {:?}",
                    self.0.len(),
                    text::preview(input)
                ),
            )
        })
    }
}

pub fn minimal_consumption<P: Parser>(alternatives: Vec<P>) -> Nearest<P> {
    Nearest::new(alternatives)
}

/// Sequence concatenates parsers and only succeeds if all of them do. T is always a tuple in order
/// for Sequence to implement the Parser trait. The result is a tuple of all the parser results.
///
/// The parsers are applied from right to left: the last parser in the tuple sees the input first,
/// and the first parser sees what all others have left. The results are still in tuple order.
pub struct Sequence<T>(T);

impl<T> Sequence<T> {
    pub fn new(tuple: T) -> Sequence<T> {
        Sequence(tuple)
    }
}

/// Pipe is like `Sequence`, but applies its parsers from left to right.
pub struct Pipe<T>(T);

impl<T> Pipe<T> {
    pub fn new(tuple: T) -> Pipe<T> {
        Pipe(tuple)
    }
}

/// Macro for implementing sequence parsers for arbitrary tuples. Not for public use.
///
/// The first list gives parser types, tuple indices and result variables in tuple order, the
/// second one gives indices and variables in application order.
macro_rules! seq_impl {
    ( $name:ident, ( $($ptype:ident/$ix:tt/$var:ident),+ ), ( $($aix:tt/$avar:ident),+ ) ) => {
        impl<$($ptype : Parser, )*> Parser for $name<($($ptype,)*)> {
            type Result = ($($ptype::Result,)*);
            fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
                $(
                    let ($avar, input) = (self.0).$aix.parse(input)?;
                )*
                Ok((($($var,)*), input))
            }
        }
    }
}

seq_impl!(Sequence, (P0/0/a, P1/1/b), (1/b, 0/a));
seq_impl!(Sequence, (P0/0/a, P1/1/b, P2/2/c), (2/c, 1/b, 0/a));
seq_impl!(Sequence, (P0/0/a, P1/1/b, P2/2/c, P3/3/d), (3/d, 2/c, 1/b, 0/a));
seq_impl!(
    Sequence,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e),
    (4/e, 3/d, 2/c, 1/b, 0/a)
);
seq_impl!(
    Sequence,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f),
    (5/f, 4/e, 3/d, 2/c, 1/b, 0/a)
);
seq_impl!(
    Sequence,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g),
    (6/g, 5/f, 4/e, 3/d, 2/c, 1/b, 0/a)
);
seq_impl!(
    Sequence,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g, P7/7/h),
    (7/h, 6/g, 5/f, 4/e, 3/d, 2/c, 1/b, 0/a)
);
seq_impl!(
    Sequence,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g, P7/7/h, P8/8/i),
    (8/i, 7/h, 6/g, 5/f, 4/e, 3/d, 2/c, 1/b, 0/a)
);
seq_impl!(
    Sequence,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g, P7/7/h, P8/8/i, P9/9/j),
    (9/j, 8/i, 7/h, 6/g, 5/f, 4/e, 3/d, 2/c, 1/b, 0/a)
);

seq_impl!(Pipe, (P0/0/a, P1/1/b), (0/a, 1/b));
seq_impl!(Pipe, (P0/0/a, P1/1/b, P2/2/c), (0/a, 1/b, 2/c));
seq_impl!(Pipe, (P0/0/a, P1/1/b, P2/2/c, P3/3/d), (0/a, 1/b, 2/c, 3/d));
seq_impl!(
    Pipe,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e),
    (0/a, 1/b, 2/c, 3/d, 4/e)
);
seq_impl!(
    Pipe,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f),
    (0/a, 1/b, 2/c, 3/d, 4/e, 5/f)
);
seq_impl!(
    Pipe,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g),
    (0/a, 1/b, 2/c, 3/d, 4/e, 5/f, 6/g)
);
seq_impl!(
    Pipe,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g, P7/7/h),
    (0/a, 1/b, 2/c, 3/d, 4/e, 5/f, 6/g, 7/h)
);
seq_impl!(
    Pipe,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g, P7/7/h, P8/8/i),
    (0/a, 1/b, 2/c, 3/d, 4/e, 5/f, 6/g, 7/h, 8/i)
);
seq_impl!(
    Pipe,
    (P0/0/a, P1/1/b, P2/2/c, P3/3/d, P4/4/e, P5/5/f, P6/6/g, P7/7/h, P8/8/i, P9/9/j),
    (0/a, 1/b, 2/c, 3/d, 4/e, 5/f, 6/g, 7/h, 8/i, 9/j)
);

/// Right-to-left sequence over a tuple of 2 to 10 parsers.
pub fn seq<T>(tuple: T) -> Sequence<T> {
    Sequence::new(tuple)
}

/// Left-to-right sequence over a tuple of 2 to 10 parsers.
pub fn pipe<T>(tuple: T) -> Pipe<T> {
    Pipe::new(tuple)
}

pub enum RepeatSpec {
    /// Any is equivalent to Min(0).
    Any,
    Min(usize),
    Max(usize),
    /// Between(min, max) requires `min <= max`.
    Between(usize, usize),
}

/// Repeat applies a parser as often as it succeeds, within the bounds of a `RepeatSpec`. It fails
/// only if the parser succeeds fewer times than the minimum.
pub struct Repeat<P: Parser> {
    inner: P,
    repeat: RepeatSpec,
}

impl<P: Parser> Repeat<P> {
    pub fn new(p: P, r: RepeatSpec) -> Repeat<P> {
        Repeat {
            inner: p,
            repeat: r,
        }
    }
}

impl<R, P: Parser<Result = R>> Parser for Repeat<P> {
    type Result = Vec<R>;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (min, max) = match self.repeat {
            RepeatSpec::Any => (0, usize::MAX),
            RepeatSpec::Min(min) => (min, usize::MAX),
            RepeatSpec::Max(max) => (0, max),
            RepeatSpec::Between(min, max) => (min, max),
        };
        debug_assert!(min <= max, "RepeatSpec::Between({}, {})", min, max);
        let mut v: Self::Result = Vec::new();
        let mut rest = input;
        while v.len() < max {
            match self.inner.parse(rest) {
                Ok((r, next)) => {
                    v.push(r);
                    rest = next;
                }
                Err(e) if v.len() < min => return Err(e),
                Err(_) => break,
            }
        }
        Ok((v, rest))
    }
}

/// Zero or more repetitions of `p`. Never fails.
pub fn many<P: Parser>(p: P) -> Repeat<P> {
    Repeat::new(p, RepeatSpec::Any)
}

/// RepeatUntil repeats a parser until a terminating parser would succeed. The terminator itself
/// is not consumed.
pub struct RepeatUntil<P, E> {
    inner: P,
    end: E,
}

impl<P, E> RepeatUntil<P, E> {
    pub fn new(p: P, end: E) -> RepeatUntil<P, E> {
        RepeatUntil { inner: p, end }
    }
}

impl<P: Parser, E: Parser> Parser for RepeatUntil<P, E> {
    type Result = Vec<P::Result>;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let mut v = Vec::new();
        let mut rest = input;
        while self.end.parse(rest).is_err() {
            match self.inner.parse(rest) {
                Ok((r, next)) => {
                    v.push(r);
                    rest = next;
                }
                Err(_) => break,
            }
        }
        Ok((v, rest))
    }
}

pub fn many_until<P: Parser, E: Parser>(p: P, end: E) -> RepeatUntil<P, E> {
    RepeatUntil::new(p, end)
}

/// SepBy parses zero or more occurrences of a parser, separated by another parser. A trailing
/// separator is left unconsumed.
pub struct SepBy<P, S> {
    inner: P,
    sep: S,
}

impl<P, S> SepBy<P, S> {
    pub fn new(p: P, sep: S) -> SepBy<P, S> {
        SepBy { inner: p, sep }
    }
}

impl<P: Parser, S: Parser> Parser for SepBy<P, S> {
    type Result = Vec<P::Result>;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (first, mut rest) = match self.inner.parse(input) {
            Ok(o) => o,
            Err(_) => return Ok((vec![], input)),
        };
        let mut v = vec![first];
        loop {
            let after_sep = match self.sep.parse(rest) {
                Ok((_, after_sep)) => after_sep,
                Err(_) => break,
            };
            match self.inner.parse(after_sep) {
                Ok((r, next)) => {
                    v.push(r);
                    rest = next;
                }
                Err(_) => break,
            }
        }
        Ok((v, rest))
    }
}

pub fn sep_by<P: Parser, S: Parser>(p: P, sep: S) -> SepBy<P, S> {
    SepBy::new(p, sep)
}

/// Maybe is a combinator returning Option<T> for a parser returning T, meaning it does not stop
/// parsing if an optional input was not encountered. It is very similar to a `Repeat` parser with
/// `RepeatSpec::Max(1)`.
pub struct Maybe<Inner: Parser> {
    inner: Inner,
}

impl<Inner: Parser> Maybe<Inner> {
    pub fn new(p: Inner) -> Maybe<Inner> {
        Maybe { inner: p }
    }
}

impl<R, P: Parser<Result = R>> Parser for Maybe<P> {
    type Result = Option<R>;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        match self.inner.parse(input) {
            Ok((r, rest)) => Ok((Some(r), rest)),
            Err(_) => Ok((None, input)),
        }
    }
}

pub fn optional<P: Parser>(p: P) -> Maybe<P> {
    Maybe::new(p)
}

/// Ignore ignores the result of an inner parser, effectively hiding the result. Useful if consumed
/// input should not be processed further, and simplifies types in combined parsers.
pub struct Ignore<Inner: Parser> {
    inner: Inner,
}

impl<Inner: Parser> Ignore<Inner> {
    pub fn new(p: Inner) -> Ignore<Inner> {
        Ignore { inner: p }
    }
}

impl<R, P: Parser<Result = R>> Parser for Ignore<P> {
    type Result = ();
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (_, rest) = self.inner.parse(input)?;
        Ok(((), rest))
    }
}

pub fn ignore<P: Parser>(p: P) -> Ignore<P> {
    Ignore::new(p)
}

/// Applies one parser, discards the result, and returns the second parser's results if the first
/// one succeeded. To skip the input consumed by several parsers, use a `Pipe` combinator as `A`.
pub struct Then<A: Parser, B: Parser> {
    a: A,
    b: B,
}

impl<A: Parser, B: Parser> Then<A, B> {
    pub fn new(first: A, second: B) -> Then<A, B> {
        Then {
            a: first,
            b: second,
        }
    }
}

impl<A: Parser, B: Parser> Parser for Then<A, B> {
    type Result = B::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (_, rest) = self.a.parse(input)?;
        self.b.parse(rest)
    }
}

/// Before restricts a parser to the input up to and including the match of a marker parser.
///
/// The marker is only used to find the end of the span; the result is exactly what the inner
/// parser returns on the span. In particular the remaining text is what the inner parser left of
/// the span, not the input after the marker:
///
/// ```
/// use textcombinators::combinators::before;
/// use textcombinators::primitives::{search_for, take};
/// use textcombinators::Parser;
///
/// let p = before(take(2), search_for(";"));
/// assert_eq!(Ok(("ab".to_string(), "c;")), p.parse("abc;def"));
/// ```
pub struct Before<P, M> {
    inner: P,
    marker: M,
}

impl<P, M> Before<P, M> {
    pub fn new(p: P, marker: M) -> Before<P, M> {
        Before { inner: p, marker }
    }
}

impl<P: Parser, M: Parser> Parser for Before<P, M> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let (_, after) = self.marker.parse(input)?;
        let span = &input[..input.len() - after.len()];
        self.inner.parse(span)
    }
}

pub fn before<P: Parser, M: Parser>(p: P, marker: M) -> Before<P, M> {
    Before::new(p, marker)
}

/// Trace logs the input a parser sees and its outcome, at trace level.
pub struct Trace<P> {
    inner: P,
    label: String,
}

impl<P> Trace<P> {
    pub fn new<S: AsRef<str>>(p: P, label: S) -> Trace<P> {
        Trace {
            inner: p,
            label: label.as_ref().to_owned(),
        }
    }
}

impl<P: Parser> Parser for Trace<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        log::trace!("{}: input {:?}", self.label, text::preview(input));
        let outcome = self.inner.parse(input);
        match &outcome {
            Ok((_, rest)) => log::trace!(
                "{}: consumed {} bytes, remaining {:?}",
                self.label,
                input.len() - rest.len(),
                text::preview(rest)
            ),
            Err(e) => log::trace!("{}: {}", self.label, e),
        }
        outcome
    }
}

pub fn trace<P: Parser, S: AsRef<str>>(p: P, label: S) -> Trace<P> {
    Trace::new(p, label)
}
