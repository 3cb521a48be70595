//! Grammar rules that may refer to themselves.
//!
//! A rule like "a list is `[` followed by values, where a value may be a list" cannot be built
//! eagerly: constructing `list()` would construct `value()`, which would construct `list()` again.
//! Wrapping the inner reference in `Rule::Deferred` breaks the cycle, as the rule is only built
//! when it is applied:
//!
//! ```
//! use textcombinators::combinators::{or_else, pipe};
//! use textcombinators::primitives::{literal, take};
//! use textcombinators::rule::deferred;
//! use textcombinators::{BoxedParser, Parser};
//!
//! // nested := "(" nested ")" | one character
//! fn nested() -> BoxedParser<String> {
//!     let parens = pipe((literal("("), deferred(nested), literal(")")))
//!         .map(|(_, inner, _)| inner);
//!     or_else((parens, take(1))).boxed()
//! }
//!
//! assert_eq!(Ok(("x".to_string(), "")), nested().parse("((x))"));
//! ```
//!
//! Recursive rules return a `BoxedParser`, because their type would otherwise contain itself.

use crate::parser::{Outcome, Parser};

type Build<P> = Box<dyn Fn() -> P + Send + Sync>;

/// Rule is either a parser or a function building one on demand.
pub enum Rule<P> {
    Immediate(P),
    /// The function is called every time the rule is applied. Its result is never cached.
    Deferred(Build<P>),
}

impl<P> Rule<P> {
    pub fn immediate(p: P) -> Rule<P> {
        Rule::Immediate(p)
    }
}

impl<P: Parser> Parser for Rule<P> {
    type Result = P::Result;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        match self {
            Rule::Immediate(p) => p.parse(input),
            Rule::Deferred(build) => build().parse(input),
        }
    }
}

/// A rule built by `build` each time it is applied. `build` may be a plain function or a closure
/// capturing the rule's parameters.
pub fn deferred<P, F>(build: F) -> Rule<P>
where
    P: Parser,
    F: Fn() -> P + Send + Sync + 'static,
{
    Rule::Deferred(Box::new(build))
}
