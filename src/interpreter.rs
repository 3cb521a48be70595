//! Do-notation: a grammar rule written as a linear list of steps instead of nested `bind`s.
//!
//! A `Procedure` is a resumable state object. Every time it is resumed, it either suspends by
//! yielding a parser, or completes with its output. `interpret` drives a procedure: it applies
//! each yielded parser to the remaining input and resumes the procedure with the parser's result.
//! The first failing parser aborts the procedure, and its error becomes the outcome.
//!
//! Most rules don't need a hand-written procedure; `Block` builds one from a list of closures:
//!
//! ```
//! use textcombinators::interpreter::Block;
//! use textcombinators::primitives::{literal, search_for, take};
//! use textcombinators::Parser;
//!
//! // A length-prefixed string: "3:abc".
//! let p = Block::new()
//!     .bind(|_| search_for(":"))
//!     .bind(|bound: &[String]| take(bound[0].parse().unwrap_or(0)))
//!     .finish(|mut values| values.pop());
//! assert_eq!(Ok((Some("abc".to_string()), "de")), p.parse("3:abcde"));
//! ```

use crate::parser::{BoxedParser, Outcome, Parser};

/// What a procedure does when resumed.
pub enum Step<V, O> {
    /// Suspend until the parser has been applied. The procedure is resumed with its result.
    Yield(BoxedParser<V>),
    Done(O),
}

pub trait Procedure {
    /// The result type of the parsers the procedure yields.
    type Value;
    type Output;

    /// resume continues the procedure. The first call receives None; every later call receives
    /// the result of the parser yielded by the previous call. A procedure is never resumed after
    /// it returned `Step::Done`, or after one of its parsers failed.
    fn resume(&mut self, value: Option<Self::Value>) -> Step<Self::Value, Self::Output>;
}

/// Run `procedure` on `input`.
pub fn interpret<'a, P: Procedure>(mut procedure: P, input: &'a str) -> Outcome<'a, P::Output> {
    let mut rest = input;
    let mut resumed_with = None;
    let mut steps = 0;
    loop {
        match procedure.resume(resumed_with.take()) {
            Step::Done(output) => return Ok((output, rest)),
            Step::Yield(parser) => match parser.parse(rest) {
                Ok((value, next)) => {
                    resumed_with = Some(value);
                    rest = next;
                    steps += 1;
                }
                Err(e) => {
                    log::trace!("do-block failed after {} steps: {}", steps, e);
                    return Err(e);
                }
            },
        }
    }
}

/// Do is a parser running a fresh procedure, built by a factory function, on every application.
pub struct Do<F>(F);

impl<F> Do<F> {
    pub fn new(factory: F) -> Do<F> {
        Do(factory)
    }
}

impl<P: Procedure, F: Fn() -> P> Parser for Do<F> {
    type Result = P::Output;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        interpret((self.0)(), input)
    }
}

type Continuation<V> = Box<dyn Fn(&[V]) -> BoxedParser<V> + Send + Sync>;

/// Block is a do-block built from a list of continuations. Each continuation receives the values
/// bound by the previous steps and returns the parser for the next step. When all steps have
/// succeeded, the finishing function turns the bound values into the block's result.
///
/// A block is a parser itself, so blocks can be nested as steps of other blocks.
pub struct Block<V, O> {
    steps: Vec<Continuation<V>>,
    finish: Box<dyn Fn(Vec<V>) -> O + Send + Sync>,
}

impl<V: 'static> Block<V, Vec<V>> {
    /// Create an empty block returning all bound values.
    pub fn new() -> Block<V, Vec<V>> {
        Block {
            steps: vec![],
            finish: Box::new(|values| values),
        }
    }
}

impl<V: 'static> Default for Block<V, Vec<V>> {
    fn default() -> Self {
        Block::new()
    }
}

impl<V: 'static, O> Block<V, O> {
    /// Append a step. `f` is called with the values bound so far, in order.
    pub fn bind<P, F>(mut self, f: F) -> Self
    where
        P: Parser<Result = V> + Send + Sync + 'static,
        F: Fn(&[V]) -> P + Send + Sync + 'static,
    {
        self.steps.push(Box::new(move |bound: &[V]| f(bound).boxed()));
        self
    }

    /// Set the function computing the block's result from all bound values.
    pub fn finish<O2, F: Fn(Vec<V>) -> O2 + Send + Sync + 'static>(self, f: F) -> Block<V, O2> {
        Block {
            steps: self.steps,
            finish: Box::new(f),
        }
    }
}

/// The procedure state of one application of a `Block`.
struct BlockRun<'b, V, O> {
    block: &'b Block<V, O>,
    bound: Vec<V>,
}

impl<'b, V, O> Procedure for BlockRun<'b, V, O> {
    type Value = V;
    type Output = O;

    fn resume(&mut self, value: Option<V>) -> Step<V, O> {
        if let Some(v) = value {
            self.bound.push(v);
        }
        match self.block.steps.get(self.bound.len()) {
            Some(step) => Step::Yield(step(self.bound.as_slice())),
            None => Step::Done((self.block.finish)(std::mem::take(&mut self.bound))),
        }
    }
}

impl<V, O> Parser for Block<V, O> {
    type Result = O;
    fn parse<'a>(&self, input: &'a str) -> Outcome<'a, Self::Result> {
        let run = BlockRun {
            block: self,
            bound: Vec::with_capacity(self.steps.len()),
        };
        interpret(run, input)
    }
}
