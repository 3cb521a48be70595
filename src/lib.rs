//! textcombinators is a parser combinator library over in-memory text, without special magic. A
//! parser is a value implementing the `Parser` trait: applied to the remaining input, it returns a
//! result and the input left after it, or a `ParseError`. Parsers hold no state between
//! applications, so one parser can be applied any number of times.
//!
//! You will notice two kinds of parsers that however differ only in minor aspects:
//!
//!   * Ones starting with a capital letter are `struct`s (such as `StringParser`, `Sequence`).
//!     You can create them using `ParserName::new()`.
//!   * Ones starting with a lower case letter (and in snake case, such as `search_for`). Those are
//!     functions returning `Parser` objects, and are usually the more convenient way.
//!
//! Rules that refer to themselves are built with `rule::deferred`; rules that are easier to read
//! as a list of steps than as nested combinators are built with `interpreter::Block`.
//!
//! Here's a short example of how to use it:
//!
//! ```
//! use textcombinators::combinators::{or_else, pipe, sep_by};
//! use textcombinators::primitives::{literal, number_literal, search_for, whitespace, Number};
//! use textcombinators::Parser;
//!
//! // Goal: Parse the name before the colon, and then the list of numbers in brackets.
//! let name = search_for(":");
//! let numbers = pipe((
//!     literal("["),
//!     sep_by(number_literal(), pipe((literal(","), whitespace()))),
//!     literal("]"),
//! ))
//! .map(|(_, ns, _)| ns);
//! let entry = pipe((name, whitespace(), or_else((numbers, literal("-").map(|_| vec![])))));
//!
//! let ((name, _, ns), rest) = entry.parse("primes: [2, 3, 5.5] and more").unwrap();
//! assert_eq!("primes", name);
//! assert_eq!(vec![Number::Int(2), Number::Int(3), Number::Float(5.5)], ns);
//! assert_eq!(" and more", rest);
//!
//! // Use drivers to get only the result.
//! assert_eq!(Ok(vec![]), textcombinators::parse(&entry.map(|(_, _, ns)| ns), "none: -"));
//! ```

pub mod combinators;
pub mod driver;
pub mod interpreter;
pub mod parser;
pub mod primitives;
pub mod record;
pub mod rule;
pub mod text;

pub use combinators::{
    Alternative, Before, Maybe, Nearest, Pipe, Repeat, RepeatSpec, RepeatUntil, SepBy, Sequence,
    Then, Transform,
};
pub use driver::{parse, parse_reader, run};
pub use interpreter::{Block, Do, Procedure, Step};
pub use parser::{
    failure, from_fn, BoxedParser, ErrorKind, Outcome, ParseError, ParseResult, Parser,
};
pub use primitives::{
    any_char, break_to_end, end_of_input, literal, number_literal, search_for, whitespace, Number,
    StringParser,
};
pub use record::{named_pipe, NamedPipe, Record};
pub use rule::{deferred, Rule};
