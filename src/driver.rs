//! Entry points applying a parser to a complete input.

use std::io;

use crate::parser::{Outcome, ParseResult, Parser};
use crate::text;

/// Apply `p` to `input` and return the raw outcome, including the remaining text.
pub fn run<'a, P: Parser + ?Sized>(p: &P, input: &'a str) -> Outcome<'a, P::Result> {
    p.parse(input)
}

/// Apply `p` to `input` and return only its result. Any remaining text is ignored; combine `p`
/// with `end_of_input()` to require that all input is consumed.
pub fn parse<P: Parser + ?Sized>(p: &P, input: &str) -> ParseResult<P::Result> {
    match run(p, input) {
        Ok((r, _)) => Ok(r),
        Err(e) => {
            log::debug!("parse failed: {}", e);
            Err(e)
        }
    }
}

/// Read all of `r` as UTF-8 and parse it like `parse()`. Invalid UTF-8 sequences are skipped.
pub fn parse_reader<P: Parser + ?Sized, R: io::Read>(p: &P, r: R) -> ParseResult<P::Result> {
    let input = text::read_text(r);
    log::debug!("read {} bytes of input", input.len());
    parse(p, &input)
}
