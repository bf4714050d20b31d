//! Strict quote checking for delimited text
//!
//! The `csv` crate accepts unbalanced and stray quotes. This pass rejects
//! them up front, following RFC 4180 quoting: a quote may only open a field,
//! a quoted field escapes quotes by doubling them, and its closing quote must
//! be followed by a delimiter or the end of the line.

use crate::error::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    /// Inside a quoted field that opened on the given line
    Quoted(usize),
    /// Just read a quote inside a quoted field
    QuoteInQuoted(usize),
}

/// Scan `input` and report the first quoting error.
pub fn check_quoting(input: &[u8], delimiter: u8) -> Result<(), RecordError> {
    let mut line = 1usize;
    let mut state = State::FieldStart;

    for &b in input {
        state = match (state, b) {
            (State::FieldStart, b'"') => State::Quoted(line),
            (State::Unquoted, b'"') => return Err(RecordError::BareQuote { line }),
            (State::Quoted(start), b'"') => State::QuoteInQuoted(start),
            (State::Quoted(start), _) => State::Quoted(start),
            // Doubled quote is an escaped quote
            (State::QuoteInQuoted(start), b'"') => State::Quoted(start),
            (State::QuoteInQuoted(_), b) if b != delimiter && b != b'\n' && b != b'\r' => {
                return Err(RecordError::StrayQuote { line })
            }
            (_, b) if b == delimiter || b == b'\n' || b == b'\r' => State::FieldStart,
            _ => State::Unquoted,
        };
        if b == b'\n' {
            line += 1;
        }
    }

    match state {
        State::Quoted(start) => Err(RecordError::UnterminatedQuote { line: start }),
        _ => Ok(()),
    }
}
