//! Quote-aware segment scanner.
//!
//! Splits an identifier on `|` while treating `"..."` runs as atomic, so a
//! quoted name part may contain the separator. A doubled quote (`""`) inside a
//! quoted run is an escaped quote; the scanner simply leaves and re-enters the
//! quoted state, which keeps the raw text intact for the name parser.

use crate::IdError;

/// Segment separator of the identifier wire format.
pub const SEPARATOR: char = '|';

const QUOTE: char = '"';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside,
}

/// Splits `input` into raw segments.
///
/// Segments are returned verbatim (quotes included). An unterminated quoted
/// run fails with [`IdError::MalformedQuotedName`].
pub fn split_segments(input: &str) -> Result<Vec<String>, IdError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut state = State::Outside;

    for c in input.chars() {
        match (state, c) {
            (State::Outside, SEPARATOR) => segments.push(std::mem::take(&mut current)),
            (State::Outside, QUOTE) => {
                state = State::Inside;
                current.push(c);
            }
            (State::Inside, QUOTE) => {
                state = State::Outside;
                current.push(c);
            }
            _ => current.push(c),
        }
    }

    if state == State::Inside {
        return Err(IdError::malformed(&current, "unterminated quote"));
    }

    segments.push(current);
    Ok(segments)
}
