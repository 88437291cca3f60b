//! Deck text parser.
//!
//! Accepts the format [`InputDeck`]'s `Display` produces plus blank lines
//! and `#` comments. Rejects lines without `=`, empty values, malformed
//! keys, and repeated keys.

use std::io::BufRead;

use crate::deck::{is_valid_key, InputDeck};
use crate::error::DeckError;
use crate::value::DeckValue;

/// Parse deck text.
pub fn parse_deck(text: &str) -> Result<InputDeck, DeckError> {
    let mut deck = InputDeck::new();
    for (idx, line) in text.lines().enumerate() {
        parse_line(&mut deck, idx + 1, line)?;
    }
    Ok(deck)
}

/// Read a deck from any buffered source.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub fn read_deck<R: BufRead>(reader: R) -> Result<InputDeck, DeckError> {
    let mut deck = InputDeck::new();
    for (idx, line) in reader.lines().enumerate() {
        parse_line(&mut deck, idx + 1, &line?)?;
    }
    Ok(deck)
}

fn parse_line(deck: &mut InputDeck, line_no: usize, raw: &str) -> Result<(), DeckError> {
    let content = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let content = content.trim();
    if content.is_empty() {
        return Ok(());
    }

    let (key, rest) = content
        .split_once('=')
        .ok_or_else(|| DeckError::MalformedLine {
            line: line_no,
            reason: "expected 'key = value'".to_string(),
        })?;
    let key = key.trim();
    if !is_valid_key(key) {
        return Err(DeckError::MalformedLine {
            line: line_no,
            reason: format!("invalid key '{key}'"),
        });
    }

    let mut tokens: Vec<DeckValue> = rest.split_whitespace().map(DeckValue::from_token).collect();
    let value = match tokens.len() {
        0 => {
            return Err(DeckError::MalformedLine {
                line: line_no,
                reason: format!("key '{key}' has no value"),
            })
        }
        1 => tokens.remove(0),
        _ => DeckValue::List(tokens),
    };
    deck.set(key, value)
}
