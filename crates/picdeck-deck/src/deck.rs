//! The ordered key/value deck.

use std::fmt;

use indexmap::IndexMap;

use crate::error::DeckError;
use crate::value::DeckValue;

/// An engine input deck.
///
/// Entries keep their insertion order, and rendering walks them in that
/// order, so two decks built by the same sequence of [`set`](Self::set)
/// calls render to identical bytes. Keys are unique.
///
/// # Examples
///
/// ```
/// use picdeck_deck::InputDeck;
///
/// let mut deck = InputDeck::new();
/// deck.set("amr.n_cell", [64u32, 64, 64]).unwrap();
/// deck.set("warpx.cfl", 1.0).unwrap();
/// assert_eq!(deck.to_string(), "amr.n_cell = 64 64 64\nwarpx.cfl = 1\n");
/// assert!(deck.set("warpx.cfl", 0.5).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputDeck {
    entries: IndexMap<String, DeckValue>,
}

impl InputDeck {
    /// An empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key = value`.
    ///
    /// Fails with [`DeckError::InvalidKey`] for keys the engine parser
    /// cannot read, and [`DeckError::DuplicateKey`] if `key` is present.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DeckValue>,
    ) -> Result<(), DeckError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(DeckError::InvalidKey { key });
        }
        if self.entries.contains_key(&key) {
            return Err(DeckError::DuplicateKey { key });
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&DeckValue> {
        self.entries.get(key)
    }

    /// Value for `key`, or [`DeckError::MissingKey`].
    pub fn require(&self, key: &str) -> Result<&DeckValue, DeckError> {
        self.entries.get(key).ok_or_else(|| DeckError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Numeric value for `key`.
    pub fn real(&self, key: &str) -> Result<f64, DeckError> {
        let v = self.require(key)?;
        v.as_f64().ok_or_else(|| invalid(key, "a real", v))
    }

    /// Integer value for `key`.
    pub fn int(&self, key: &str) -> Result<i64, DeckError> {
        let v = self.require(key)?;
        v.as_i64().ok_or_else(|| invalid(key, "an integer", v))
    }

    /// Three numeric values for `key`.
    pub fn reals3(&self, key: &str) -> Result<[f64; 3], DeckError> {
        let v = self.require(key)?;
        v.as_f64_3().ok_or_else(|| invalid(key, "3 reals", v))
    }

    /// Three integer values for `key`.
    pub fn ints3(&self, key: &str) -> Result<[i64; 3], DeckError> {
        let v = self.require(key)?;
        v.as_i64_3().ok_or_else(|| invalid(key, "3 integers", v))
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the deck has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeckValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries whose key starts with `prefix.`, in insertion order.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a DeckValue)> + 'a {
        self.iter().filter(move |(k, _)| {
            k.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

impl fmt::Display for InputDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

fn invalid(key: &str, expected: &'static str, found: &DeckValue) -> DeckError {
    DeckError::InvalidValue {
        key: key.to_string(),
        expected,
        found: found.to_string(),
    }
}

/// Keys are dot-separated identifiers: `max_step`, `amr.n_cell`.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
