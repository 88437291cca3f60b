//! Deck values and their text form.

use std::fmt;

/// One value on the right-hand side of a deck line.
#[derive(Clone, Debug, PartialEq)]
pub enum DeckValue {
    /// An integer, written in decimal.
    Int(i64),
    /// A real, written with [`format_real`].
    Real(f64),
    /// A bare token: an option name or a constant expression (`-q_e`).
    Word(String),
    /// Space-separated scalars.
    List(Vec<DeckValue>),
}

impl DeckValue {
    /// Parse a single whitespace-free token.
    ///
    /// Integers win over reals; non-finite spellings (`inf`, `nan`) stay
    /// words since the engine cannot read them as numbers.
    pub fn from_token(token: &str) -> Self {
        if let Ok(i) = token.parse::<i64>() {
            return Self::Int(i);
        }
        match token.parse::<f64>() {
            Ok(r) if r.is_finite() => Self::Real(r),
            _ => Self::Word(token.to_string()),
        }
    }

    /// Integer value, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value of an `Int` or `Real`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Token text of a `Word`.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }

    /// Items of a `List`, or this value as a one-element slice.
    pub fn items(&self) -> &[DeckValue] {
        match self {
            Self::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Three numeric items.
    pub fn as_f64_3(&self) -> Option<[f64; 3]> {
        match self.items() {
            [a, b, c] => Some([a.as_f64()?, b.as_f64()?, c.as_f64()?]),
            _ => None,
        }
    }

    /// Three integer items.
    pub fn as_i64_3(&self) -> Option<[i64; 3]> {
        match self.items() {
            [a, b, c] => Some([a.as_i64()?, b.as_i64()?, c.as_i64()?]),
            _ => None,
        }
    }
}

impl fmt::Display for DeckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Real(r) => f.write_str(&format_real(*r)),
            Self::Word(w) => f.write_str(w),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Render a real the way decks spell it.
///
/// Shortest round-tripping digits; exponent form when `|v| >= 1e6` or
/// `0 < |v| < 1e-4`; integral values in range have no fraction; both
/// zeros print as `0`.
///
/// ```
/// use picdeck_deck::format_real;
///
/// assert_eq!(format_real(1e25), "1e25");
/// assert_eq!(format_real(-20e-6), "-2e-5");
/// assert_eq!(format_real(0.1), "0.1");
/// assert_eq!(format_real(1.0), "1");
/// assert_eq!(format_real(-0.0), "0");
/// ```
pub fn format_real(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if !(1e-4..1e6).contains(&a) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

impl From<i64> for DeckValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for DeckValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u8> for DeckValue {
    fn from(v: u8) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for DeckValue {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for DeckValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for DeckValue {
    fn from(v: &str) -> Self {
        Self::Word(v.to_string())
    }
}

impl From<String> for DeckValue {
    fn from(v: String) -> Self {
        Self::Word(v)
    }
}

impl<T: Into<DeckValue>, const N: usize> From<[T; N]> for DeckValue {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DeckValue>> From<Vec<T>> for DeckValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
