//! Input-deck model and text codec for picdeck.
//!
//! An [`InputDeck`] is the flat, ordered key/value description the
//! external engine reads at startup. This crate owns its in-memory model,
//! the text format, and the file sink.
//!
//! # Architecture
//!
//! - [`InputDeck`] holds entries in insertion order; rendering is a pure
//!   function of that order, so equal decks render to identical bytes
//! - [`DeckWriter`] streams a deck to any `Write` sink;
//!   [`write_deck_file`] writes atomically so a partial deck never appears
//! - [`parse_deck`] / [`read_deck`] read the format back
//! - [`deck_fingerprint`] is an FNV-1a hash of the rendered text
//!
//! # Format
//!
//! ```text
//! amr.n_cell = 64 64 64
//! geometry.prob_lo = -2e-5 -2e-5 -2e-5
//! electrons.density = 1e25
//! ```
//!
//! One `key = value` line per setting; list values are space separated.
//! Blank lines and `#` comments are accepted on input and never emitted.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod deck;
pub mod error;
pub mod hash;
pub mod reader;
pub mod value;
pub mod writer;

pub use deck::InputDeck;
pub use error::DeckError;
pub use hash::deck_fingerprint;
pub use reader::{parse_deck, read_deck};
pub use value::{format_real, DeckValue};
pub use writer::{write_deck_file, DeckWriter};
