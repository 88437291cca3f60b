//! Deck fingerprints.
//!
//! FNV-1a over the rendered deck text. Not cryptographic; used to tell
//! whether two runs were started from the same deck.

use crate::deck::InputDeck;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |h, &b| fnv1a_byte(h, b))
}

/// Hash of `deck` as rendered.
///
/// Equal decks give equal fingerprints. Entry order is part of the
/// rendering, so reordering entries changes the fingerprint. An empty
/// deck hashes to the FNV offset basis.
pub fn deck_fingerprint(deck: &InputDeck) -> u64 {
    fnv1a(deck.to_string().as_bytes())
}
