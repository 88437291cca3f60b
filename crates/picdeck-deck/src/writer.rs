//! Deck writers.
//!
//! [`DeckWriter`] streams decks to any `Write` sink. [`write_deck_file`]
//! writes a deck to disk through a sibling temporary file and a rename,
//! so readers never observe a partially written deck.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::deck::InputDeck;
use crate::error::DeckError;

/// Writes decks to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use picdeck_deck::{parse_deck, DeckWriter, InputDeck};
///
/// let mut deck = InputDeck::new();
/// deck.set("max_step", 40i64).unwrap();
///
/// let mut buf = Vec::new();
/// let mut writer = DeckWriter::new(&mut buf);
/// writer.write_deck(&deck).unwrap();
/// assert_eq!(writer.bytes_written(), "max_step = 40\n".len() as u64);
/// drop(writer);
///
/// assert_eq!(parse_deck(std::str::from_utf8(&buf).unwrap()).unwrap(), deck);
/// ```
pub struct DeckWriter<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> DeckWriter<W> {
    /// Wrap a sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    /// Render and write `deck`.
    pub fn write_deck(&mut self, deck: &InputDeck) -> Result<(), DeckError> {
        let text = deck.to_string();
        self.writer.write_all(text.as_bytes())?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), DeckError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Write `deck` to `path`, replacing any existing file atomically.
///
/// The deck goes to `<path>.tmp` first, is synced, then renamed over
/// `path`. On failure the temporary file is removed and `path` is left
/// untouched.
pub fn write_deck_file(path: impl AsRef<Path>, deck: &InputDeck) -> Result<(), DeckError> {
    let path = path.as_ref();
    let tmp = temp_path(path);
    let result = write_then_rename(&tmp, path, deck);
    if result.is_err() {
        // The temp file may not exist if creation itself failed.
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_then_rename(tmp: &Path, path: &Path, deck: &InputDeck) -> Result<(), DeckError> {
    let file = File::create(tmp)?;
    let mut writer = DeckWriter::new(BufWriter::new(file));
    writer.write_deck(deck)?;
    writer.flush()?;
    let file = writer
        .into_inner()
        .into_inner()
        .map_err(|e| DeckError::Io(e.into_error()))?;
    file.sync_all()?;
    fs::rename(tmp, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_deck;
    use std::io::BufReader;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "picdeck-writer-{tag}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_deck() -> InputDeck {
        let mut deck = InputDeck::new();
        deck.set("amr.n_cell", [4u32, 4, 4]).unwrap();
        deck.set("warpx.cfl", 0.5).unwrap();
        deck
    }

    #[test]
    fn file_roundtrip_leaves_no_temp() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("inputs");
        write_deck_file(&path, &sample_deck()).unwrap();

        let back = read_deck(BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(back, sample_deck());
        assert!(!temp_path(&path).exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overwrite_replaces_contents() {
        let dir = scratch_dir("overwrite");
        let path = dir.join("inputs");
        fs::write(&path, "stale = 1\n").unwrap();
        write_deck_file(&path, &sample_deck()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), sample_deck().to_string());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("picdeck-writer-does-not-exist")
            .join("nested")
            .join("inputs");
        assert!(matches!(
            write_deck_file(&path, &sample_deck()),
            Err(DeckError::Io(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(temp_path(Path::new("out/inputs")), PathBuf::from("out/inputs.tmp"));
    }
}
