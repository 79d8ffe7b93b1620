//! Reading and writing declaration files in the byte encoding each
//! game's engine expects.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};

use crate::game::Game;

/// Read and strictly decode a declaration file. Malformed bytes are an
/// error, not silently replaced; the files must round-trip.
pub fn read_declarations(path: &Path, game: Game) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, _, had_errors) = game.encoding().decode(&bytes);
    if had_errors {
        bail!("{} is not valid {}", path.display(), game.encoding().name());
    }
    Ok(text.into_owned())
}

/// Strictly encode and write patched text. Unmappable characters mean
/// the charset normaliser upstream failed its contract.
pub fn write_declarations(path: &Path, game: Game, text: &str) -> Result<()> {
    let (bytes, _, had_errors) = game.encoding().encode(text);
    if had_errors {
        bail!(
            "output for {} contains characters not representable in {}",
            path.display(),
            game.encoding().name()
        );
    }
    fs::write(path, bytes)?;
    Ok(())
}
