//! Which games this builder can target, and what each target expects.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

use crate::charset::Charset;

/// A target game/mod variant. Unlike a validator, which checks one game
/// per run, the builder produces output for several games from the same
/// entity store, so this is plain runtime data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Deserialize)]
pub enum Game {
    #[strum(to_string = "CK2", serialize = "ck2")]
    #[serde(rename = "CK2")]
    Ck2,
    #[strum(to_string = "CK3", serialize = "ck3")]
    #[serde(rename = "CK3")]
    Ck3,
    #[strum(to_string = "HOI4", serialize = "hoi4")]
    #[serde(rename = "HOI4")]
    Hoi4,
}

/// How injected localisation blocks are written into declaration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// One `languageGameId = "Name"` line per resolved language,
    /// embedding the literal string.
    Inline,
    /// A `cultural_names = { ... }` sub-block whose entries reference
    /// localisation keys defined in separate key files.
    KeyIndirection,
}

impl Game {
    /// The text encoding the game's engine expects for its declaration files.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Game::Ck2 => WINDOWS_1252,
            Game::Ck3 | Game::Hoi4 => UTF_8,
        }
    }

    /// The character repertoire names must be normalised into before
    /// they are embedded in output for this game.
    pub fn charset(self) -> Charset {
        match self {
            Game::Ck2 => Charset::Windows1252,
            Game::Ck3 | Game::Hoi4 => Charset::Utf8,
        }
    }

    /// How the patcher renders localisations for this game, or `None`
    /// if no declaration-file grammar is configured for it.
    pub fn render_style(self) -> Option<RenderStyle> {
        match self {
            Game::Ck2 => Some(RenderStyle::Inline),
            Game::Ck3 => Some(RenderStyle::KeyIndirection),
            Game::Hoi4 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn game_names_round_trip() {
        assert_eq!(Game::from_str("ck3").unwrap(), Game::Ck3);
        assert_eq!(Game::from_str("CK3").unwrap(), Game::Ck3);
        assert_eq!(Game::Ck2.to_string(), "CK2");
        assert!(Game::from_str("eu5").is_err());
    }
}
