//! The entity model: locations, languages and their per-game identifiers.
//!
//! These records are loaded once at startup from an external repository
//! and are read-only for the rest of the run.

use serde::Deserialize;

use crate::game::Game;

/// A place that can have names in several languages.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    /// Stable internal key, unique across all locations.
    pub id: String,
    /// Opaque external reference; carried through, never interpreted.
    #[serde(default)]
    pub geonames_id: Option<String>,
    /// Ordered fallback chain of other location ids. Order is priority,
    /// earlier entries are consulted first.
    #[serde(default)]
    pub fallback_locations: Vec<String>,
    /// How each target game refers to this location.
    #[serde(default)]
    pub game_ids: Vec<GameId>,
    #[serde(default)]
    pub names: Vec<Name>,
}

impl Location {
    /// A location with no names and no fallback chain can never resolve
    /// to anything; the resolver short-circuits on this.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.fallback_locations.is_empty()
    }
}

/// A language (or culture, or name list, depending on the game's model).
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub id: String,
    /// ISO-639 variant code. Opaque pass-through, not used by resolution.
    #[serde(default)]
    pub code: Option<String>,
    /// Ordered fallback chain of other language ids.
    #[serde(default)]
    pub fallback_languages: Vec<String>,
    #[serde(default)]
    pub game_ids: Vec<GameId>,
}

/// An external identifier as understood by one target game.
#[derive(Debug, Clone, Deserialize)]
pub struct GameId {
    pub game: Game,
    /// Disambiguates parallel identifier namespaces within one game,
    /// for example HOI4 "State" versus "City" ids.
    #[serde(default)]
    pub kind: Option<String>,
    /// Another GameId's id that contains this one, e.g. a city's state.
    #[serde(default)]
    pub parent: Option<String>,
    /// Marks which language supplies the entity's canonical in-game
    /// name, as opposed to the cultural variants.
    #[serde(default)]
    pub default_name_language_id: Option<String>,
    /// The identifier string the game itself uses.
    pub id: String,
}

/// One name of a location in one language.
#[derive(Debug, Clone, Deserialize)]
pub struct Name {
    pub language_id: String,
    pub value: String,
    /// Demonym or adjectival form, where the language has one.
    #[serde(default)]
    pub adjective: Option<String>,
    /// Free-text annotation. Never interpreted, only echoed into
    /// generated comments.
    #[serde(default)]
    pub comment: Option<String>,
}
