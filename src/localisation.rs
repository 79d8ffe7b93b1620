//! The transient record produced by resolution, consumed by renderers.

use serde::Serialize;

/// A resolved (location, language) name, ready for rendering into a
/// target file. Created per query and discarded after use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Localisation {
    /// The id of the fallback target that actually supplied the match.
    /// May differ from the queried location when a fallback won.
    pub id: String,
    /// The external id that was originally queried, echoed for correlation.
    pub game_id: String,
    /// Internal id of the language that matched.
    pub language_id: String,
    /// External identifier of that language within the target game.
    pub language_game_id: String,
    pub name: String,
    pub adjective: Option<String>,
    pub comment: Option<String>,
}
