//! Shorthand constructors for entity records in unit tests.

use crate::entity::{GameId, Language, Location, Name};
use crate::game::Game;

pub fn name(language_id: &str, value: &str) -> Name {
    Name {
        language_id: language_id.to_string(),
        value: value.to_string(),
        adjective: None,
        comment: None,
    }
}

pub fn game_id(game: Game, id: &str) -> GameId {
    GameId {
        game,
        kind: None,
        parent: None,
        default_name_language_id: None,
        id: id.to_string(),
    }
}

pub fn typed_game_id(game: Game, id: &str, kind: &str) -> GameId {
    GameId { kind: Some(kind.to_string()), ..game_id(game, id) }
}

pub fn location(id: &str, fallbacks: &[&str], game_ids: Vec<GameId>, names: Vec<Name>) -> Location {
    Location {
        id: id.to_string(),
        geonames_id: None,
        fallback_locations: fallbacks.iter().map(ToString::to_string).collect(),
        game_ids,
        names,
    }
}

pub fn language(id: &str, fallbacks: &[&str], game_ids: Vec<GameId>) -> Language {
    Language {
        id: id.to_string(),
        code: None,
        fallback_languages: fallbacks.iter().map(ToString::to_string).collect(),
        game_ids,
    }
}
