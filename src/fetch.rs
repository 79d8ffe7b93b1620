//! Fan-out over all of a game's languages for one location.

use rayon::prelude::*;

use crate::game::Game;
use crate::localisation::Localisation;
use crate::resolve::resolve;
use crate::store::EntityStore;

/// Resolve localisations for one in-game location id across every
/// language the game knows, in parallel.
///
/// Misses of any kind are silent omissions. The result carries at most
/// one entry per external language id (one task per id) and is
/// unordered at this boundary; callers must sort before emitting
/// anything, because parallel population order is not reproducible.
pub fn fetch_all(
    store: &EntityStore,
    external_location_id: &str,
    kind: Option<&str>,
    game: Game,
) -> Vec<Localisation> {
    let Some(location) = store.location_by_game_id(game, external_location_id, kind) else {
        return Vec::new();
    };

    let language_game_ids = store.game_language_ids(game);
    language_game_ids
        .par_iter()
        .filter_map(|language_game_id| {
            let language_id = store.language_id_by_game_id(game, language_game_id)?;
            let language = store.language(language_id)?;
            let found = resolve(store, location, language)?;
            Some(Localisation {
                id: found.location_id.to_string(),
                game_id: external_location_id.to_string(),
                language_id: found.language_id.to_string(),
                language_game_id: language_game_id.clone(),
                name: found.name.value.clone(),
                adjective: found.name.adjective.clone(),
                comment: found.name.comment.clone(),
            })
        })
        .collect()
}
