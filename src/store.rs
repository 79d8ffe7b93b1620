//! The entity store: all loaded locations and languages plus the
//! derived lookup indices. Immutable after a successful load, so the
//! resolver and fetcher can share it freely across threads.

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;
use thiserror::Error;

use crate::entity::{Language, Location};
use crate::game::Game;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("location `{0}` is defined twice")]
    DuplicateLocation(String),
    #[error("language `{0}` is defined twice")]
    DuplicateLanguage(String),
    #[error("game id ({game}, {id}{kinded}) is registered by both `{first}` and `{second}`", kinded = fmt_kind(.kind))]
    DuplicateGameId { game: Game, id: String, kind: Option<String>, first: String, second: String },
    #[error("`{0}` lists itself as a fallback")]
    SelfFallback(String),
    #[error("fallback cycle through `{0}`")]
    FallbackCycle(String),
}

fn fmt_kind(kind: &Option<String>) -> String {
    match kind {
        Some(k) => format!(", {k}"),
        None => String::new(),
    }
}

/// Index entries for one `(game, external id)` key, in registration
/// order. Usually a single entry; more when a game has parallel typed
/// identifier namespaces.
type TypedEntries = Vec<(Option<String>, String)>;

#[derive(Debug, Default)]
pub struct EntityStore {
    locations: AHashMap<String, Location>,
    languages: AHashMap<String, Language>,
    /// `(game, external location id)` to typed internal location ids.
    location_index: AHashMap<(Game, String), TypedEntries>,
    /// `(game, external language id)` to internal language id.
    language_index: AHashMap<(Game, String), String>,
    /// Per-game view of all external language ids, filled lazily on
    /// first request. Write-once per key; a race recomputes the same
    /// value, so last write wins harmlessly.
    game_languages: RwLock<AHashMap<Game, Arc<[String]>>>,
}

impl EntityStore {
    /// Build the store and all indices from loaded entity records.
    ///
    /// Duplicate keys, self-referencing fallbacks and fallback cycles
    /// are hard errors here rather than silent last-write-wins, so that
    /// everything after a successful load can stay infallible.
    pub fn load(locations: Vec<Location>, languages: Vec<Language>) -> Result<Self, LoadError> {
        let mut store = EntityStore::default();

        for location in locations {
            if store.locations.contains_key(&location.id) {
                return Err(LoadError::DuplicateLocation(location.id));
            }
            if location.fallback_locations.contains(&location.id) {
                return Err(LoadError::SelfFallback(location.id));
            }
            for game_id in &location.game_ids {
                let key = (game_id.game, game_id.id.clone());
                let entries = store.location_index.entry(key).or_default();
                if let Some((_, first)) = entries.iter().find(|(kind, _)| *kind == game_id.kind) {
                    return Err(LoadError::DuplicateGameId {
                        game: game_id.game,
                        id: game_id.id.clone(),
                        kind: game_id.kind.clone(),
                        first: first.clone(),
                        second: location.id.clone(),
                    });
                }
                entries.push((game_id.kind.clone(), location.id.clone()));
            }
            store.locations.insert(location.id.clone(), location);
        }

        for language in languages {
            if store.languages.contains_key(&language.id) {
                return Err(LoadError::DuplicateLanguage(language.id));
            }
            if language.fallback_languages.contains(&language.id) {
                return Err(LoadError::SelfFallback(language.id));
            }
            for game_id in &language.game_ids {
                let key = (game_id.game, game_id.id.clone());
                if let Some(first) = store.language_index.get(&key) {
                    return Err(LoadError::DuplicateGameId {
                        game: game_id.game,
                        id: game_id.id.clone(),
                        kind: game_id.kind.clone(),
                        first: first.clone(),
                        second: language.id.clone(),
                    });
                }
                store.language_index.insert(key, language.id.clone());
            }
            store.languages.insert(language.id.clone(), language);
        }

        check_acyclic(&store.locations, |loc| &loc.fallback_locations)?;
        check_acyclic(&store.languages, |lang| &lang.fallback_languages)?;

        Ok(store)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn language(&self, id: &str) -> Option<&Language> {
        self.languages.get(id)
    }

    /// Look up a location by its in-game identifier. With `kind` given,
    /// only that namespace matches; without it, the first registered
    /// entry wins, typed or not.
    pub fn location_by_game_id(
        &self,
        game: Game,
        external_id: &str,
        kind: Option<&str>,
    ) -> Option<&Location> {
        let entries = self.location_index.get(&(game, external_id.to_string()))?;
        let id = match kind {
            Some(kind) => &entries.iter().find(|(k, _)| k.as_deref() == Some(kind))?.1,
            None => &entries.first()?.1,
        };
        self.locations.get(id)
    }

    /// Map a game's external language id to the internal language id.
    pub fn language_id_by_game_id(&self, game: Game, external_id: &str) -> Option<&str> {
        self.language_index.get(&(game, external_id.to_string())).map(String::as_str)
    }

    /// All external language ids registered for `game`, sorted.
    /// Computed on first request and cached for the store's lifetime.
    pub fn game_language_ids(&self, game: Game) -> Arc<[String]> {
        // A poisoned lock only means some reader panicked; the cache
        // itself is always in a valid state, so take the guard anyway.
        if let Some(cached) =
            self.game_languages.read().unwrap_or_else(PoisonError::into_inner).get(&game)
        {
            return Arc::clone(cached);
        }
        let mut ids: Vec<String> = self
            .language_index
            .keys()
            .filter(|(g, _)| *g == game)
            .map(|(_, id)| id.clone())
            .collect();
        ids.sort();
        let ids: Arc<[String]> = ids.into();
        self.game_languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(game, Arc::clone(&ids));
        ids
    }
}

/// Depth-first check that the fallback graph has no cycles. References
/// to ids that were never loaded are skipped, matching the resolver's
/// treatment of them.
fn check_acyclic<T>(
    entities: &AHashMap<String, T>,
    fallbacks: impl Fn(&T) -> &Vec<String>,
) -> Result<(), LoadError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit<T>(
        id: &str,
        entities: &AHashMap<String, T>,
        fallbacks: &impl Fn(&T) -> &Vec<String>,
        marks: &mut AHashMap<String, Mark>,
    ) -> Result<(), LoadError> {
        match marks.get(id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => return Err(LoadError::FallbackCycle(id.to_string())),
            None => {}
        }
        marks.insert(id.to_string(), Mark::Visiting);
        if let Some(entity) = entities.get(id) {
            for fallback in fallbacks(entity) {
                visit(fallback, entities, fallbacks, marks)?;
            }
        }
        marks.insert(id.to_string(), Mark::Done);
        Ok(())
    }

    let mut marks = AHashMap::new();
    for id in entities.keys() {
        visit(id, entities, &fallbacks, &mut marks)?;
    }
    Ok(())
}
