//! The fallback resolver: find the nearest name for a (location,
//! language) pair, honoring both entities' fallback chains.

use crate::entity::{Language, Location, Name};
use crate::store::EntityStore;

/// A successful resolution. Borrows from the store; the fetcher stamps
/// it into a full [`Localisation`](crate::localisation::Localisation).
#[derive(Debug, Clone, Copy)]
pub struct NameMatch<'a> {
    /// Id of the location that actually supplied the name. Differs from
    /// the queried location when a fallback won.
    pub location_id: &'a str,
    /// Id of the language the name is in.
    pub language_id: &'a str,
    pub name: &'a Name,
}

/// Resolve a name for `location` in `language`, or `None`.
///
/// Candidates are tried with locations as the outer loop and languages
/// as the inner loop, first match wins. The nesting order is a design
/// decision, not an accident: the closest location fallback with *any*
/// acceptable language beats a distant fallback with the exact
/// requested language. Fallback ids not present in the store are
/// skipped without failing the lookup.
pub fn resolve<'a>(
    store: &'a EntityStore,
    location: &'a Location,
    language: &'a Language,
) -> Option<NameMatch<'a>> {
    // A location with no names and no fallbacks is defined to resolve
    // to nothing; don't bother walking the language chain.
    if location.is_empty() {
        return None;
    }

    let location_candidates: Vec<&Location> = std::iter::once(location)
        .chain(location.fallback_locations.iter().filter_map(|id| store.location(id)))
        .collect();
    let language_candidates: Vec<&Language> = std::iter::once(language)
        .chain(language.fallback_languages.iter().filter_map(|id| store.language(id)))
        .collect();

    for candidate in location_candidates {
        for lang in &language_candidates {
            // Linear scan; a location's name list must not carry
            // duplicate language ids, or the winner depends on load order.
            if let Some(name) = candidate.names.iter().find(|n| n.language_id == lang.id) {
                return Some(NameMatch {
                    location_id: &candidate.id,
                    language_id: &lang.id,
                    name,
                });
            }
        }
    }
    None
}
