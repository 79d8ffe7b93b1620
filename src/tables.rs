//! Per-game configuration of the declaration-file grammar bits the
//! patcher needs: tier prefixes, cultural-name keys, and the two
//! deny-lists driving the heuristic declaration window.
//!
//! These differ per game because the script grammars differ; they are
//! data, not universal constants.

use crate::game::Game;

#[derive(Debug, Clone, Copy)]
pub struct GameTokens {
    /// Single-letter hierarchy-level codes a declaration can start
    /// with, e.g. `e_` for empires down to `b_` for baronies.
    pub tier_prefixes: &'static [char],
    /// Keys whose lines the normaliser strips so stale generated data
    /// never survives a rebuild. The per-game external language ids are
    /// added to this set at runtime.
    pub static_cultural_keys: &'static [&'static str],
    /// Key prefixes treated the same way.
    pub cultural_key_prefixes: &'static [&'static str],
    /// If the most recently emitted line contains one of these, the
    /// current line's declaration match is a reference inside a
    /// condition/effect/limit block, not a declaration.
    pub forbidden_prev: &'static [&'static str],
    /// If the next raw line contains one of these, the block body is a
    /// scope or ownership query, not a title body.
    pub forbidden_next: &'static [&'static str],
}

// LAST UPDATED CK2 version 3.3.3
const CK2: GameTokens = GameTokens {
    tier_prefixes: &['e', 'k', 'd', 'c', 'b'],
    static_cultural_keys: &[],
    cultural_key_prefixes: &[],
    forbidden_prev: &[
        "trigger =",
        "limit =",
        "if =",
        "not =",
        "nor =",
        "and =",
        "or =",
        "any_",
        "all_",
        "every_",
        "random_",
        "allow =",
        "gain_effect =",
    ],
    forbidden_next: &[
        "holder",
        "has_holder",
        "owner",
        "is_titular",
        "de_jure_liege_or_above",
        "always",
        "exists",
    ],
};

// LAST UPDATED CK3 version 1.12.5
const CK3: GameTokens = GameTokens {
    tier_prefixes: &['e', 'k', 'd', 'c', 'b'],
    static_cultural_keys: &["cultural_names"],
    cultural_key_prefixes: &["name_list_"],
    forbidden_prev: &[
        "trigger =",
        "limit =",
        "if =",
        "else_if =",
        "else =",
        "not =",
        "nor =",
        "and =",
        "or =",
        "any_",
        "every_",
        "random_",
        "can_create =",
        "ai_allow =",
    ],
    forbidden_next: &[
        "holder",
        "is_titular",
        "tier",
        "exists",
        "scope:",
        "always",
    ],
};

/// The grammar tokens for a game, or `None` when no declaration-file
/// patching is configured for it.
pub fn game_tokens(game: Game) -> Option<&'static GameTokens> {
    match game {
        Game::Ck2 => Some(&CK2),
        Game::Ck3 => Some(&CK3),
        Game::Hoi4 => None,
    }
}
