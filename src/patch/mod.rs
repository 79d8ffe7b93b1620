//! The structural text patcher: normalise a declaration file, find the
//! genuine declaration sites, and inject resolved localisation blocks
//! while re-emitting every other line untouched.

use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::fetch::fetch_all;
use crate::fileio::{read_declarations, write_declarations};
use crate::game::{Game, RenderStyle};
use crate::store::EntityStore;
use crate::tables::{game_tokens, GameTokens};

pub mod heuristic;
pub mod normalise;
mod render;

use heuristic::{match_declaration, DeclarationFilter, WindowFilter};
use normalise::{normalise_text, CulturalKeys, INDENT_STEP};
use render::render_block;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("no declaration-file patching is configured for {0}")]
    UnsupportedGame(Game),
}

/// One patching pipeline instance for one target game. Strictly
/// sequential per file, since line order and the heuristic window are
/// semantically significant; separate instances may run concurrently.
#[derive(Debug)]
pub struct Patcher<'a> {
    store: &'a EntityStore,
    game: Game,
    style: RenderStyle,
    tokens: &'static GameTokens,
    keys: CulturalKeys,
    filter: Box<dyn DeclarationFilter>,
}

impl<'a> Patcher<'a> {
    /// Fails up front when the game has no declaration grammar
    /// configured; nothing is attempted after that.
    pub fn new(store: &'a EntityStore, game: Game) -> Result<Self, PatchError> {
        let style = game.render_style().ok_or(PatchError::UnsupportedGame(game))?;
        let tokens = game_tokens(game).ok_or(PatchError::UnsupportedGame(game))?;
        Ok(Patcher {
            store,
            game,
            style,
            tokens,
            keys: CulturalKeys::for_game(store, game, tokens),
            filter: Box::new(WindowFilter::new(tokens)),
        })
    }

    /// Swap the declaration heuristic, e.g. for a grammar-aware parser.
    pub fn with_filter(mut self, filter: Box<dyn DeclarationFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Patch decoded text and return the patched text.
    pub fn patch(&self, input: &str) -> String {
        let text = normalise_text(input, &self.keys);
        let lines: Vec<&str> = text.lines().collect();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());

        for (i, line) in lines.iter().enumerate() {
            let previous = out.last().map(String::as_str);
            let declaration = match_declaration(line, self.tokens.tier_prefixes);
            let genuine = declaration.is_some()
                && self.filter.is_genuine(previous, lines.get(i + 1).copied());
            out.push((*line).to_string());
            let Some(declaration) = declaration else { continue };
            if !genuine {
                continue;
            }

            let mut localisations = fetch_all(self.store, declaration.id, None, self.game);
            if localisations.is_empty() {
                continue;
            }
            // The fetch result is unordered; impose the output order here.
            localisations.sort_by(|a, b| a.language_game_id.cmp(&b.language_game_id));
            out.extend(render_block(
                self.game,
                self.style,
                declaration.indent + INDENT_STEP,
                &localisations,
            ));
        }

        if out.is_empty() {
            return String::new();
        }
        let mut patched = out.join("\n");
        patched.push('\n');
        patched
    }

    /// Read, patch and write one file in the game's expected encoding.
    pub fn patch_file(&self, input: &Path, output: &Path) -> Result<()> {
        let text = read_declarations(input, self.game)
            .with_context(|| format!("reading {}", input.display()))?;
        let patched = self.patch(&text);
        write_declarations(output, self.game, &patched)
            .with_context(|| format!("writing {}", output.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{game_id, language, location, name};

    fn sample_store() -> EntityStore {
        let locations = vec![location(
            "rome",
            &[],
            vec![game_id(Game::Ck2, "e_rome"), game_id(Game::Ck3, "e_rome")],
            vec![name("latin", "Rōma"), name("greek", "Rhṓmē")],
        )];
        let languages = vec![
            language("latin", &[], vec![game_id(Game::Ck2, "roman"), game_id(Game::Ck3, "name_list_roman")]),
            language("greek", &[], vec![game_id(Game::Ck2, "greek")]),
        ];
        EntityStore::load(locations, languages).unwrap()
    }

    #[test]
    fn injects_after_the_declaration_line_one_level_deeper() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        let output = patcher.patch("e_rome = {\n    title = e_rome\n}");
        assert_eq!(
            output,
            "e_rome = {\n    greek = \"Rh?me\"\n    roman = \"Roma\"\n    title = e_rome\n}\n"
        );
    }

    #[test]
    fn key_indirection_target_renders_a_cultural_names_block() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck3).unwrap();
        let output = patcher.patch("e_rome = {\n}\n");
        assert_eq!(
            output,
            "e_rome = {\n    cultural_names = {\n        name_list_roman = cn_e_rome_name_list_roman # Rōma\n    }\n}\n"
        );
    }

    #[test]
    fn forbidden_previous_line_suppresses_injection() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        let input = "limit = {\n    e_rome = {\n        always = no\n    }\n}\n";
        assert_eq!(patcher.patch(input), input);
    }

    #[test]
    fn forbidden_next_line_suppresses_injection() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        let input = "e_rome = {\n    holder = 140\n}\n";
        assert_eq!(patcher.patch(input), input);
    }

    #[test]
    fn unknown_identifiers_are_left_untouched() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        let input = "e_atlantis = {\n    color = { 1 2 3 }\n}\n";
        assert_eq!(patcher.patch(input), input);
    }

    #[test]
    fn fetch_only_games_are_rejected_up_front() {
        let store = sample_store();
        assert!(matches!(
            Patcher::new(&store, Game::Hoi4),
            Err(PatchError::UnsupportedGame(Game::Hoi4))
        ));
    }

    #[test]
    fn stale_names_are_replaced_not_duplicated() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        let input = "e_rome = {\n    roman = \"Stale\"\n    capital = 333\n}\n";
        let output = patcher.patch(input);
        assert_eq!(
            output,
            "e_rome = {\n    greek = \"Rh?me\"\n    roman = \"Roma\"\n    capital = 333\n}\n"
        );
    }

    #[test]
    fn stale_inline_names_without_brace_spacing_are_replaced() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        let input = "e_rome={roman=\"Stale\"}\n";
        let output = patcher.patch(input);
        assert_eq!(output, "e_rome = {\n    greek = \"Rh?me\"\n    roman = \"Roma\"\n}\n");
    }

    #[test]
    fn empty_input_patches_to_empty_output() {
        let store = sample_store();
        let patcher = Patcher::new(&store, Game::Ck2).unwrap();
        assert_eq!(patcher.patch(""), "");
        assert_eq!(patcher.patch("# nothing but commentary\n"), "");
    }
}
