//! Rendering resolved localisations into declaration-file lines.

use crate::charset::normalise;
use crate::game::{Game, RenderStyle};
use crate::localisation::Localisation;
use crate::patch::normalise::INDENT_STEP;

/// Render the localisation block for one declaration, indented to
/// `indent` (already one level deeper than the declaration line).
/// `localisations` must be sorted by the caller.
pub fn render_block(
    game: Game,
    style: RenderStyle,
    indent: usize,
    localisations: &[Localisation],
) -> Vec<String> {
    match style {
        RenderStyle::Inline => render_inline(game, indent, localisations),
        RenderStyle::KeyIndirection => render_key_block(game, indent, localisations),
    }
}

/// One `languageGameId = "Name"` line per localisation, the classic
/// engines' format.
fn render_inline(game: Game, indent: usize, localisations: &[Localisation]) -> Vec<String> {
    let pad = " ".repeat(indent);
    localisations
        .iter()
        .filter_map(|loca| {
            let name = normalise(&loca.name, game.charset());
            if name.is_empty() {
                return None;
            }
            let line = match &loca.comment {
                Some(comment) => {
                    format!("{pad}{} = \"{name}\" # {comment}", loca.language_game_id)
                }
                None => format!("{pad}{} = \"{name}\"", loca.language_game_id),
            };
            Some(line)
        })
        .collect()
}

/// A `cultural_names` sub-block whose entries reference localisation
/// keys defined by the downstream key-file renderers. The normalised
/// name is echoed as a comment for mod authors reading the file.
fn render_key_block(game: Game, indent: usize, localisations: &[Localisation]) -> Vec<String> {
    let pad = " ".repeat(indent);
    let entry_pad = " ".repeat(indent + INDENT_STEP);
    let mut lines = Vec::with_capacity(localisations.len() + 2);
    lines.push(format!("{pad}cultural_names = {{"));
    for loca in localisations {
        let name = normalise(&loca.name, game.charset());
        if name.is_empty() {
            continue;
        }
        lines.push(format!(
            "{entry_pad}{} = cn_{}_{} # {name}",
            loca.language_game_id, loca.game_id, loca.language_game_id
        ));
    }
    lines.push(format!("{pad}}}"));
    lines
}
