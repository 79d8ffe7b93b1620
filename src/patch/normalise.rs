//! The text normalisation pass that runs before scanning.
//!
//! Puts the declaration file into a shape the line-based scanner can
//! rely on: uniform whitespace, no comments, no blank lines, no
//! multi-statement single lines, and no stale generated cultural-name
//! data. The whole pass is idempotent.

use ahash::AHashSet;

use crate::game::Game;
use crate::store::EntityStore;
use crate::tables::GameTokens;

/// Width of one indentation level; tabs are rewritten to this.
pub const INDENT_STEP: usize = 4;

/// The set of keys whose lines are regenerated from scratch on every
/// run and therefore stripped from the input.
#[derive(Debug)]
pub struct CulturalKeys {
    keys: AHashSet<String>,
    prefixes: &'static [&'static str],
}

impl CulturalKeys {
    /// The game's static keys plus every external language id known for
    /// the game, since inline-style targets key cultural name lines by
    /// language id.
    pub fn for_game(store: &EntityStore, game: Game, tokens: &GameTokens) -> Self {
        let mut keys: AHashSet<String> =
            tokens.static_cultural_keys.iter().map(ToString::to_string).collect();
        keys.extend(store.game_language_ids(game).iter().cloned());
        CulturalKeys { keys, prefixes: tokens.cultural_key_prefixes }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.keys.contains(key) || self.prefixes.iter().any(|p| key.starts_with(p))
    }

    #[cfg(test)]
    pub fn for_tests(keys: &[&str], prefixes: &'static [&'static str]) -> Self {
        CulturalKeys { keys: keys.iter().map(ToString::to_string).collect(), prefixes }
    }
}

/// Run the full normalisation pass. Output lines are joined with `\n`
/// and the text ends with a single newline.
pub fn normalise_text(text: &str, keys: &CulturalKeys) -> String {
    let text = text.replace('\t', &" ".repeat(INDENT_STEP));

    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = strip_comment(raw);
        let line = respace_equals(line);
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        match expand_inline(line, keys) {
            Some(expanded) => lines.extend(expanded),
            None => lines.extend(split_empty_block(line)),
        }
    }

    let lines = remove_cultural_lines(lines, keys);

    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Collapse whitespace around every `=` to exactly one space per side,
/// leaving indentation and quoted string values alone.
fn respace_equals(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    while chars.peek() == Some(&' ') {
        out.push(' ');
        chars.next();
    }
    while let Some(c) = chars.next() {
        if c == '"' {
            in_quotes = !in_quotes;
            out.push(c);
        } else if c == '=' && !in_quotes {
            while out.ends_with(' ') {
                out.pop();
            }
            out.push_str(" = ");
            while chars.peek() == Some(&' ') {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Expand a single-line `x_id = { key = "value" }` cultural-name
/// assignment onto three lines, so the scanner never has to parse a
/// multi-statement line.
fn expand_inline(line: &str, keys: &CulturalKeys) -> Option<Vec<String>> {
    let indent = indent_of(line);
    let body = &line[indent..];
    let (head, rest) = body.split_once(" = {")?;
    let inner = rest.strip_suffix('}')?.trim();
    if head.contains(' ') || !head.contains('_') {
        return None;
    }
    if inner.contains('{') || inner.contains('}') {
        return None;
    }
    let (key, value) = inner.split_once(" = ")?;
    if !value.starts_with('"') || !value.ends_with('"') || value.len() < 2 {
        return None;
    }
    if !keys.matches(key) {
        return None;
    }
    let pad = " ".repeat(indent);
    Some(vec![
        format!("{pad}{head} = {{"),
        format!("{pad}{}{inner}", " ".repeat(INDENT_STEP)),
        format!("{pad}}}"),
    ])
}

/// Put a single-line empty block `key = { }` on two lines, so empty
/// blocks are never matched as single-line.
fn split_empty_block(line: &str) -> Vec<String> {
    let indent = indent_of(line);
    let body = &line[indent..];
    if let Some(opener) = body.strip_suffix('}').map(str::trim_end) {
        if let Some(head) = opener
            .strip_suffix('{')
            .and_then(|h| h.trim_end().strip_suffix(" ="))
        {
            if !head.is_empty() && !head.contains(' ') {
                let pad = " ".repeat(indent);
                return vec![format!("{pad}{head} = {{"), format!("{pad}}}")];
            }
        }
    }
    vec![line.to_string()]
}

/// Strip every line (or whole block) keyed by a cultural-name key.
/// The builder recomputes these; stale data must not survive.
fn remove_cultural_lines(lines: Vec<String>, keys: &CulturalKeys) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut skipping = 0_usize;
    for line in lines {
        if skipping > 0 {
            skipping += line.matches('{').count();
            skipping = skipping.saturating_sub(line.matches('}').count());
            continue;
        }
        let body = line.trim_start();
        if let Some((key, value)) = body.split_once(" = ") {
            if !key.contains(' ') && keys.matches(key) {
                if value.ends_with('{') {
                    skipping = 1;
                }
                continue;
            }
        }
        out.push(line);
    }
    out
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> CulturalKeys {
        CulturalKeys::for_tests(&["cultural_names", "roman", "greek"], &["name_list_"])
    }

    #[test]
    fn whitespace_and_comments_are_normalised() {
        let input = "e_rome={   # the empire\n\n\tcolor ={ 200 80 20 }   \n}\n";
        let expected = "e_rome = {\n    color = { 200 80 20 }\n}\n";
        assert_eq!(normalise_text(input, &keys()), expected);
    }

    #[test]
    fn normalisation_is_idempotent() {
        let input = "e_rome\t=  {  # x\n  c_roma={roman=\"Roma\"}\n\n   \n}\n";
        let once = normalise_text(input, &keys());
        let twice = normalise_text(&once, &keys());
        assert_eq!(once, twice);
    }

    #[test]
    fn inline_cultural_assignment_is_expanded_then_stripped() {
        // The inline name is stale generated data: the expansion puts it
        // on its own line and the removal pass deletes it, leaving an
        // empty block open for fresh injection.
        let input = "c_roma = { roman = \"Roma\" }\n";
        let expected = "c_roma = {\n}\n";
        assert_eq!(normalise_text(input, &keys()), expected);
    }

    #[test]
    fn unspaced_inline_cultural_assignment_is_expanded_then_stripped() {
        // Hand-edited files often pack the braces tight; the stale name
        // must still be recognised and removed.
        let input = "c_roma={roman=\"Roma\"}\n";
        let expected = "c_roma = {\n}\n";
        assert_eq!(normalise_text(input, &keys()), expected);
    }

    #[test]
    fn inline_non_cultural_assignment_is_left_alone() {
        let input = "c_roma = { capital = \"333\" }\n";
        assert_eq!(normalise_text(input, &keys()), input);
    }

    #[test]
    fn stale_cultural_lines_are_removed() {
        let input = "c_roma = {\n    roman = \"Roma\"\n    greek = \"Rhome\"\n    capital = 333\n}\n";
        let expected = "c_roma = {\n    capital = 333\n}\n";
        assert_eq!(normalise_text(input, &keys()), expected);
    }

    #[test]
    fn stale_cultural_blocks_are_removed_whole() {
        let input = "c_roma = {\n    cultural_names = {\n        name_list_roman = cn_roma_roman\n    }\n    capital = 333\n}\n";
        let expected = "c_roma = {\n    capital = 333\n}\n";
        assert_eq!(normalise_text(input, &keys()), expected);
    }

    #[test]
    fn empty_single_line_blocks_are_split() {
        let input = "b_wigmore = { }\n";
        assert_eq!(normalise_text(input, &keys()), "b_wigmore = {\n}\n");
        // The same block with the braces packed tight.
        assert_eq!(normalise_text("b_wigmore={}\n", &keys()), "b_wigmore = {\n}\n");
    }

    #[test]
    fn equals_inside_quoted_values_is_preserved() {
        let input = "motto = \"senatus=populusque\"\n";
        assert_eq!(normalise_text(input, &keys()), input);
        assert_eq!(normalise_text("motto=\"a=b\"\n", &keys()), "motto = \"a=b\"\n");
    }

    #[test]
    fn input_with_no_content_normalises_to_nothing() {
        assert_eq!(normalise_text("", &keys()), "");
        assert_eq!(normalise_text("   \n# only a comment\n\n", &keys()), "");
    }

    #[test]
    fn comment_only_and_blank_lines_vanish() {
        let input = "# header comment\n\n   \ne_rome = {\n}\n";
        assert_eq!(normalise_text(input, &keys()), "e_rome = {\n}\n");
    }
}
