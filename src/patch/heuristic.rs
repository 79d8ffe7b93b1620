//! Recognising genuine declaration lines.
//!
//! The file format has no lexical marker distinguishing "this line
//! opens an authoritative declaration" from "this identifier is merely
//! referenced inside some conditional block". The window filter below
//! approximates that distinction at line granularity; the trait seam
//! exists so a scope-tracking parser could replace it without touching
//! the injection logic.

use std::fmt::Debug;

use crate::tables::GameTokens;

/// Decides whether a line that lexically looks like a declaration
/// really opens one, given its immediate neighbours.
pub trait DeclarationFilter: Debug + Sync {
    /// `previous` is the most recently emitted output line, `next` the
    /// next not-yet-emitted raw input line.
    fn is_genuine(&self, previous: Option<&str>, next: Option<&str>) -> bool;
}

/// The line-window heuristic: deny on context tokens in the previous
/// emitted line or scope-query tokens in the next raw line.
#[derive(Debug, Clone, Copy)]
pub struct WindowFilter {
    forbidden_prev: &'static [&'static str],
    forbidden_next: &'static [&'static str],
}

impl WindowFilter {
    pub fn new(tokens: &GameTokens) -> Self {
        WindowFilter {
            forbidden_prev: tokens.forbidden_prev,
            forbidden_next: tokens.forbidden_next,
        }
    }
}

impl DeclarationFilter for WindowFilter {
    fn is_genuine(&self, previous: Option<&str>, next: Option<&str>) -> bool {
        if let Some(previous) = previous {
            if self.forbidden_prev.iter().any(|token| previous.contains(token)) {
                return false;
            }
        }
        if let Some(next) = next {
            if self.forbidden_next.iter().any(|token| next.contains(token)) {
                return false;
            }
        }
        true
    }
}

/// A lexical declaration match on one line.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    /// Leading whitespace of the declaration line, in spaces.
    pub indent: usize,
    /// The full in-game id, tier prefix included, e.g. `e_rome`.
    pub id: &'a str,
}

/// Match `<indent><tier>_<ident> = {` with nothing after the brace.
pub fn match_declaration<'a>(line: &'a str, tiers: &[char]) -> Option<Declaration<'a>> {
    let trimmed = line.trim_start_matches(' ');
    let indent = line.len() - trimmed.len();
    let id = trimmed.strip_suffix(" = {")?;

    let mut chars = id.chars();
    let tier = chars.next()?;
    if !tiers.contains(&tier) || chars.next() != Some('_') {
        return None;
    }
    let tail = &id[2..];
    if tail.is_empty() || !tail.chars().all(is_id_char) {
        return None;
    }
    Some(Declaration { indent, id })
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '\''
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: &[char] = &['e', 'k', 'd', 'c', 'b'];

    #[test]
    fn declaration_lines_match() {
        let d = match_declaration("e_rome = {", TIERS).unwrap();
        assert_eq!(d.id, "e_rome");
        assert_eq!(d.indent, 0);

        let d = match_declaration("        c_roma = {", TIERS).unwrap();
        assert_eq!(d.id, "c_roma");
        assert_eq!(d.indent, 8);
    }

    #[test]
    fn non_declaration_lines_do_not_match() {
        // trailing content after the brace
        assert!(match_declaration("e_rome = { }", TIERS).is_none());
        // no tier prefix
        assert!(match_declaration("x_rome = {", TIERS).is_none());
        assert!(match_declaration("capital = {", TIERS).is_none());
        // assignment, not a block
        assert!(match_declaration("title = e_rome", TIERS).is_none());
        // bare prefix
        assert!(match_declaration("e_ = {", TIERS).is_none());
    }

    #[test]
    fn window_filter_denies_on_neighbours() {
        let tokens = crate::tables::game_tokens(crate::game::Game::Ck3).unwrap();
        let filter = WindowFilter::new(tokens);
        assert!(filter.is_genuine(Some("k_italy = {"), Some("    color = { 200 80 20 }")));
        assert!(!filter.is_genuine(Some("    limit = {"), Some("    color = { 200 80 20 }")));
        assert!(!filter.is_genuine(Some("k_italy = {"), Some("    holder = scope:new_holder")));
        assert!(filter.is_genuine(None, None));
    }
}
