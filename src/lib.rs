//! Builds cultural place-name localisations for Paradox grand strategy
//! game mods.
//!
//! The library has two halves. The resolution half loads a database of
//! locations and languages into an [`EntityStore`](store::EntityStore)
//! and resolves names over the entities' fallback chains
//! ([`resolve`](resolve::resolve), [`fetch_all`](fetch::fetch_all)).
//! The patching half ([`Patcher`](patch::Patcher)) rewrites a game's
//! nested declaration file, injecting the resolved names while leaving
//! every other line exactly as it found it.

pub mod charset;
pub mod entity;
pub mod fetch;
pub mod fileio;
pub mod game;
pub mod localisation;
pub mod patch;
pub mod resolve;
pub mod store;
pub mod tables;

#[cfg(test)]
pub(crate) mod testutil;
