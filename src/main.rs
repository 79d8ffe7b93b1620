use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Deserialize;
use strum::IntoEnumIterator;

use pdx_cultural_names::entity::{Language, Location};
use pdx_cultural_names::fetch::fetch_all;
use pdx_cultural_names::game::Game;
use pdx_cultural_names::patch::Patcher;
use pdx_cultural_names::store::EntityStore;

#[derive(Parser)]
#[command(name = "pdx-cultural-names", version, about)]
struct Cli {
    /// Path to the entity store file (JSON with locations and languages).
    #[arg(long, global = true, default_value = "store.json")]
    store: PathBuf,
    /// Target game, e.g. ck2, ck3, hoi4.
    #[arg(long, global = true, default_value = "ck3")]
    game: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Patch declaration files, injecting resolved cultural names.
    Patch {
        /// Files to patch.
        files: Vec<PathBuf>,
        /// Write patched files here instead of patching in place.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the resolved localisation set for one in-game location id.
    Dump {
        location_id: String,
        /// Identifier namespace within the game, e.g. State or City.
        #[arg(long)]
        kind: Option<String>,
    },
}

#[derive(Deserialize)]
struct StoreFile {
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    languages: Vec<Language>,
}

fn load_store(path: &Path) -> Result<EntityStore> {
    let content =
        read_to_string(path).with_context(|| format!("cannot read store {}", path.display()))?;
    let file: StoreFile =
        serde_json::from_str(&content).with_context(|| format!("bad store {}", path.display()))?;
    let store = EntityStore::load(file.locations, file.languages)
        .with_context(|| format!("invalid entity data in {}", path.display()))?;
    Ok(store)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // An unsupported game is a configuration error; fail before any work.
    let game = Game::from_str(&args.game).map_err(|_| {
        let known: Vec<String> = Game::iter().map(|g| g.to_string()).collect();
        anyhow!("unsupported target game `{}` (known games: {})", args.game, known.join(", "))
    })?;

    let store = load_store(&args.store)?;

    match args.command {
        Command::Patch { files, out_dir } => {
            if files.is_empty() {
                bail!("no files to patch");
            }
            let patcher = Patcher::new(&store, game)?;
            files
                .par_iter()
                .map(|file| {
                    let output = match &out_dir {
                        Some(dir) => {
                            let name = file
                                .file_name()
                                .ok_or_else(|| anyhow!("{} has no filename", file.display()))?;
                            dir.join(name)
                        }
                        None => file.clone(),
                    };
                    patcher.patch_file(file, &output)?;
                    eprintln!("patched {}", output.display());
                    Ok(())
                })
                .collect::<Result<Vec<()>>>()?;
        }
        Command::Dump { location_id, kind } => {
            let mut found = fetch_all(&store, &location_id, kind.as_deref(), game);
            found.sort_by(|a, b| a.language_game_id.cmp(&b.language_game_id));
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }

    Ok(())
}
