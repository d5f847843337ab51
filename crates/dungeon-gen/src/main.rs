//! Dungeon generator command line
//!
//! Reads a room template catalog, runs one generation and writes the dungeon
//! as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{info, warn};
use strum::IntoEnumIterator;
use thiserror::Error;

use dg_core::catalog::{self, CatalogError};
use dg_core::config::ParamsError;
use dg_core::dungeon::{ROOM_QUOTAS, RoomTemplate, RoomType};
use dg_core::{Dungeon, DungeonArgs, DungeonParams, GenerateError};

/// Template-driven dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(author, version, about = "Generate dungeons from room templates", long_about = None)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one dungeon
    Generate {
        /// Room template catalog (JSON array)
        #[arg(short = 'r', long = "rooms")]
        rooms: PathBuf,

        /// Generation parameters (JSON, camelCase keys)
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,

        #[command(flatten)]
        flags: ParamFlags,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long = "pretty")]
        pretty: bool,
    },

    /// Validate a catalog and summarize it
    Validate {
        /// Room template catalog (JSON array)
        #[arg(short = 'r', long = "rooms")]
        rooms: PathBuf,
    },
}

/// Parameter overrides; each one wins over the config file
#[derive(clap::Args, Debug, Default)]
struct ParamFlags {
    /// Map width in cells
    #[arg(long = "width")]
    width: Option<i32>,

    /// Map height in cells
    #[arg(long = "height")]
    height: Option<i32>,

    /// Solid margin around the map
    #[arg(long = "gutter")]
    gutter: Option<i32>,

    /// Partition depth
    #[arg(long = "iterations")]
    iterations: Option<u32>,

    /// Attempts per container split
    #[arg(long = "retries")]
    retries: Option<u32>,

    /// Minimum child aspect ratio
    #[arg(long = "min-ratio")]
    min_ratio: Option<f64>,

    /// Containers not larger than twice this are not split
    #[arg(long = "min-size")]
    min_size: Option<i32>,

    /// Corridor thickness
    #[arg(long = "corridor-width")]
    corridor_width: Option<i32>,

    /// Seed text
    #[arg(short = 's', long = "seed")]
    seed: Option<String>,
}

impl ParamFlags {
    fn apply(&self, params: &mut DungeonParams) {
        if let Some(width) = self.width {
            params.map_width = width;
        }
        if let Some(height) = self.height {
            params.map_height = height;
        }
        if let Some(gutter) = self.gutter {
            params.map_gutter_width = gutter;
        }
        if let Some(iterations) = self.iterations {
            params.iterations = iterations;
        }
        if let Some(retries) = self.retries {
            params.container_split_retries = retries;
        }
        if let Some(ratio) = self.min_ratio {
            params.container_minimum_ratio = ratio;
        }
        if let Some(size) = self.min_size {
            params.container_minimum_size = size;
        }
        if let Some(width) = self.corridor_width {
            params.corridor_width = width;
        }
        if let Some(seed) = &self.seed {
            params.seed = Some(seed.clone());
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },

    #[error("{}: {source}", path.display())]
    Params { path: PathBuf, source: ParamsError },

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();

    let result = match &cli.command {
        Command::Generate {
            rooms,
            config,
            flags,
            output,
            pretty,
        } => run_generate(rooms, config.as_deref(), flags, output.as_deref(), *pretty),
        Command::Validate { rooms } => run_validate(rooms),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dungeon-gen: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the config file, then the flags
fn resolve_params(config: Option<&Path>, flags: &ParamFlags) -> Result<DungeonParams, CliError> {
    let mut params = match config {
        Some(path) => DungeonParams::load_from_file(path).map_err(|source| CliError::Params {
            path: path.to_path_buf(),
            source,
        })?,
        None => DungeonParams::default(),
    };
    flags.apply(&mut params);
    Ok(params)
}

fn load_valid_catalog(path: &Path) -> Result<Vec<RoomTemplate>, CliError> {
    let wrap = |source| CliError::Catalog {
        path: path.to_path_buf(),
        source,
    };
    let templates = catalog::load_catalog(path).map_err(wrap)?;
    catalog::validate_catalog(&templates).map_err(wrap)?;
    Ok(templates)
}

fn run_generate(
    rooms: &Path,
    config: Option<&Path>,
    flags: &ParamFlags,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), CliError> {
    let templates = load_valid_catalog(rooms)?;
    let params = resolve_params(config, flags)?;
    info!(
        "Generating {}x{} dungeon from {} templates",
        params.map_width,
        params.map_height,
        templates.len()
    );

    let dungeon = dg_core::generate(&DungeonArgs::new(templates, params))?;

    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_dungeon(writer, &dungeon, pretty)?;
            info!("Wrote {}", path.display());
        }
        None => write_dungeon(io::stdout().lock(), &dungeon, pretty)?,
    }
    Ok(())
}

fn write_dungeon(mut writer: impl Write, dungeon: &Dungeon, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, dungeon)?;
    } else {
        serde_json::to_writer(&mut writer, dungeon)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn run_validate(rooms: &Path) -> Result<(), CliError> {
    let templates = load_valid_catalog(rooms)?;
    let counts = catalog::count_by_type(&templates);

    println!("{}: {} templates", rooms.display(), templates.len());
    for room_type in RoomType::iter() {
        println!("  {:<10} {}", room_type, counts.get(&room_type).copied().unwrap_or(0));
    }

    for (room_type, _) in ROOM_QUOTAS {
        if !counts.contains_key(&room_type) {
            warn!("No \"{room_type}\" templates; generation will fail");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let path = std::env::temp_dir().join("dungeon_gen_test_params.json");
        std::fs::write(&path, r#"{"mapWidth": 40, "mapHeight": 30, "iterations": 2}"#).unwrap();

        let flags = ParamFlags {
            height: Some(24),
            seed: Some("abc".to_string()),
            ..ParamFlags::default()
        };
        let params = resolve_params(Some(&path), &flags).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(params.map_width, 40);
        assert_eq!(params.map_height, 24);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.corridor_width, 2);
        assert_eq!(params.seed.as_deref(), Some("abc"));
    }

    #[test]
    fn test_defaults_without_config() {
        let params = resolve_params(None, &ParamFlags::default()).unwrap();
        assert_eq!(params, DungeonParams::default());
    }

    #[test]
    fn test_missing_config_names_the_file() {
        let err = resolve_params(Some(Path::new("/nonexistent/params.json")), &ParamFlags::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("/nonexistent/params.json"));
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "dungeon-gen",
            "-v",
            "generate",
            "--rooms",
            "rooms.json",
            "--width",
            "64",
            "--min-ratio",
            "0.5",
            "--pretty",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Generate { rooms, flags, pretty, .. } => {
                assert_eq!(rooms, PathBuf::from("rooms.json"));
                assert_eq!(flags.width, Some(64));
                assert_eq!(flags.min_ratio, Some(0.5));
                assert!(pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
