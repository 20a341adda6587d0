//! Blockmap - Entry Point
//!
//! Command-line front end: list and describe render modes, write a default
//! config, and render a demo world into map tiles.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use blockmap::config::RenderConfig;
use blockmap::render::{render_world, BlockTextures};
use blockmap::rendermode;
use blockmap::world::generate_world;

/// Blockmap - top-down map tiles for block worlds
#[derive(Parser)]
#[command(name = "blockmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available render modes
    Modes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the description of one render mode
    Info {
        /// Render mode name
        name: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the demo world and render it in every configured mode
    Render {
        /// Config file (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Render mode, may be repeated; replaces the configured list
        #[arg(short, long = "mode")]
        modes: Vec<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// World seed
        #[arg(long)]
        seed: Option<u32>,

        /// Worker threads
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Write the default config file
    InitConfig {
        /// Where to write it (defaults to the user config directory)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    log::debug!("Starting Blockmap v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Modes { json } => list_modes(json),
        Commands::Info { name, json } => show_mode(&name, json),
        Commands::Render {
            config,
            modes,
            output,
            seed,
            workers,
        } => {
            let config = build_config(config, modes, output, seed, workers)?;
            render(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(RenderConfig::default_path);
            RenderConfig::default()
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list_modes(json: bool) -> Result<ExitCode> {
    let modes: Vec<_> = rendermode::descriptors().iter().map(|m| m.info()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&modes)?);
    } else {
        let width = modes.iter().map(|m| m.name.len()).max().unwrap_or(0);
        for mode in &modes {
            println!("{:<width$}  {}", mode.name, mode.description, width = width);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn show_mode(name: &str, json: bool) -> Result<ExitCode> {
    let Some(info) = rendermode::describe(name) else {
        eprintln!("no such render mode: {}", name);
        eprintln!("available: {}", rendermode::list_names().join(", "));
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}: {}", info.name, info.description);
    }
    Ok(ExitCode::SUCCESS)
}

fn build_config(
    path: Option<PathBuf>,
    modes: Vec<String>,
    output: Option<PathBuf>,
    seed: Option<u32>,
    workers: Option<usize>,
) -> Result<RenderConfig> {
    let mut config = match path {
        Some(path) => RenderConfig::load(&path).with_context(|| format!("loading {}", path.display()))?,
        None => RenderConfig::load_or_default(&RenderConfig::default_path()),
    };

    if !modes.is_empty() {
        config.rendermodes = modes;
    }
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(seed) = seed {
        config.world.seed = seed;
    }
    if let Some(workers) = workers {
        config.workers = workers;
    }

    config.validate().context("invalid render configuration")?;
    Ok(config)
}

fn render(config: &RenderConfig) -> Result<()> {
    let chunks = generate_world(&config.world);
    let textures = BlockTextures::load(config.texture_sheet.as_deref(), config.block_px);

    let summary = render_world(&config.batch_options(), &chunks, &textures).context("rendering failed")?;

    for name in &config.rendermodes {
        let tiles: Vec<_> = summary.tiles_for(name).collect();
        let marked: usize = tiles.iter().map(|t| t.marked).sum();
        if marked > 0 {
            println!("{:<10} {} tiles, {} marked blocks", name, tiles.len(), marked);
        } else {
            println!("{:<10} {} tiles", name, tiles.len());
        }
    }
    println!("Wrote {} tiles to {}", summary.tile_count(), config.output_dir.display());
    Ok(())
}
