//! Batch rendering
//!
//! Renders every chunk of a world in every configured mode and writes the
//! tiles to disk as `<output>/<mode>/tile_<cx>_<cz>.png`.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use parking_lot::Mutex;

use super::{render_tile, BlockTextures};
use crate::rendermode::{self, RenderModeDescriptor, RenderModeError};
use crate::world::Chunk;

/// Failures while rendering a world
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Mode(#[from] RenderModeError),
    #[error("failed to create {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write tile {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("a tile worker panicked")]
    WorkerPanicked,
}

/// Settings for one batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Mode names, in output order
    pub modes: Vec<String>,
    /// Root directory for tiles
    pub output_dir: PathBuf,
    /// Worker thread count; clamped to at least one
    pub workers: usize,
}

/// One written tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSummary {
    pub mode: &'static str,
    pub cx: i32,
    pub cz: i32,
    pub path: PathBuf,
    pub blocks_drawn: usize,
    pub marked: usize,
}

/// Result of a batch run
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    /// Tiles in job order: mode by mode, chunk by chunk
    pub tiles: Vec<TileSummary>,
}

impl RenderSummary {
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn blocks_drawn(&self) -> usize {
        self.tiles.iter().map(|t| t.blocks_drawn).sum()
    }

    /// Tiles written for one mode
    pub fn tiles_for<'s>(&'s self, mode: &'s str) -> impl Iterator<Item = &'s TileSummary> + 's {
        self.tiles.iter().filter(move |t| t.mode == mode)
    }
}

/// Path of a tile inside the output directory
pub fn tile_path(output_dir: &Path, mode: &str, cx: i32, cz: i32) -> PathBuf {
    output_dir.join(mode).join(format!("tile_{}_{}.png", cx, cz))
}

struct Job<'w> {
    index: usize,
    mode: &'static RenderModeDescriptor,
    chunk: &'w Chunk,
}

/// Render `chunks` in every mode of `options`.
///
/// All mode names are resolved before any directory is created or tile
/// drawn, so a typo fails the whole run up front.
pub fn render_world(
    options: &BatchOptions,
    chunks: &[Chunk],
    textures: &BlockTextures,
) -> Result<RenderSummary, RenderError> {
    let modes = options
        .modes
        .iter()
        .map(|name| rendermode::resolve(name))
        .collect::<Result<Vec<_>, _>>()?;

    for mode in &modes {
        let dir = options.output_dir.join(mode.name);
        fs::create_dir_all(&dir).map_err(|source| RenderError::Io { path: dir, source })?;
    }

    let started = Instant::now();
    let queue: VecDeque<Job<'_>> = modes
        .iter()
        .flat_map(|&mode| chunks.iter().map(move |chunk| (mode, chunk)))
        .enumerate()
        .map(|(index, (mode, chunk))| Job { index, mode, chunk })
        .collect();
    let job_count = queue.len();
    let queue = Mutex::new(queue);
    let results = Mutex::new(Vec::with_capacity(job_count));
    let workers = options.workers.clamp(1, job_count.max(1));

    log::info!(
        "Rendering {} tiles ({} modes x {} chunks) on {} workers",
        job_count,
        modes.len(),
        chunks.len(),
        workers
    );

    let (queue_ref, results_ref) = (&queue, &results);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| s.spawn(move || run_worker(queue_ref, results_ref, &options.output_dir, textures)))
            .collect();

        let mut outcome = Ok(());
        for handle in handles {
            let worker = handle.join().unwrap_or(Err(RenderError::WorkerPanicked));
            if outcome.is_ok() {
                outcome = worker;
            }
        }
        outcome
    })?;

    let mut tiles = results.into_inner();
    tiles.sort_by_key(|(index, _)| *index);
    let summary = RenderSummary {
        tiles: tiles.into_iter().map(|(_, tile)| tile).collect(),
    };

    log::info!(
        "Rendered {} tiles ({} blocks) into {} in {:.2?}",
        summary.tile_count(),
        summary.blocks_drawn(),
        options.output_dir.display(),
        started.elapsed()
    );
    Ok(summary)
}

/// Pull jobs until the queue is empty or a tile fails to save. A failed
/// worker drains the queue so the others stop too.
fn run_worker(
    queue: &Mutex<VecDeque<Job<'_>>>,
    results: &Mutex<Vec<(usize, TileSummary)>>,
    output_dir: &Path,
    textures: &BlockTextures,
) -> Result<(), RenderError> {
    loop {
        let Some(job) = queue.lock().pop_front() else {
            return Ok(());
        };

        let tile = render_tile(job.mode, job.chunk, textures);
        let path = tile_path(output_dir, job.mode.name, job.chunk.cx, job.chunk.cz);
        if let Err(source) = tile.buffer.save(&path) {
            queue.lock().clear();
            return Err(RenderError::Image { path, source });
        }

        results.lock().push((
            job.index,
            TileSummary {
                mode: job.mode.name,
                cx: job.chunk.cx,
                cz: job.chunk.cz,
                path,
                blocks_drawn: tile.blocks_drawn,
                marked: tile.marked,
            },
        ));
    }
}
