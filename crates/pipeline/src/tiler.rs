//! Tiling of a single orthomosaic file

use std::path::{Path, PathBuf};
use tracing::info;
use verdant_algorithms::tiling::{tiles, TilerParams};
use verdant_core::io::{read_rgb, write_rgb};
use verdant_core::{Result, RgbRaster};

/// Outcome of tiling one source image
#[derive(Debug, Clone)]
pub struct TilingSummary {
    pub image_width: usize,
    pub image_height: usize,
    /// Tile files in index order
    pub written: Vec<PathBuf>,
}

impl TilingSummary {
    /// Number of tiles written
    pub fn total(&self) -> usize {
        self.written.len()
    }
}

/// Decode `input` and write its tiles into `output_dir`.
///
/// A source that cannot be decoded is an error; nothing is written in
/// that case.
pub fn tile_raster<P, Q>(input: P, output_dir: Q, params: TilerParams) -> Result<TilingSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    params.validate()?;
    let image = read_rgb(input)?;
    info!("Input: {} x {}", image.width(), image.height());
    tile_image(&image, output_dir, params)
}

/// Write the tiles of an already decoded image into `output_dir`.
///
/// Each tile is written as soon as it is extracted, as
/// `frame_NNNN.png`. The directory is created if needed.
pub fn tile_image<Q: AsRef<Path>>(
    image: &RgbRaster,
    output_dir: Q,
    params: TilerParams,
) -> Result<TilingSummary> {
    let output_dir = output_dir.as_ref();
    let grid = tiles(image, params)?;
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for tile in grid {
        let tile = tile?;
        let path = output_dir.join(tile.filename());
        write_rgb(&tile.image, &path)?;
        info!("Frame {:04} saved as {}", tile.index(), path.display());
        written.push(path);
    }

    info!("Total tiles saved: {}", written.len());
    Ok(TilingSummary {
        image_width: image.width(),
        image_height: image.height(),
        written,
    })
}
