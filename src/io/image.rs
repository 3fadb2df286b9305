//! Tile images and PNG export of grid snapshots

use std::path::Path;

use image::{Rgba, RgbaImage, imageops};

use crate::io::configuration::CONTRADICTION_COLOR;
use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use crate::io::snapshot::{CellSnapshot, GridSnapshot};
use crate::spatial::tiles::{TileCatalog, VariantId};

/// One square image per catalog variant, all the same size
#[derive(Debug, Clone)]
pub struct TileImages {
    images: Vec<RgbaImage>,
    tile_size: u32,
}

impl TileImages {
    /// Load `<base>.png` from `dir` for every base tile
    ///
    /// Each variant gets its base image rotated clockwise by the variant's
    /// angle, so the pixels on a side match the rotated edge label.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An image is missing or cannot be decoded
    /// - An image is not square or differs in size from the others
    pub fn load(dir: &Path, catalog: &TileCatalog) -> Result<Self> {
        let mut tile_size = None;
        let mut bases = Vec::with_capacity(catalog.base_names().len());

        for base in catalog.base_names() {
            let path = dir.join(format!("{base}.png"));
            let image = image::open(&path)
                .map_err(|e| AlgorithmError::TileImageLoad {
                    path: path.clone(),
                    source: e,
                })?
                .to_rgba8();

            if image.width() != image.height() {
                return Err(invalid_parameter(
                    "tile image",
                    &path.display(),
                    &format!("must be square, got {}x{}", image.width(), image.height()),
                ));
            }
            let expected = *tile_size.get_or_insert(image.width());
            if image.width() != expected {
                return Err(invalid_parameter(
                    "tile image",
                    &path.display(),
                    &format!("is {0}x{0}, expected {expected}x{expected}", image.width()),
                ));
            }

            bases.push((base.as_str(), image));
        }

        Self::from_bases(catalog, &bases, tile_size.unwrap_or(0))
    }

    /// Generate a flat colour tile per base, with a dark band marking its
    /// unrotated top edge so rotations stay distinguishable
    pub fn palette(catalog: &TileCatalog, pixels: u32) -> Self {
        let pixels = pixels.max(1);
        let base_count = catalog.base_names().len().max(1);
        let band = (pixels / 4).max(1);

        let images = catalog
            .variants()
            .iter()
            .map(|variant| {
                let index = catalog
                    .base_names()
                    .iter()
                    .position(|base| *base == variant.base)
                    .unwrap_or(0);
                let color = hue_color(index as f64 / base_count as f64);
                let shade = Rgba([color[0] / 2, color[1] / 2, color[2] / 2, 255]);
                let base = RgbaImage::from_fn(pixels, pixels, |_, y| {
                    if y < band { shade } else { Rgba(color) }
                });
                rotate_clockwise(&base, variant.quarter_turns())
            })
            .collect();

        Self {
            images,
            tile_size: pixels,
        }
    }

    fn from_bases(
        catalog: &TileCatalog,
        bases: &[(&str, RgbaImage)],
        tile_size: u32,
    ) -> Result<Self> {
        let images = catalog
            .variants()
            .iter()
            .map(|variant| {
                let (_, base) = bases
                    .iter()
                    .find(|(name, _)| *name == variant.base)
                    .ok_or_else(|| AlgorithmError::UnknownTile {
                        name: variant.base.clone(),
                    })?;
                Ok(rotate_clockwise(base, variant.quarter_turns()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { images, tile_size })
    }

    /// Side length of every tile in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Image for a variant
    pub fn get(&self, variant: VariantId) -> Option<&RgbaImage> {
        self.images.get(variant)
    }

    /// Number of variant images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no images are held
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn rotate_clockwise(image: &RgbaImage, quarter_turns: usize) -> RgbaImage {
    match quarter_turns % 4 {
        1 => imageops::rotate90(image),
        2 => imageops::rotate180(image),
        3 => imageops::rotate270(image),
        _ => image.clone(),
    }
}

// Fully saturated colour for a hue in [0, 1)
fn hue_color(hue: f64) -> [u8; 4] {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let channel = |v: f64| (v * 255.0).round() as u8;
    [channel(r), channel(g), channel(b), 255]
}

/// Draw a snapshot, one tile per cell
///
/// Collapsed cells show their tile, undetermined cells the per-pixel mean of
/// their remaining candidates, and contradictory cells a flat
/// `CONTRADICTION_COLOR`.
///
/// # Errors
///
/// Returns an error if a cell names a variant with no image
pub fn render_snapshot(snapshot: &GridSnapshot, images: &TileImages) -> Result<RgbaImage> {
    let size = images.tile_size();
    let mut canvas = RgbaImage::new(
        snapshot.width() as u32 * size,
        snapshot.height() as u32 * size,
    );

    for (row, cells) in snapshot.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let tile = match cell {
                CellSnapshot::Collapsed(variant) => variant_image(images, *variant)?.clone(),
                CellSnapshot::Undetermined(candidates) => mean_image(images, candidates)?,
                CellSnapshot::Contradiction => {
                    RgbaImage::from_pixel(size, size, Rgba(CONTRADICTION_COLOR))
                }
            };
            imageops::replace(
                &mut canvas,
                &tile,
                i64::from(col as u32 * size),
                i64::from(row as u32 * size),
            );
        }
    }

    Ok(canvas)
}

fn variant_image(images: &TileImages, variant: VariantId) -> Result<&RgbaImage> {
    images.get(variant).ok_or_else(|| AlgorithmError::UnknownTile {
        name: format!("#{variant}"),
    })
}

fn mean_image(images: &TileImages, candidates: &[VariantId]) -> Result<RgbaImage> {
    let size = images.tile_size();
    let mut sums = vec![[0u32; 4]; (size * size) as usize];

    for &variant in candidates {
        let image = variant_image(images, variant)?;
        for (sum, pixel) in sums.iter_mut().zip(image.pixels()) {
            for (channel, value) in sum.iter_mut().zip(pixel.0) {
                *channel += u32::from(value);
            }
        }
    }

    let count = candidates.len().max(1) as u32;
    let raw: Vec<u8> = sums
        .iter()
        .flat_map(|sum| sum.iter().map(move |channel| (channel / count) as u8))
        .collect();
    RgbaImage::from_raw(size, size, raw).ok_or_else(|| {
        invalid_parameter("tile size", &size, &"does not match the candidate images")
    })
}

/// Render a snapshot and save it as a PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - A cell names a variant with no image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_snapshot_as_png(
    snapshot: &GridSnapshot,
    images: &TileImages,
    output_path: &Path,
) -> Result<()> {
    let canvas = render_snapshot(snapshot, images)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    canvas
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(path = %output_path.display(), "exported grid image");
    Ok(())
}
