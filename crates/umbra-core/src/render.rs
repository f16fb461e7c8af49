//! Per-pixel entry points and the data-parallel frame renderer
//!
//! Every pixel is an independent invocation of [`shade_pixel`] reading the
//! same immutable [`FrameParameters`]. Rows are distributed with Rayon.

use crate::march::{HitResult, Ray, march};
use crate::params::FrameParameters;
use crate::shading::{composite, shade};
use crate::{Error, Result};
use glam::{Vec3, Vec4};
use image::{ImageBuffer, Rgba, Rgba32FImage};
use rayon::prelude::*;

/// Hit/miss counts for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub hits: usize,
    pub misses: usize,
}

impl FrameStats {
    pub fn pixel_count(&self) -> usize {
        self.hits + self.misses
    }
}

/// A composited frame and its statistics
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub image: Rgba32FImage,
    pub stats: FrameStats,
}

/// March the ray through normalized screen coordinate `(u, v)`.
///
/// `u` runs left to right, `v` bottom to top.
pub fn trace_pixel(u: f32, v: f32, params: &FrameParameters) -> HitResult {
    let ray = Ray::from_screen(u, v, &params.frustum, &params.camera_to_world);
    march(&params.settings.sdf, &ray, &params.settings.march)
}

/// Final color of one pixel given the background color already there.
pub fn shade_pixel(u: f32, v: f32, background: Vec4, params: &FrameParameters) -> Vec4 {
    resolve(trace_pixel(u, v, params), background, params)
}

fn resolve(hit: HitResult, background: Vec4, params: &FrameParameters) -> Vec4 {
    let settings = &params.settings;
    match hit {
        HitResult::Hit {
            distance, position, ..
        } => {
            let shaded = shade(&settings.sdf, position, settings);
            composite(shaded, background, distance, &settings.march)
        }
        HitResult::Miss { .. } => background,
    }
}

/// Normalized screen coordinate of the center of pixel `(x, y)`; row 0 is the top.
pub fn pixel_uv(x: u32, y: u32, width: u32, height: u32) -> (f32, f32) {
    let u = (x as f32 + 0.5) / width as f32;
    let v = 1.0 - (y as f32 + 0.5) / height as f32;
    (u, v)
}

/// Render a `width` x `height` frame composited over `background`.
///
/// The background must already have the output resolution.
pub fn render_frame(
    params: &FrameParameters,
    width: u32,
    height: u32,
    background: &Rgba32FImage,
) -> Result<RenderedFrame> {
    if background.dimensions() != (width, height) {
        return Err(Error::DimensionMismatch {
            expected: (width, height),
            actual: background.dimensions(),
        });
    }

    let mut image = background.clone();
    let row_len = width as usize * 4;
    if row_len == 0 || height == 0 {
        return Ok(RenderedFrame {
            image,
            stats: FrameStats::default(),
        });
    }

    let buffer: &mut [f32] = &mut image;
    let hits: usize = buffer
        .par_chunks_mut(row_len)
        .enumerate()
        .map(|(y, row)| {
            let mut row_hits = 0;
            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let (u, v) = pixel_uv(x as u32, y as u32, width, height);
                let hit = trace_pixel(u, v, params);
                if hit.is_hit() {
                    row_hits += 1;
                }
                let background = Vec4::from_slice(pixel);
                resolve(hit, background, params).write_to_slice(pixel);
            }
            row_hits
        })
        .sum();

    let stats = FrameStats {
        hits,
        misses: (width as usize * height as usize) - hits,
    };
    tracing::info!("Rendered {}x{} frame", width, height);
    tracing::debug!("Frame stats: {} hits, {} misses", stats.hits, stats.misses);

    Ok(RenderedFrame { image, stats })
}

/// Vertical sky gradient from `zenith` (top row) to `horizon` (bottom row), fully opaque.
pub fn gradient_background(width: u32, height: u32, zenith: Vec3, horizon: Vec3) -> Rgba32FImage {
    let span = height.saturating_sub(1).max(1) as f32;
    ImageBuffer::from_fn(width, height, |_, y| {
        let c = zenith.lerp(horizon, y as f32 / span);
        Rgba([c.x, c.y, c.z, 1.0])
    })
}
