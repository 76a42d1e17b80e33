//! CLI command implementations

pub mod sample;
pub mod scale;
pub mod variants;

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::debug;

/// Loads a raw f32 image and checks it holds `width * height` values.
pub fn load_raw(path: &Path, width: i32, height: i32) -> Result<Vec<f32>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    if bytes.len() % 4 != 0 {
        bail!(
            "{}: size {} is not a multiple of 4 bytes",
            path.display(),
            bytes.len()
        );
    }
    let data: Vec<f32> = bytemuck::pod_collect_to_vec(&bytes);

    let expected = width.max(0) as usize * height.max(0) as usize;
    if data.len() != expected {
        bail!(
            "{}: holds {} values, expected {}x{} = {}",
            path.display(),
            data.len(),
            width,
            height,
            expected
        );
    }
    debug!(path = %path.display(), width, height, "loaded raw image");
    Ok(data)
}

/// Saves a raw f32 image.
pub fn save_raw(path: &Path, data: &[f32]) -> Result<()> {
    std::fs::write(path, bytemuck::cast_slice::<f32, u8>(data))
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Synthetic ramp: pixel `(x, y)` holds `x + y * width`.
pub fn ramp(width: i32, height: i32) -> Vec<f32> {
    (0..height.max(0))
        .flat_map(|y| (0..width.max(0)).map(move |x| (x + y * width) as f32))
        .collect()
}
