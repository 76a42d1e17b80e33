//! Scale command
//!
//! Rescales a raw f32 image with one filter and one border policy on all
//! edges. Rows are processed in parallel.

use crate::ScaleArgs;
use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use vfx_resample::launch::rescale;
use vfx_resample::{
    Access, Backend, BorderPolicy, BufferView, DataType, Edges, Region, VariantId, VariantTable,
};

pub fn run(args: ScaleArgs, verbose: u8) -> Result<()> {
    if args.to_width == 0 || args.to_height == 0 {
        bail!("Output size must be positive, got {}x{}", args.to_width, args.to_height);
    }

    let data = super::load_raw(&args.input, args.width, args.height)?;

    if verbose > 0 {
        println!(
            "Scaling {}x{} -> {}x{} ({}, {})",
            args.width, args.height, args.to_width, args.to_height, args.filter, args.policy
        );
    }

    let scaled = scale(&data, &args)?;
    super::save_raw(&args.output, &scaled)?;

    info!(output = %args.output.display(), "scaled image written");
    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

/// Resamples `data` to the requested output size.
fn scale(data: &[f32], args: &ScaleArgs) -> Result<Vec<f32>> {
    if args.policy == BorderPolicy::None {
        // Unbordered taps would leave the image at every edge
        bail!("Scaling needs a border policy: clamp, repeat, mirror or const");
    }

    let id = VariantId::new(args.filter, args.policy, Edges::All, DataType::F32, Backend::Buffer);
    let table = VariantTable::generate(
        &[args.filter],
        &[args.policy],
        &[DataType::F32],
        &[Backend::Buffer],
    );
    let variant = table
        .get(&id)
        .with_context(|| format!("Variant {} was not generated", id))?;
    debug!(variant = %id, "selected variant");

    let view = BufferView::packed(data, args.width, args.height)?;
    let region = Region::full(args.width, args.height)?;
    let access = if id.has_fallback() {
        Access::with_fallback(&view, region, args.fallback.unwrap_or(0.0))?
    } else {
        Access::new(&view, region)?
    };
    let bound = variant.bind(access)?;

    Ok(rescale(&bound, args.to_width, args.to_height))
}
