//! Sample command
//!
//! Evaluates one variant at one region-relative coordinate, either on a raw
//! input image or on a synthetic ramp.

use crate::SampleArgs;
use anyhow::{Context, Result, bail};
use std::fmt::Display;
use tracing::{debug, trace};
use half::f16;
use vfx_resample::{
    Access, Backend, BufferView, DataType, PixelSource, Region, Sample, TextureView, Variant,
    VariantTable,
};

pub fn run(args: SampleArgs, verbose: u8) -> Result<()> {
    let value = evaluate(&args)?;
    if verbose > 0 {
        println!("{} at ({}, {}) = {}", args.variant, args.x, args.y, value);
    } else {
        println!("{}", value);
    }
    Ok(())
}

/// Samples the requested variant and formats the result.
fn evaluate(args: &SampleArgs) -> Result<String> {
    let table = VariantTable::full();
    let variant = table.lookup(&args.variant)?;

    let data = match &args.input {
        Some(path) => super::load_raw(path, args.width, args.height)?,
        None => {
            debug!(width = args.width, height = args.height, "sampling synthetic ramp");
            super::ramp(args.width, args.height)
        }
    };

    match variant.id().dtype() {
        DataType::F32 => typed(variant, &data, args, |v| v),
        DataType::F64 => typed(variant, &data, args, |v| v as f64),
        DataType::F16 => typed(variant, &data, args, f16::from_f32),
        other => bail!(
            "{} pixels need multi-channel input; raw images hold one f32 per pixel",
            other
        ),
    }
}

fn typed<T: Sample + Display>(
    variant: &Variant,
    data: &[f32],
    args: &SampleArgs,
    convert: fn(f32) -> T,
) -> Result<String> {
    let values: Vec<T> = data.iter().map(|&v| convert(v)).collect();
    let fallback = args.fallback.map(convert);
    let region = Region::full(args.width, args.height)?;

    let value = match variant.id().backend() {
        Backend::Buffer => {
            let view = BufferView::packed(&values, args.width, args.height)?;
            eval(variant, &view, region, args, fallback)?
        }
        Backend::Texture => {
            let texels: Vec<[T; 4]> = values.iter().map(|&v| [v; 4]).collect();
            let view = TextureView::new(&texels, args.width, args.height)?;
            eval(variant, &view, region, args, fallback)?
        }
    };
    Ok(value.to_string())
}

fn eval<S: PixelSource>(
    variant: &Variant,
    source: &S,
    region: Region,
    args: &SampleArgs,
    fallback: Option<S::Pixel>,
) -> Result<S::Pixel> {
    let access = match fallback {
        Some(v) => Access::with_fallback(source, region, v)?,
        None => Access::new(source, region)?,
    };
    let bound = variant
        .bind(access)
        .with_context(|| format!("Cannot use {}", variant.id()))?;
    trace!(x = args.x, y = args.y, "sampling");
    Ok(bound.sample(args.x, args.y))
}
