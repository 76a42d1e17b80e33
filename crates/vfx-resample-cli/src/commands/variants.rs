//! Variants command
//!
//! Prints the identifiers of the generated variant matrix, optionally
//! narrowed to one filter, policy, element type or backend.

use crate::VariantsArgs;
use anyhow::Result;
use tracing::info;
use vfx_resample::{Backend, BorderPolicy, DataType, Filter, VariantTable};

pub fn run(args: VariantsArgs, verbose: u8) -> Result<()> {
    let table = build_table(&args);

    if args.count {
        println!("{}", table.len());
        return Ok(());
    }

    for variant in table.iter() {
        if verbose > 0 {
            let fallback = if variant.id().has_fallback() { " (fallback)" } else { "" };
            println!("{}{}", variant.id(), fallback);
        } else {
            println!("{}", variant.id());
        }
    }
    info!(count = table.len(), "listed variants");

    Ok(())
}

/// Generates the table selected by the filter arguments.
fn build_table(args: &VariantsArgs) -> VariantTable {
    let filters: Vec<Filter> = match args.filter {
        Some(f) => vec![f],
        None => Filter::ALL.to_vec(),
    };
    let policies: Vec<BorderPolicy> = match args.policy {
        Some(p) => vec![p],
        None => BorderPolicy::HANDLING.to_vec(),
    };
    let dtypes: Vec<DataType> = match args.dtype {
        Some(d) => vec![d],
        None => DataType::ALL.to_vec(),
    };
    let backends: Vec<Backend> = match args.backend {
        Some(b) => vec![b],
        None => Backend::ALL.to_vec(),
    };
    VariantTable::generate(&filters, &policies, &dtypes, &backends)
}
