mod sdf;
mod smiles;

use sdf::run_sdf;
use smiles::run_smiles;

use anyhow::{Context as _, Result};
use fp_forge::{FingerprintConfig, ResultSet};

use crate::cli::{Command, IoOptions};
use crate::display::{Context, Progress, print_run_summary};
use crate::io::{create_output, destination_name};

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Smiles(args) => run_smiles(args, ctx),
        Command::Sdf(args) => run_sdf(args, ctx),
    }
}

/// Writes the CSV output step shared by every command.
fn write_results(
    results: &ResultSet,
    config: &FingerprintConfig,
    io: &IoOptions,
    progress: &mut Progress,
    ctx: Context,
) -> Result<()> {
    progress.step("Writing output");
    let writer = create_output(io.output.as_deref())?;
    fp_forge::io::csv::write(writer, results).context("Failed to write fingerprint CSV")?;
    progress.complete_step(
        "Writing output",
        &[format!(
            "Write CSV → {} ({} rows)",
            destination_name(io.output.as_deref()),
            results.len()
        )],
    );

    if ctx.interactive {
        print_run_summary(results, config);
    }
    Ok(())
}
