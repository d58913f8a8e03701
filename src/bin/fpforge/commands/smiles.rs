use anyhow::{Context, Result, bail};

use fp_forge::io::smiles::read_smi;
use fp_forge::{NativeToolkit, generate_from_notations};

use crate::cli::SmilesArgs;
use crate::config::build_fingerprint_config;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::{open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_smiles(args: SmilesArgs, ctx: DisplayContext) -> Result<()> {
    if args.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: fpforge smiles -i <INPUT.smi> or pipe SMILES via stdin."
        );
    }

    let config = build_fingerprint_config(
        &args.fingerprint,
        args.fingerprint_type.map(Into::into),
        args.io.verbose,
    )?;
    let mut progress = Progress::new(ctx.interactive && !config.verbose, TOTAL_STEPS);

    progress.step("Reading SMILES");
    let input = open_input(args.input.as_deref())?;
    let entries = read_smi(input).context("Failed to read SMILES input")?;
    let (notations, ids): (Vec<String>, Vec<String>) = entries
        .into_iter()
        .map(|entry| {
            let id = entry.id.unwrap_or_else(|| format!("line{}", entry.line));
            (entry.notation, id)
        })
        .unzip();
    progress.complete_step(
        "Reading SMILES",
        &[format!("{} notations", notations.len())],
    );

    progress.step("Generating fingerprints");
    let results = generate_from_notations(&NativeToolkit::new(), notations, ids, &config)
        .context("Fingerprint generation failed")?;
    progress.complete_step(
        "Generating fingerprints",
        &[
            format!("{} ({} bits)", config.fingerprint_type, config.n_bits),
            format!("{} accepted, {} skipped", results.len(), results.rejected),
        ],
    );

    super::write_results(&results, &config, &args.io, &mut progress, ctx)?;
    progress.finish();

    Ok(())
}
