use anyhow::{Context, Result};

use fp_forge::{NativeToolkit, generate_from_file};

use crate::cli::SdfArgs;
use crate::config::build_fingerprint_config;
use crate::display::{Context as DisplayContext, Progress};

const TOTAL_STEPS: u8 = 2;

pub fn run_sdf(args: SdfArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_fingerprint_config(&args.fingerprint, None, args.io.verbose)?;
    let fields = (!args.fields.is_empty()).then_some(args.fields.as_slice());
    let mut progress = Progress::new(ctx.interactive && !config.verbose, TOTAL_STEPS);

    progress.step("Fingerprinting SDF records");
    let results = generate_from_file(&NativeToolkit::new(), &args.input, fields, &config)
        .with_context(|| format!("Failed to fingerprint {}", args.input.display()))?;

    let field_detail = match fields {
        Some(fields) => format!("Keep fields: {}", fields.join(", ")),
        None => "Keep all data items".to_string(),
    };
    progress.complete_step(
        "Fingerprinting SDF records",
        &[
            format!("{} ({} bits)", config.fingerprint_type, config.n_bits),
            format!("{} accepted, {} skipped", results.len(), results.rejected),
            field_detail,
        ],
    );

    super::write_results(&results, &config, &args.io, &mut progress, ctx)?;
    progress.finish();

    Ok(())
}
