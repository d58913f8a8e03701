//! Fingerprint generation pipeline.
//!
//! Records flow through four stages, each of which may drop the current
//! record without aborting the run:
//!
//! 1. input: notations with identifiers, or a structure file
//! 2. [`Builder`]: parse and normalize into a [`Structure`]
//! 3. [`Encoder`]: produce an `n_bits` fingerprint, folding hash maps when needed
//! 4. [`Aggregator`]: collect survivors into a [`ResultSet`]
//!
//! Only configuration problems are returned as [`Error`]; they are detected
//! before the first record is touched.

mod aggregate;
mod builder;
mod config;
mod encoder;
mod error;
mod fold;
mod input;
mod outcome;
mod progress;

pub use aggregate::{Aggregator, MetadataTable, ResultSet};
pub use builder::{Builder, Structure};
pub use config::{FingerprintConfig, FingerprintType};
pub use encoder::Encoder;
pub use error::Error;
pub use fold::{OFFSET, fold, fold_keys};
pub use input::{FileInput, NotationInput, OneOrMany, file_substance_id};
pub use outcome::{Outcome, RejectReason, Rejection};

use crate::model::record::Record;
use crate::toolkit::{FileEntry, NativeToolkit, Toolkit};
use progress::Progress;
use std::path::Path;
use tracing::{debug, info};

/// Fingerprints line notations paired with identifiers.
///
/// A single notation may be passed as a plain string. The number of
/// notations and identifiers must match; otherwise nothing is parsed.
pub fn generate_from_notations<T: Toolkit>(
    toolkit: &T,
    notations: impl Into<OneOrMany<String>>,
    ids: impl Into<OneOrMany<String>>,
    config: &FingerprintConfig,
) -> Result<ResultSet, Error> {
    config.validate()?;
    let input = NotationInput::new(notations, ids)?;
    debug!(
        records = input.len(),
        strategy = %config.fingerprint_type,
        n_bits = config.n_bits,
        "starting notation pipeline"
    );

    let builder = Builder::new(toolkit);
    let encoder = Encoder::new(config);
    let mut aggregator = Aggregator::new(config.n_bits, None);
    let progress = Progress::new(config.verbose, Some(input.len()), "fingerprinting");

    for record in input.records() {
        let outcome = builder
            .from_notation(&record)
            .and_then(|structure| encoder.encode(toolkit, &record, &structure));
        match outcome {
            Outcome::Accepted(bits) => aggregator.accept(record.index, record.substance_id, bits, Vec::new()),
            Outcome::Rejected(rejection) => aggregator.reject(rejection),
        }
        progress.tick();
    }
    progress.finish();

    Ok(summarize(aggregator, config))
}

/// Fingerprints every record of a structure file.
///
/// Substance identifiers come from record titles, falling back to the
/// record's position. `fields` selects metadata columns; `None` keeps every
/// property found. Only the circular strategy is supported.
pub fn generate_from_file<T: Toolkit>(
    toolkit: &T,
    path: impl AsRef<Path>,
    fields: Option<&[String]>,
    config: &FingerprintConfig,
) -> Result<ResultSet, Error> {
    config.validate()?;
    let input = FileInput::open(path)?;
    if config.fingerprint_type != FingerprintType::Circular {
        return Err(Error::UnsupportedFileType(
            config.fingerprint_type.to_string(),
        ));
    }
    debug!(
        path = %input.path().display(),
        n_bits = config.n_bits,
        "starting file pipeline"
    );

    let entries = toolkit.read_file(input.path())?;
    let builder = Builder::new(toolkit);
    let encoder = Encoder::new(config);
    let mut aggregator = Aggregator::new(config.n_bits, fields);
    let progress = Progress::new(config.verbose, None, "fingerprinting");

    for entry in entries {
        let FileEntry {
            index,
            title,
            molecule,
        } = entry;
        let record = Record::new(index, file_substance_id(&title, index), title);
        let outcome = builder.from_parsed(&record, molecule).and_then(|structure| {
            encoder
                .encode(toolkit, &record, &structure)
                .map(|bits| (bits, structure))
        });
        match outcome {
            Outcome::Accepted((bits, structure)) => {
                let molecule = structure.molecule();
                let properties = match fields {
                    Some(fields) => fields
                        .iter()
                        .filter_map(|field| {
                            toolkit
                                .property(molecule, field)
                                .map(|value| (field.clone(), value))
                        })
                        .collect(),
                    None => toolkit.properties(molecule),
                };
                aggregator.accept(record.index, record.substance_id, bits, properties);
            }
            Outcome::Rejected(rejection) => aggregator.reject(rejection),
        }
        progress.tick();
    }
    progress.finish();

    Ok(summarize(aggregator, config))
}

/// [`generate_from_notations`] with the built-in [`NativeToolkit`].
pub fn fingerprints_from_smiles(
    smiles: impl Into<OneOrMany<String>>,
    ids: impl Into<OneOrMany<String>>,
    config: &FingerprintConfig,
) -> Result<ResultSet, Error> {
    generate_from_notations(&NativeToolkit::new(), smiles, ids, config)
}

/// [`generate_from_file`] with the built-in [`NativeToolkit`].
pub fn fingerprints_from_sdf(
    path: impl AsRef<Path>,
    fields: Option<&[String]>,
    config: &FingerprintConfig,
) -> Result<ResultSet, Error> {
    generate_from_file(&NativeToolkit::new(), path, fields, config)
}

/// Logs the run summary at `info` when `verbose` is set, `debug` otherwise.
fn summarize(aggregator: Aggregator, config: &FingerprintConfig) -> ResultSet {
    let results = aggregator.finish();
    if config.verbose {
        info!(
            strategy = %config.fingerprint_type,
            n_bits = config.n_bits,
            accepted = results.len(),
            rejected = results.rejected,
            "fingerprint generation finished"
        );
    } else {
        debug!(
            strategy = %config.fingerprint_type,
            n_bits = config.n_bits,
            accepted = results.len(),
            rejected = results.rejected,
            "fingerprint generation finished"
        );
    }
    results
}
