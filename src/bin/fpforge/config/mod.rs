use anyhow::{Context, Result};

use fp_forge::{FingerprintConfig, FingerprintType};

use crate::cli::FingerprintOptions;

/// Merges the optional TOML file with command-line flags; flags win.
pub fn build_fingerprint_config(
    opts: &FingerprintOptions,
    fingerprint_type: Option<FingerprintType>,
    verbose: bool,
) -> Result<FingerprintConfig> {
    let mut config = match &opts.config {
        Some(path) => FingerprintConfig::from_path(path)
            .with_context(|| format!("Failed to load fingerprint settings from {}", path.display()))?,
        None => FingerprintConfig::default(),
    };

    if let Some(ty) = fingerprint_type {
        config.fingerprint_type = ty;
    }
    if let Some(n_bits) = opts.n_bits {
        config.n_bits = n_bits;
    }
    if let Some(radius) = opts.radius {
        config.radius = radius;
    }
    config.verbose |= verbose;

    config.validate()?;
    Ok(config)
}
