use super::error::Error;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Fingerprint encoding strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum FingerprintType {
    /// Circular (Morgan/ECFP4-style) bit vector produced by the toolkit.
    #[default]
    Circular,
    /// Atom-pair and topological-torsion hash maps folded into one vector.
    Combined,
}

impl FingerprintType {
    /// Canonical name used in messages and output.
    pub fn name(&self) -> &'static str {
        match self {
            FingerprintType::Circular => "ecfp4",
            FingerprintType::Combined => "apdp",
        }
    }

    /// Every spelling accepted by [`FromStr`], grouped by strategy.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            FingerprintType::Circular => &["ecfp4", "circular", "circular-hash", "morgan"],
            FingerprintType::Combined => &["apdp", "combined", "combined-pair-torsion-hash"],
        }
    }
}

impl fmt::Display for FingerprintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FingerprintType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        [FingerprintType::Circular, FingerprintType::Combined]
            .into_iter()
            .find(|ty| ty.aliases().contains(&key.as_str()))
            .ok_or_else(|| Error::UnknownFingerprintType(s.to_string()))
    }
}

impl TryFrom<String> for FingerprintType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Settings shared by both pipelines.
///
/// Loadable from TOML; absent keys take their defaults:
///
/// ```toml
/// fingerprint_type = "apdp"
/// n_bits = 2048
/// radius = 2
/// verbose = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FingerprintConfig {
    pub fingerprint_type: FingerprintType,
    /// Width of every output fingerprint. Must be positive.
    pub n_bits: usize,
    /// Circular neighborhood radius. Ignored by the combined strategy.
    pub radius: u32,
    /// Show a progress bar while records are processed.
    pub verbose: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            fingerprint_type: FingerprintType::Circular,
            n_bits: 1024,
            radius: 2,
            verbose: false,
        }
    }
}

impl FingerprintConfig {
    pub fn new(fingerprint_type: FingerprintType) -> Self {
        Self {
            fingerprint_type,
            ..Self::default()
        }
    }

    pub fn with_n_bits(mut self, n_bits: usize) -> Self {
        self.n_bits = n_bits;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Rejects settings that no record could satisfy.
    pub fn validate(&self) -> Result<(), Error> {
        if self.n_bits == 0 {
            return Err(Error::InvalidBitWidth(self.n_bits));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_alias_case_insensitively() {
        for name in ["ecfp4", "ECFP4", "circular", "Circular-Hash", "morgan"] {
            assert_eq!(name.parse::<FingerprintType>().unwrap(), FingerprintType::Circular);
        }
        for name in ["apdp", "APDP", "combined", "combined-pair-torsion-hash"] {
            assert_eq!(name.parse::<FingerprintType>().unwrap(), FingerprintType::Combined);
        }
    }

    #[test]
    fn unknown_type_is_a_configuration_error() {
        let err = "maccs".parse::<FingerprintType>().unwrap_err();
        assert!(matches!(err, Error::UnknownFingerprintType(ref name) if name == "maccs"));
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = FingerprintConfig::default();
        assert_eq!(config.fingerprint_type, FingerprintType::Circular);
        assert_eq!(config.n_bits, 1024);
        assert_eq!(config.radius, 2);
        assert!(!config.verbose);
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let config = FingerprintConfig::from_toml_str("fingerprint_type = \"APDP\"\nn_bits = 16\n")
            .unwrap();
        assert_eq!(config.fingerprint_type, FingerprintType::Combined);
        assert_eq!(config.n_bits, 16);
        assert_eq!(config.radius, 2);
    }

    #[test]
    fn toml_rejects_bad_values() {
        assert!(matches!(
            FingerprintConfig::from_toml_str("n_bits = 0"),
            Err(Error::InvalidBitWidth(0))
        ));
        assert!(matches!(
            FingerprintConfig::from_toml_str("fingerprint_type = \"maccs\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            FingerprintConfig::from_toml_str("bits = 12"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_config_file_is_reported_with_path() {
        let err = FingerprintConfig::from_path(Path::new("/no/such/fp.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
