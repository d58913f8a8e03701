use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fp_forge::FingerprintType;

#[derive(Parser)]
#[command(
    name = "fpforge",
    about = "Molecular fingerprints for similarity search and machine learning",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fingerprint SMILES notations (one `SMILES [ID]` per line)
    #[command(visible_alias = "s")]
    Smiles(SmilesArgs),

    /// Fingerprint the records of an SDF file
    #[command(visible_alias = "f")]
    Sdf(SdfArgs),
}

impl Command {
    pub fn io(&self) -> &IoOptions {
        match self {
            Command::Smiles(args) => &args.io,
            Command::Sdf(args) => &args.io,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Output CSV file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output and warnings (for scripting)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show a per-record progress bar and run summary logs
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fingerprint options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Fingerprint Options")]
pub struct FingerprintOptions {
    /// Fingerprint width in bits [default: 1024]
    #[arg(long = "bits", value_name = "N")]
    pub n_bits: Option<usize>,

    /// Circular neighborhood radius [default: 2]
    #[arg(long, value_name = "R")]
    pub radius: Option<u32>,

    /// Fingerprint settings file (TOML); flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SmilesArgs {
    /// Input `.smi` file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub io: IoOptions,

    /// Fingerprint strategy [default: ecfp4]
    #[arg(long = "type", value_name = "TYPE", ignore_case = true)]
    pub fingerprint_type: Option<FingerprintKind>,

    #[command(flatten)]
    pub fingerprint: FingerprintOptions,
}

#[derive(Args)]
pub struct SdfArgs {
    /// Input SDF file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub io: IoOptions,

    /// Data item to keep as a metadata column, repeatable (all items if omitted)
    #[arg(long = "field", value_name = "NAME", action = clap::ArgAction::Append)]
    pub fields: Vec<String>,

    #[command(flatten)]
    pub fingerprint: FingerprintOptions,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FingerprintKind {
    /// Circular (Morgan) fingerprint, radius 2 by default
    #[value(alias = "circular", alias = "circular-hash", alias = "morgan")]
    Ecfp4,
    /// Atom pairs and topological torsions folded together
    #[value(alias = "combined", alias = "combined-pair-torsion-hash")]
    Apdp,
}

impl From<FingerprintKind> for FingerprintType {
    fn from(kind: FingerprintKind) -> Self {
        match kind {
            FingerprintKind::Ecfp4 => FingerprintType::Circular,
            FingerprintKind::Apdp => FingerprintType::Combined,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
