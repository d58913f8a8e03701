//! The molecular-toolkit seam.
//!
//! The pipeline never touches a concrete cheminformatics implementation. It
//! talks to a [`Toolkit`], which parses structures, normalizes them and
//! computes the raw fingerprint primitives. [`NativeToolkit`] is the
//! implementation shipped with the crate.

pub mod native;

pub use native::NativeToolkit;

use crate::model::fingerprint::{BitVector, SparseIntVect};
use std::path::Path;
use thiserror::Error;

/// Errors reported by a toolkit.
///
/// Inside the pipeline these are per-record failures and never abort a run,
/// except when opening the input file in [`Toolkit::read_file`].
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A notation or file record could not be parsed.
    #[error(transparent)]
    Parse(#[from] crate::io::Error),

    /// An atom exceeds every valence permitted for its element and charge.
    #[error("explicit valence {valence} for atom {atom} ({element}) is greater than permitted")]
    Valence {
        /// Zero-based atom index.
        atom: usize,
        /// Element symbol.
        element: String,
        /// Computed explicit valence.
        valence: u8,
    },

    /// The molecular graph is inconsistent.
    #[error("invalid structure: {0}")]
    Structure(String),

    /// A fingerprint primitive failed.
    #[error("fingerprint generation failed: {0}")]
    Fingerprint(String),
}

impl ToolkitError {
    pub fn valence(atom: usize, element: impl ToString, valence: u8) -> Self {
        Self::Valence {
            atom,
            element: element.to_string(),
            valence,
        }
    }
}

/// One record produced by [`Toolkit::read_file`].
#[derive(Debug)]
pub struct FileEntry<M> {
    /// Zero-based position in the file.
    pub index: usize,
    /// Record title; empty when the file leaves it blank or the record is unreadable.
    pub title: String,
    /// The parsed structure, or the reason it could not be parsed.
    pub molecule: Result<M, ToolkitError>,
}

/// Boxed record stream returned by [`Toolkit::read_file`].
pub type FileEntries<'a, M> = Box<dyn Iterator<Item = FileEntry<M>> + 'a>;

/// Operations the fingerprint pipeline requires from a cheminformatics toolkit.
pub trait Toolkit {
    /// The toolkit's structure handle.
    type Molecule;

    /// Parses a line notation. `Ok(None)` means the notation describes no structure.
    fn parse(&self, notation: &str) -> Result<Option<Self::Molecule>, ToolkitError>;

    /// Reconciles hydrogens and checks valences.
    fn normalize(&self, molecule: Self::Molecule) -> Result<Self::Molecule, ToolkitError>;

    /// Circular (Morgan) fingerprint folded to `n_bits`.
    fn circular_fingerprint(
        &self,
        molecule: &Self::Molecule,
        radius: u32,
        n_bits: usize,
    ) -> Result<BitVector, ToolkitError>;

    /// Atom-pair hash counts; keys are below 8,388,608.
    fn pair_fingerprint(&self, molecule: &Self::Molecule) -> Result<SparseIntVect, ToolkitError>;

    /// Topological-torsion hash counts; keys are below 8,388,608.
    fn torsion_fingerprint(&self, molecule: &Self::Molecule)
    -> Result<SparseIntVect, ToolkitError>;

    /// Opens a structure file and streams its records.
    ///
    /// Failing to open the file is an error; a malformed record is reported
    /// through its [`FileEntry`] instead.
    fn read_file<'a>(&'a self, path: &Path) -> Result<FileEntries<'a, Self::Molecule>, ToolkitError>;

    /// Looks up one data item attached to a file record.
    fn property(&self, molecule: &Self::Molecule, name: &str) -> Option<String>;

    /// All data items of a file record, in file order.
    fn properties(&self, molecule: &Self::Molecule) -> Vec<(String, String)>;
}
