//! Self-contained toolkit built on the crate's own molecular model.
//!
//! Supports SMILES notations and V2000 SDF files. The fingerprint primitives
//! follow the usual circular, atom-pair and topological-torsion schemes but
//! are not bit-compatible with any external toolkit.

mod hash;
mod hydrogens;
mod morgan;
mod pairs;

pub use pairs::HASH_SPACE;

use super::{FileEntries, FileEntry, Toolkit, ToolkitError};
use crate::io::{sdf, smiles};
use crate::model::{
    fingerprint::{BitVector, SparseIntVect},
    molecule::Molecule,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeToolkit;

impl NativeToolkit {
    pub fn new() -> Self {
        Self
    }
}

impl Toolkit for NativeToolkit {
    type Molecule = Molecule;

    fn parse(&self, notation: &str) -> Result<Option<Molecule>, ToolkitError> {
        let mol = smiles::parse(notation)?;
        Ok((!mol.is_empty()).then_some(mol))
    }

    fn normalize(&self, molecule: Molecule) -> Result<Molecule, ToolkitError> {
        hydrogens::normalize(molecule)
    }

    fn circular_fingerprint(
        &self,
        molecule: &Molecule,
        radius: u32,
        n_bits: usize,
    ) -> Result<BitVector, ToolkitError> {
        morgan::fingerprint(molecule, radius, n_bits)
    }

    fn pair_fingerprint(&self, molecule: &Molecule) -> Result<SparseIntVect, ToolkitError> {
        Ok(pairs::atom_pairs(molecule))
    }

    fn torsion_fingerprint(&self, molecule: &Molecule) -> Result<SparseIntVect, ToolkitError> {
        Ok(pairs::torsions(molecule))
    }

    fn read_file<'a>(&'a self, path: &Path) -> Result<FileEntries<'a, Molecule>, ToolkitError> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened SDF input");
        let records = sdf::Reader::new(BufReader::new(file)).map(|record| {
            let title = record
                .molecule
                .as_ref()
                .map(|m| m.title.clone())
                .unwrap_or_default();
            FileEntry {
                index: record.index,
                title,
                molecule: record.molecule.map_err(ToolkitError::from),
            }
        });
        Ok(Box::new(records))
    }

    fn property(&self, molecule: &Molecule, name: &str) -> Option<String> {
        molecule.property(name).map(str::to_string)
    }

    fn properties(&self, molecule: &Molecule) -> Vec<(String, String)> {
        molecule.properties.clone()
    }
}
