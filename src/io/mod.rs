//! Molecular file and notation I/O.
//!
//! - [`smiles`] – SMILES parsing and `.smi` line files.
//! - [`sdf`] – Multi-record V2000 SDF reading with data items.
//! - [`csv`] – Writing fingerprint result sets as CSV.

use std::fmt;

pub mod error;
pub mod util;

pub mod csv;
pub mod sdf;
pub mod smiles;

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Smiles,
    Sdf,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Smiles => write!(f, "SMILES"),
            Format::Sdf => write!(f, "SDF"),
        }
    }
}
