//! Molecular fingerprint generation for similarity search and machine learning.
//!
//! Converts collections of molecules, given as SMILES notations or as records
//! of an SDF file, into fixed-width binary fingerprints. Records that cannot
//! be parsed, normalized or encoded are skipped with a diagnostic. Survivors
//! are gathered into a rectangular [`ResultSet`] whose identifiers, matrix
//! rows and metadata rows always line up.
//!
//! # Features
//!
//! - **Two entry points**: notation sequences with parallel identifiers
//!   ([`generate_from_notations`]) and structure files with per-record data
//!   items ([`generate_from_file`])
//! - **Two strategies**: circular (Morgan/ECFP4-style) bit vectors, and a
//!   combined atom-pair/torsion fingerprint folded into the requested width
//! - **Pluggable toolkit**: parsing, normalization and fingerprint primitives
//!   sit behind the [`Toolkit`] trait; [`NativeToolkit`] is built in
//! - **Per-record recovery**: only configuration problems fail a run
//!
//! # Quick Start
//!
//! ```
//! use fp_forge::{FingerprintConfig, FingerprintType, fingerprints_from_smiles};
//!
//! let config = FingerprintConfig::new(FingerprintType::Circular).with_n_bits(1024);
//! let results = fingerprints_from_smiles(
//!     ["CCO", "not-a-molecule", "c1ccccc1"],
//!     ["ethanol", "junk", "benzene"],
//!     &config,
//! )?;
//!
//! // the invalid notation is dropped, the others keep their order
//! assert_eq!(results.ids, vec!["ethanol", "benzene"]);
//! assert_eq!(results.matrix.dim(), (2, 1024));
//! assert!(results.matrix.iter().all(|&bit| bit <= 1));
//! # Ok::<(), fp_forge::PipelineError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: SMILES, SDF and CSV reading and writing
//! - [`toolkit`]: the [`Toolkit`] seam and the built-in implementation
//! - [`pipeline`]: builder, encoder, folding projector and aggregator
//!
//! # Data Types
//!
//! - [`Molecule`], [`Atom`], [`Bond`], [`Element`], [`BondOrder`]: molecular graph
//! - [`BitVector`]: fixed-width fingerprint
//! - [`SparseIntVect`]: sparse hash counts produced by pair and torsion primitives
//! - [`ResultSet`], [`MetadataTable`]: pipeline output
//! - [`FingerprintConfig`], [`FingerprintType`]: run configuration

mod model;

pub mod io;
pub mod pipeline;
pub mod toolkit;

pub use model::atom::Atom;
pub use model::fingerprint::{BitVector, SparseIntVect};
pub use model::molecule::{Bond, Molecule};
pub use model::record::{Describe, Record};
pub use model::types::{BondOrder, Element, ParseBondOrderError, ParseElementError};

pub use pipeline::{
    Aggregator, FingerprintConfig, FingerprintType, MetadataTable, OneOrMany, RejectReason,
    Rejection, ResultSet, fingerprints_from_sdf, fingerprints_from_smiles, generate_from_file,
    generate_from_notations,
};

pub use pipeline::Error as PipelineError;
pub use toolkit::{NativeToolkit, Toolkit, ToolkitError};
