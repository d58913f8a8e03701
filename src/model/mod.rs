//! Core data structures flowing through `fp-forge`:
//!
//! - [`types`] – Periodic table elements and bond order classifications.
//! - [`atom`] – Atoms with charge, aromaticity and hydrogen bookkeeping.
//! - [`molecule`] – Molecular graphs with ring and distance queries.
//! - [`fingerprint`] – Dense bit vectors and sparse hash-count vectors.
//! - [`record`] – Input records carrying identifiers and raw input.

pub mod atom;
pub mod fingerprint;
pub mod molecule;
pub mod record;
pub mod types;
