use super::outcome::{Outcome, RejectReason, Rejection};
use crate::model::record::{Describe, Record};
use crate::toolkit::{Toolkit, ToolkitError};

/// A normalized structure, ready for fingerprinting.
///
/// Only [`Builder`] can create one, so every fingerprinted structure has been
/// through the toolkit's normalization.
#[derive(Debug)]
pub struct Structure<M>(M);

impl<M> Structure<M> {
    pub fn molecule(&self) -> &M {
        &self.0
    }
}

/// Turns raw records into normalized structures.
pub struct Builder<'t, T: Toolkit> {
    toolkit: &'t T,
}

impl<'t, T: Toolkit> Builder<'t, T> {
    pub fn new(toolkit: &'t T) -> Self {
        Self { toolkit }
    }

    /// Parses and normalizes a notation record.
    pub fn from_notation(&self, record: &Record<String>) -> Outcome<Structure<T::Molecule>> {
        match self.toolkit.parse(&record.raw) {
            Ok(Some(molecule)) => self.normalize(record, molecule),
            Ok(None) => Outcome::Rejected(reject(record, RejectReason::Empty)),
            Err(e) => Outcome::Rejected(reject(record, RejectReason::Parse(e))),
        }
    }

    /// Normalizes a structure already parsed by [`Toolkit::read_file`].
    pub fn from_parsed<R: Describe>(
        &self,
        record: &Record<R>,
        parsed: Result<T::Molecule, ToolkitError>,
    ) -> Outcome<Structure<T::Molecule>> {
        match parsed {
            Ok(molecule) => self.normalize(record, molecule),
            Err(e) => Outcome::Rejected(reject(record, RejectReason::Parse(e))),
        }
    }

    fn normalize<R: Describe>(
        &self,
        record: &Record<R>,
        molecule: T::Molecule,
    ) -> Outcome<Structure<T::Molecule>> {
        match self.toolkit.normalize(molecule) {
            Ok(normalized) => Outcome::Accepted(Structure(normalized)),
            Err(e) => Outcome::Rejected(reject(record, RejectReason::Normalize(e))),
        }
    }
}

pub(crate) fn reject<R: Describe>(record: &Record<R>, reason: RejectReason) -> Rejection {
    Rejection {
        index: record.index,
        substance_id: record.substance_id.clone(),
        raw: record.raw.describe(),
        reason,
    }
}

