use super::builder::{Structure, reject};
use super::config::{FingerprintConfig, FingerprintType};
use super::fold::fold;
use super::outcome::{Outcome, RejectReason};
use crate::model::{
    fingerprint::BitVector,
    record::{Describe, Record},
};
use crate::toolkit::Toolkit;

/// Produces fixed-width fingerprints for normalized structures.
///
/// The strategy is fixed at construction; [`encode`](Encoder::encode) is the
/// single entry point for both strategies.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    strategy: FingerprintType,
    n_bits: usize,
    radius: u32,
}

impl Encoder {
    pub fn new(config: &FingerprintConfig) -> Self {
        Self {
            strategy: config.fingerprint_type,
            n_bits: config.n_bits,
            radius: config.radius,
        }
    }

    pub fn strategy(&self) -> FingerprintType {
        self.strategy
    }

    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    pub fn encode<T: Toolkit, R: Describe>(
        &self,
        toolkit: &T,
        record: &Record<R>,
        structure: &Structure<T::Molecule>,
    ) -> Outcome<BitVector> {
        let molecule = structure.molecule();
        let produced = match self.strategy {
            FingerprintType::Circular => {
                toolkit.circular_fingerprint(molecule, self.radius, self.n_bits)
            }
            FingerprintType::Combined => toolkit.pair_fingerprint(molecule).and_then(|pairs| {
                let torsions = toolkit.torsion_fingerprint(molecule)?;
                Ok(fold(&pairs, &torsions, self.n_bits))
            }),
        };

        match produced {
            Ok(bits) if bits.len() == self.n_bits => Outcome::Accepted(bits),
            Ok(bits) => Outcome::Rejected(reject(
                record,
                RejectReason::WidthMismatch {
                    expected: self.n_bits,
                    actual: bits.len(),
                },
            )),
            Err(e) => Outcome::Rejected(reject(record, RejectReason::Fingerprint(e))),
        }
    }
}
