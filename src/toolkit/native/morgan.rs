use super::hash::{combine, hash_values};
use crate::model::{fingerprint::BitVector, molecule::Molecule};
use crate::toolkit::ToolkitError;
use std::collections::{BTreeSet, HashSet};

/// Morgan (ECFP-style) fingerprint hashed into `n_bits` positions.
///
/// Atom environments are grown one bond shell per iteration up to `radius`.
/// An environment that covers the same bond set as one already emitted is
/// skipped, so symmetric or saturated neighborhoods do not add extra bits.
pub fn fingerprint(mol: &Molecule, radius: u32, n_bits: usize) -> Result<BitVector, ToolkitError> {
    if n_bits == 0 {
        return Err(ToolkitError::Fingerprint(
            "bit vector width must be positive".to_string(),
        ));
    }
    let mut bits = BitVector::new(n_bits);
    let n = mol.atom_count();
    if n == 0 {
        return Ok(bits);
    }

    let adj = mol.adjacency();
    let mut ids = initial_invariants(mol, &adj);
    for &id in &ids {
        bits.set(id as usize % n_bits);
    }

    let mut envs: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    let mut seen: HashSet<BTreeSet<usize>> = HashSet::new();

    for layer in 1..=radius {
        let mut next_ids = Vec::with_capacity(n);
        let mut next_envs = Vec::with_capacity(n);

        for atom in 0..n {
            let mut shell: Vec<(u32, u32)> = adj[atom]
                .iter()
                .map(|&(nbr, b)| (mol.bonds[b].order.code(), ids[nbr]))
                .collect();
            shell.sort_unstable();

            let mut id = 0;
            combine(&mut id, layer);
            combine(&mut id, ids[atom]);
            for (code, nbr_id) in shell {
                combine(&mut id, code);
                combine(&mut id, nbr_id);
            }

            let mut env = envs[atom].clone();
            for &(nbr, b) in &adj[atom] {
                env.insert(b);
                env.extend(envs[nbr].iter().copied());
            }

            if env != envs[atom] && seen.insert(env.clone()) {
                bits.set(id as usize % n_bits);
            }
            next_ids.push(id);
            next_envs.push(env);
        }

        ids = next_ids;
        envs = next_envs;
    }

    Ok(bits)
}

fn initial_invariants(mol: &Molecule, adj: &[Vec<(usize, usize)>]) -> Vec<u32> {
    let in_ring = mol.ring_atoms();
    mol.atoms
        .iter()
        .enumerate()
        .map(|(idx, atom)| {
            let heavy_degree = adj[idx]
                .iter()
                .filter(|&&(nbr, _)| !mol.atoms[nbr].is_hydrogen())
                .count();
            hash_values([
                u32::from(atom.element.atomic_number()),
                heavy_degree as u32,
                u32::from(atom.total_hydrogens()),
                atom.formal_charge as i32 as u32,
                u32::from(atom.isotope.unwrap_or(0)),
                u32::from(in_ring[idx]),
            ])
        })
        .collect()
}
