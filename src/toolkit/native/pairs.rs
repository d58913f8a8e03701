use super::hash::hash_values;
use crate::model::{
    fingerprint::SparseIntVect,
    molecule::Molecule,
    types::{BondOrder, Element},
};

/// Exclusive upper bound of every atom-pair and torsion key.
pub const HASH_SPACE: u64 = 1 << 23;

const MAX_DISTANCE: u32 = 31;

/// 4-bit element class; everything outside the common set shares the last slot.
fn element_bucket(element: Element) -> u32 {
    match element {
        Element::B => 0,
        Element::C => 1,
        Element::N => 2,
        Element::O => 3,
        Element::F => 4,
        Element::Si => 5,
        Element::P => 6,
        Element::S => 7,
        Element::Cl => 8,
        Element::Br => 9,
        Element::I => 10,
        Element::Se => 11,
        Element::As => 12,
        Element::Ge => 13,
        Element::Sn => 14,
        _ => 15,
    }
}

/// Heavy-atom view of a molecule with per-atom 9-bit codes.
struct AtomCodes {
    heavy: Vec<bool>,
    codes: Vec<u32>,
    adj: Vec<Vec<(usize, usize)>>,
}

impl AtomCodes {
    fn new(mol: &Molecule) -> Self {
        let adj = mol.adjacency();
        let heavy: Vec<bool> = mol.atoms.iter().map(|a| !a.is_hydrogen()).collect();
        let codes = mol
            .atoms
            .iter()
            .enumerate()
            .map(|(idx, atom)| {
                let degree = adj[idx].iter().filter(|&&(nbr, _)| heavy[nbr]).count() as u32;
                let pi: u32 = adj[idx]
                    .iter()
                    .map(|&(_, b)| match mol.bonds[b].order {
                        BondOrder::Double => 1,
                        BondOrder::Triple => 2,
                        BondOrder::Single | BondOrder::Aromatic => 0,
                    })
                    .sum::<u32>()
                    + u32::from(atom.aromatic);
                degree.min(7) | pi.min(3) << 3 | element_bucket(atom.element) << 5
            })
            .collect();
        Self { heavy, codes, adj }
    }

    fn heavy_neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj[atom]
            .iter()
            .map(|&(nbr, _)| nbr)
            .filter(|&nbr| self.heavy[nbr])
    }
}

/// Counts every heavy-atom pair by (code, topological distance, code).
pub fn atom_pairs(mol: &Molecule) -> SparseIntVect {
    let view = AtomCodes::new(mol);
    let mut fp = SparseIntVect::new(HASH_SPACE);
    for i in 0..mol.atom_count() {
        if !view.heavy[i] {
            continue;
        }
        let dist = mol.distances_from(i, &view.adj);
        for j in (i + 1)..mol.atom_count() {
            let Some(d) = dist[j].filter(|_| view.heavy[j]) else {
                continue;
            };
            let (lo, hi) = if view.codes[i] <= view.codes[j] {
                (view.codes[i], view.codes[j])
            } else {
                (view.codes[j], view.codes[i])
            };
            let key = u64::from(lo | d.min(MAX_DISTANCE) << 9 | hi << 14);
            fp.increment(key);
        }
    }
    fp
}

/// Counts every heavy-atom path of four atoms, direction-independent.
pub fn torsions(mol: &Molecule) -> SparseIntVect {
    let view = AtomCodes::new(mol);
    let mut fp = SparseIntVect::new(HASH_SPACE);
    for bond in &mol.bonds {
        let (b, c) = (bond.i, bond.j);
        if !view.heavy[b] || !view.heavy[c] {
            continue;
        }
        for a in view.heavy_neighbors(b).filter(|&a| a != c) {
            for d in view.heavy_neighbors(c).filter(|&d| d != b && d != a) {
                let forward = [view.codes[a], view.codes[b], view.codes[c], view.codes[d]];
                let mut reverse = forward;
                reverse.reverse();
                let path = forward.min(reverse);
                fp.increment(u64::from(hash_values(path)) % HASH_SPACE);
            }
        }
    }
    fp
}
