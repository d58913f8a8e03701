use super::atom::Atom;
use super::types::BondOrder;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }
}

/// Molecular graph with an optional title and ordered data-item properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub title: String,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub properties: Vec<(String, String)>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        let key = Bond::new(a, b, BondOrder::Single);
        self.bonds.iter().find(|bond| bond.i == key.i && bond.j == key.j)
    }

    /// Per-atom list of `(neighbor, bond index)` pairs.
    pub fn adjacency(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adj = vec![Vec::new(); self.atoms.len()];
        for (b, bond) in self.bonds.iter().enumerate() {
            adj[bond.i].push((bond.j, b));
            adj[bond.j].push((bond.i, b));
        }
        adj
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Flags every bond that lies on a cycle.
    ///
    /// A bond is cyclic exactly when it is not a bridge of the graph.
    pub fn ring_bonds(&self) -> Vec<bool> {
        let n = self.atoms.len();
        let adj = self.adjacency();
        let mut in_ring = vec![true; self.bonds.len()];
        let mut disc = vec![usize::MAX; n];
        let mut low = vec![0usize; n];
        let mut timer = 0usize;

        for root in 0..n {
            if disc[root] != usize::MAX {
                continue;
            }
            // Iterative DFS: (atom, parent bond, next adjacency cursor).
            let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];
            disc[root] = timer;
            low[root] = timer;
            timer += 1;

            while let Some(top) = stack.last_mut() {
                let (v, parent) = (top.0, top.1);
                let next = adj[v].get(top.2).copied();
                top.2 += 1;

                match next {
                    Some((_, b)) if Some(b) == parent => {}
                    Some((w, b)) => {
                        if disc[w] == usize::MAX {
                            disc[w] = timer;
                            low[w] = timer;
                            timer += 1;
                            stack.push((w, Some(b), 0));
                        } else {
                            low[v] = low[v].min(disc[w]);
                        }
                    }
                    None => {
                        stack.pop();
                        if let (Some(pb), Some(&(u, _, _))) = (parent, stack.last()) {
                            low[u] = low[u].min(low[v]);
                            if low[v] > disc[u] {
                                in_ring[pb] = false;
                            }
                        }
                    }
                }
            }
        }

        in_ring
    }

    /// Flags every atom that touches a ring bond.
    pub fn ring_atoms(&self) -> Vec<bool> {
        let mut atoms = vec![false; self.atoms.len()];
        for (bond, cyclic) in self.bonds.iter().zip(self.ring_bonds()) {
            if cyclic {
                atoms[bond.i] = true;
                atoms[bond.j] = true;
            }
        }
        atoms
    }

    /// Topological distances from `start`; `None` for unreachable atoms.
    pub fn distances_from(&self, start: usize, adj: &[Vec<(usize, usize)>]) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.atoms.len()];
        let mut queue = std::collections::VecDeque::new();
        dist[start] = Some(0);
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            let d = dist[v].unwrap_or(0);
            for &(w, _) in &adj[v] {
                if dist[w].is_none() {
                    dist[w] = Some(d + 1);
                    queue.push_back(w);
                }
            }
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;

    fn chain(n: usize) -> Molecule {
        let mut mol = Molecule::new();
        for _ in 0..n {
            mol.atoms.push(Atom::new(Element::C));
        }
        for i in 1..n {
            mol.bonds.push(Bond::new(i - 1, i, BondOrder::Single));
        }
        mol
    }

    #[test]
    fn bond_normalizes_index_order() {
        let bond = Bond::new(3, 1, BondOrder::Double);
        assert_eq!((bond.i, bond.j), (1, 3));
    }

    #[test]
    fn chain_has_no_ring_bonds() {
        let mol = chain(4);
        assert_eq!(mol.ring_bonds(), vec![false, false, false]);
        assert!(mol.ring_atoms().iter().all(|&r| !r));
    }

    #[test]
    fn ring_with_tail_marks_only_cycle() {
        // cyclopropane with a methyl tail: 0-1-2-0, 2-3
        let mut mol = chain(4);
        mol.bonds.push(Bond::new(0, 2, BondOrder::Single));
        let ring = mol.ring_bonds();
        assert_eq!(ring, vec![true, true, false, true]);
        assert_eq!(mol.ring_atoms(), vec![true, true, true, false]);
    }

    #[test]
    fn distances_follow_bonds() {
        let mut mol = chain(3);
        mol.atoms.push(Atom::new(Element::O));
        let adj = mol.adjacency();
        assert_eq!(mol.distances_from(0, &adj), vec![Some(0), Some(1), Some(2), None]);
    }

    #[test]
    fn property_lookup_by_name() {
        let mut mol = chain(1);
        mol.properties.push(("ID".into(), "Z1".into()));
        assert_eq!(mol.property("ID"), Some("Z1"));
        assert_eq!(mol.property("missing"), None);
        assert!(mol.bond_between(0, 0).is_none());
    }
}
