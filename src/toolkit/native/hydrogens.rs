use crate::model::{atom::Atom, molecule::Molecule, types::Element};
use crate::toolkit::ToolkitError;

/// Normalizes hydrogen bookkeeping and checks valences.
///
/// Plain `[H]` atoms with a single heavy neighbor are folded into that
/// neighbor's explicit count. Every other atom then receives implicit
/// hydrogens up to the smallest permitted valence, unless it was written
/// in brackets.
pub fn normalize(mut mol: Molecule) -> Result<Molecule, ToolkitError> {
    fold_explicit_hydrogens(&mut mol)?;
    assign_implicit_hydrogens(&mut mol)?;
    Ok(mol)
}

fn is_foldable(mol: &Molecule, idx: usize, degree: &[usize]) -> bool {
    let atom = &mol.atoms[idx];
    atom.is_hydrogen()
        && atom.formal_charge == 0
        && atom.isotope.is_none()
        && atom.explicit_hydrogens == 0
        && degree[idx] == 1
}

fn fold_explicit_hydrogens(mol: &mut Molecule) -> Result<(), ToolkitError> {
    let mut degree = vec![0usize; mol.atom_count()];
    for bond in &mol.bonds {
        degree[bond.i] += 1;
        degree[bond.j] += 1;
    }

    let mut remove = vec![false; mol.atom_count()];
    for bond in &mol.bonds {
        for (h, heavy) in [(bond.i, bond.j), (bond.j, bond.i)] {
            if is_foldable(mol, h, &degree)
                && !mol.atoms[heavy].is_hydrogen()
                && bond.order.valence() == 1
            {
                remove[h] = true;
            }
        }
    }
    if !remove.iter().any(|&r| r) {
        return Ok(());
    }

    for bond in &mol.bonds {
        for (h, heavy) in [(bond.i, bond.j), (bond.j, bond.i)] {
            if remove[h] {
                let target = &mut mol.atoms[heavy];
                target.explicit_hydrogens = target.explicit_hydrogens.checked_add(1).ok_or_else(
                    || ToolkitError::Structure(format!("too many hydrogens on atom {heavy}")),
                )?;
            }
        }
    }

    let mut new_index = vec![usize::MAX; mol.atom_count()];
    let mut kept: Vec<Atom> = Vec::with_capacity(mol.atom_count());
    for (idx, atom) in mol.atoms.drain(..).enumerate() {
        if !remove[idx] {
            new_index[idx] = kept.len();
            kept.push(atom);
        }
    }
    mol.atoms = kept;
    mol.bonds.retain(|b| !remove[b.i] && !remove[b.j]);
    for bond in &mut mol.bonds {
        *bond = crate::model::molecule::Bond::new(new_index[bond.i], new_index[bond.j], bond.order);
    }
    Ok(())
}

fn assign_implicit_hydrogens(mol: &mut Molecule) -> Result<(), ToolkitError> {
    let mut bond_valence = vec![0u16; mol.atom_count()];
    for bond in &mol.bonds {
        let v = u16::from(bond.order.valence());
        bond_valence[bond.i] += v;
        bond_valence[bond.j] += v;
    }

    for (idx, atom) in mol.atoms.iter_mut().enumerate() {
        let allowed = atom.element.valences(atom.formal_charge);
        if allowed.is_empty() {
            atom.implicit_hydrogens = 0;
            continue;
        }

        let explicit = bond_valence[idx] + u16::from(atom.explicit_hydrogens);
        // Aromatic atoms share one extra pi bond when their valence allows it.
        let valence = if atom.aromatic
            && allowed.iter().any(|&v| u16::from(v) > explicit)
            && needs_pi_electron(atom)
        {
            explicit + 1
        } else {
            explicit
        };

        let Some(&target) = allowed.iter().find(|&&v| u16::from(v) >= valence) else {
            return Err(ToolkitError::valence(
                idx,
                atom.element,
                u8::try_from(valence).unwrap_or(u8::MAX),
            ));
        };

        atom.implicit_hydrogens = if atom.no_implicit {
            0
        } else {
            u8::try_from(u16::from(target) - valence).unwrap_or(0)
        };
    }
    Ok(())
}

/// Aromatic heteroatoms that donate a lone pair (pyrrole-type N, furan O,
/// thiophene S) take no part in a ring double bond.
fn needs_pi_electron(atom: &Atom) -> bool {
    match atom.element {
        Element::O | Element::S | Element::Se => atom.formal_charge > 0,
        Element::N | Element::P | Element::As => {
            atom.formal_charge > 0 || atom.explicit_hydrogens == 0
        }
        _ => true,
    }
}
