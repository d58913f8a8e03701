use crate::io::{Format, error::Error};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
    types::{BondOrder, Element},
};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::str::FromStr;

/// Parses a SMILES string into a molecular graph.
///
/// Anything after the first whitespace is treated as a name and ignored.
/// Atoms are left unnormalized: implicit hydrogens are assigned later.
/// Stereo markers (`/`, `\`, `@`) are accepted and discarded.
pub fn parse(input: &str) -> Result<Molecule, Error> {
    let notation = input.split_whitespace().next().unwrap_or("");
    Parser::new(notation).run()
}

/// One non-empty line of a `.smi` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmiEntry {
    pub line: usize,
    pub notation: String,
    pub id: Option<String>,
}

/// Reads `SMILES [ID]` lines, skipping blanks and `#` comments.
pub fn read_smi<R: BufRead>(reader: R) -> Result<Vec<SmiEntry>, Error> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let notation = tokens
            .next()
            .ok_or_else(|| Error::parse(Format::Smiles, i + 1, "missing SMILES column"))?;
        let rest: Vec<&str> = tokens.collect();
        entries.push(SmiEntry {
            line: i + 1,
            notation: notation.to_string(),
            id: (!rest.is_empty()).then(|| rest.join(" ")),
        });
    }
    Ok(entries)
}

struct RingOpen {
    atom: usize,
    order: Option<BondOrder>,
}

struct Parser<'a> {
    notation: &'a str,
    src: &'a [u8],
    pos: usize,
    mol: Molecule,
    prev: Option<usize>,
    branches: Vec<usize>,
    bond: Option<BondOrder>,
    rings: BTreeMap<u32, RingOpen>,
}

impl<'a> Parser<'a> {
    fn new(notation: &'a str) -> Self {
        Self {
            notation,
            src: notation.as_bytes(),
            pos: 0,
            mol: Molecule::new(),
            prev: None,
            branches: Vec::new(),
            bond: None,
            rings: BTreeMap::new(),
        }
    }

    fn error(&self, details: impl Into<String>) -> Error {
        Error::notation(self.notation, self.pos + 1, details)
    }

    fn run(mut self) -> Result<Molecule, Error> {
        while let Some(&c) = self.src.get(self.pos) {
            match c {
                b'(' => {
                    let Some(prev) = self.prev else {
                        return Err(self.error("branch opened before any atom"));
                    };
                    if self.bond.is_some() {
                        return Err(self.error("bond symbol before branch"));
                    }
                    self.branches.push(prev);
                    self.pos += 1;
                }
                b')' => {
                    if self.bond.is_some() {
                        return Err(self.error("dangling bond before ')'"));
                    }
                    let Some(prev) = self.branches.pop() else {
                        return Err(self.error("unmatched ')'"));
                    };
                    self.prev = Some(prev);
                    self.pos += 1;
                }
                b'-' | b'/' | b'\\' => self.bond_symbol(BondOrder::Single)?,
                b'=' => self.bond_symbol(BondOrder::Double)?,
                b'#' => self.bond_symbol(BondOrder::Triple)?,
                b':' => self.bond_symbol(BondOrder::Aromatic)?,
                b'.' => {
                    if self.bond.is_some() {
                        return Err(self.error("bond symbol before '.'"));
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                b'0'..=b'9' => {
                    let label = u32::from(c - b'0');
                    self.ring_closure(label)?;
                    self.pos += 1;
                }
                b'%' => {
                    let digits = self
                        .src
                        .get(self.pos + 1..self.pos + 3)
                        .filter(|d| d.iter().all(u8::is_ascii_digit))
                        .ok_or_else(|| self.error("'%' must be followed by two digits"))?;
                    let label = u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0');
                    self.ring_closure(label)?;
                    self.pos += 3;
                }
                b'[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom);
                }
                _ => {
                    let atom = self.organic_atom()?;
                    self.add_atom(atom);
                }
            }
        }

        if self.bond.is_some() {
            return Err(self.error("dangling bond at end of input"));
        }
        if !self.branches.is_empty() {
            return Err(self.error("unclosed branch"));
        }
        if let Some(label) = self.rings.keys().next() {
            return Err(self.error(format!("unclosed ring bond {label}")));
        }
        Ok(self.mol)
    }

    fn bond_symbol(&mut self, order: BondOrder) -> Result<(), Error> {
        if self.prev.is_none() {
            return Err(self.error("bond symbol without a preceding atom"));
        }
        if self.bond.is_some() {
            return Err(self.error("consecutive bond symbols"));
        }
        self.bond = Some(order);
        self.pos += 1;
        Ok(())
    }

    fn default_order(&self, a: usize, b: usize) -> BondOrder {
        if self.mol.atoms[a].aromatic && self.mol.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn add_atom(&mut self, atom: Atom) {
        let idx = self.mol.atoms.len();
        self.mol.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = match self.bond.take() {
                Some(order) => order,
                None => self.default_order(prev, idx),
            };
            self.mol.bonds.push(Bond::new(prev, idx, order));
        }
        self.prev = Some(idx);
    }

    fn ring_closure(&mut self, label: u32) -> Result<(), Error> {
        let Some(current) = self.prev else {
            return Err(self.error("ring bond without a preceding atom"));
        };
        let explicit = self.bond.take();

        let Some(open) = self.rings.remove(&label) else {
            self.rings.insert(
                label,
                RingOpen {
                    atom: current,
                    order: explicit,
                },
            );
            return Ok(());
        };

        let order = match (open.order, explicit) {
            (Some(a), Some(b)) if a != b => {
                return Err(self.error(format!("conflicting bond orders for ring {label}")));
            }
            (Some(order), _) | (None, Some(order)) => order,
            (None, None) => self.default_order(open.atom, current),
        };
        if open.atom == current {
            return Err(self.error(format!("ring bond {label} closes on its own atom")));
        }
        if self.mol.bond_between(open.atom, current).is_some() {
            return Err(self.error(format!("ring bond {label} duplicates an existing bond")));
        }
        self.mol.bonds.push(Bond::new(open.atom, current, order));
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, Error> {
        let c = self.src[self.pos];
        let next = self.src.get(self.pos + 1).copied();
        let (len, element, aromatic) = match (c, next) {
            (b'C', Some(b'l')) => (2, Element::Cl, false),
            (b'B', Some(b'r')) => (2, Element::Br, false),
            (b'B', _) => (1, Element::B, false),
            (b'C', _) => (1, Element::C, false),
            (b'N', _) => (1, Element::N, false),
            (b'O', _) => (1, Element::O, false),
            (b'P', _) => (1, Element::P, false),
            (b'S', _) => (1, Element::S, false),
            (b'F', _) => (1, Element::F, false),
            (b'I', _) => (1, Element::I, false),
            (b'b', _) => (1, Element::B, true),
            (b'c', _) => (1, Element::C, true),
            (b'n', _) => (1, Element::N, true),
            (b'o', _) => (1, Element::O, true),
            (b'p', _) => (1, Element::P, true),
            (b's', _) => (1, Element::S, true),
            (b'*', _) => return Err(self.error("wildcard atoms are not supported")),
            _ => {
                let ch = self.notation[self.pos..].chars().next().unwrap_or('?');
                return Err(self.error(format!("unexpected character '{ch}'")));
            }
        };
        self.pos += len;
        Ok(Atom {
            aromatic,
            ..Atom::new(element)
        })
    }

    fn bracket_atom(&mut self) -> Result<Atom, Error> {
        let body_start = self.pos + 1;
        let close = self.src[body_start..]
            .iter()
            .position(|&b| b == b']')
            .map(|offset| body_start + offset)
            .ok_or_else(|| self.error("unclosed bracket atom"))?;
        let body = &self.src[body_start..close];
        let atom = parse_bracket(body).map_err(|details| self.error(details))?;
        self.pos = close + 1;
        Ok(atom)
    }
}

fn parse_bracket(body: &[u8]) -> Result<Atom, String> {
    let mut i = 0;

    let isotope = take_number(body, &mut i);

    let (element, aromatic) = bracket_symbol(body, &mut i)?;
    if aromatic && !element.can_be_aromatic() {
        return Err(format!("element {element} cannot be aromatic"));
    }

    while body.get(i) == Some(&b'@') {
        i += 1;
    }

    let mut hydrogens = 0u8;
    if body.get(i) == Some(&b'H') {
        i += 1;
        hydrogens = match take_number(body, &mut i) {
            Some(n) => u8::try_from(n).map_err(|_| "hydrogen count out of range".to_string())?,
            None => 1,
        };
    }

    let mut charge: i32 = 0;
    if let Some(&sign @ (b'+' | b'-')) = body.get(i) {
        let unit = if sign == b'+' { 1 } else { -1 };
        i += 1;
        if let Some(n) = take_number(body, &mut i) {
            charge = unit * n as i32;
        } else {
            charge = unit;
            while body.get(i) == Some(&sign) {
                charge += unit;
                i += 1;
            }
        }
    }
    let formal_charge = i8::try_from(charge).map_err(|_| "formal charge out of range".to_string())?;

    if body.get(i) == Some(&b':') {
        i += 1;
        if take_number(body, &mut i).is_none() {
            return Err("atom class must be numeric".to_string());
        }
    }

    if i != body.len() {
        return Err(format!(
            "unexpected '{}' in bracket atom",
            String::from_utf8_lossy(&body[i..])
        ));
    }

    Ok(Atom {
        element,
        formal_charge,
        isotope: isotope.and_then(|n| u16::try_from(n).ok()),
        aromatic,
        explicit_hydrogens: hydrogens,
        implicit_hydrogens: 0,
        no_implicit: true,
    })
}

fn bracket_symbol(body: &[u8], i: &mut usize) -> Result<(Element, bool), String> {
    let first = *body.get(*i).ok_or("missing element symbol")?;
    let second = body.get(*i + 1).copied();

    if first.is_ascii_uppercase() {
        if let Some(lower @ b'a'..=b'z') = second {
            let two = [first, lower];
            if let Ok(el) = std::str::from_utf8(&two).map_err(|_| ()).and_then(|s| {
                Element::from_str(s).map_err(|_| ())
            }) {
                *i += 2;
                return Ok((el, false));
            }
        }
        let one = (first as char).to_string();
        let el = Element::from_str(&one).map_err(|e| e.to_string())?;
        *i += 1;
        return Ok((el, false));
    }

    match (first, second) {
        (b's', Some(b'e')) => {
            *i += 2;
            Ok((Element::Se, true))
        }
        (b'a', Some(b's')) => {
            *i += 2;
            Ok((Element::As, true))
        }
        (b'b' | b'c' | b'n' | b'o' | b'p' | b's', _) => {
            *i += 1;
            let upper = (first.to_ascii_uppercase() as char).to_string();
            let el = Element::from_str(&upper).map_err(|e| e.to_string())?;
            Ok((el, true))
        }
        _ => Err(format!("invalid element symbol '{}'", first as char)),
    }
}

fn take_number(body: &[u8], i: &mut usize) -> Option<u32> {
    let start = *i;
    let mut value: u32 = 0;
    while let Some(d) = body.get(*i).filter(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(u32::from(d - b'0'));
        *i += 1;
    }
    (*i > start).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_ethanol_chain() {
        let mol = parse("CCO").expect("parse ethanol");
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.atoms[2].element, Element::O);
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Single));
    }

    #[test]
    fn parses_aromatic_ring_closure() {
        let mol = parse("c1ccccc1").expect("parse benzene");
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        assert!(mol.atoms.iter().all(|a| a.aromatic));
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
    }

    #[test]
    fn parses_branches_and_explicit_orders() {
        let mol = parse("CC(=O)O").expect("parse acetic acid");
        assert_eq!(mol.atom_count(), 4);
        let carbonyl = mol.bond_between(1, 2).unwrap();
        assert_eq!(carbonyl.order, BondOrder::Double);
        assert!(mol.bond_between(1, 3).is_some());
        assert!(mol.bond_between(2, 3).is_none());
    }

    #[test]
    fn parses_two_letter_organic_and_percent_rings() {
        let mol = parse("ClC%12CC%12Br").expect("parse ring");
        assert_eq!(mol.atoms[0].element, Element::Cl);
        assert_eq!(mol.atoms[4].element, Element::Br);
        assert!(mol.bond_between(1, 3).is_some());
    }

    #[test]
    fn parses_bracket_atoms() {
        let mol = parse("[NH4+].[13CH3-].c1cc[nH]c1.[Fe+2]").expect("parse brackets");
        let n = &mol.atoms[0];
        assert_eq!(n.element, Element::N);
        assert_eq!(n.explicit_hydrogens, 4);
        assert_eq!(n.formal_charge, 1);
        assert!(n.no_implicit);

        let c = &mol.atoms[1];
        assert_eq!(c.isotope, Some(13));
        assert_eq!(c.formal_charge, -1);
        assert_eq!(c.explicit_hydrogens, 3);

        let pyrrole_n = &mol.atoms[5];
        assert!(pyrrole_n.aromatic);
        assert_eq!(pyrrole_n.explicit_hydrogens, 1);

        let fe = mol.atoms.last().unwrap();
        assert_eq!(fe.element, Element::Fe);
        assert_eq!(fe.formal_charge, 2);
        assert_eq!(mol.bond_count(), 5);
    }

    #[test]
    fn ignores_trailing_name_and_stereo() {
        let mol = parse("F/C=C\\F  difluoroethene").expect("parse stereo");
        assert_eq!(mol.atom_count(), 4);
        let mol = parse("N[C@@H](C)C(=O)O").expect("parse chiral");
        assert_eq!(mol.atoms[1].explicit_hydrogens, 1);
    }

    #[test]
    fn empty_input_is_empty_molecule() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in [
            "not-a-molecule",
            "C1CC",
            "CC(C",
            "CC)C",
            "C==C",
            "C=",
            "[C",
            "[Xq]",
            "*C",
            "C%1",
            "C1C1",
        ] {
            assert!(parse(bad).is_err(), "expected '{bad}' to be rejected");
        }
    }

    #[test]
    fn notation_error_reports_column() {
        let err = parse("CCX").unwrap_err();
        match err {
            Error::Notation { column, .. } => assert_eq!(column, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_smi_lines_with_optional_ids() {
        let data = "# header\nCCO ethanol\n\nc1ccccc1\nCC(=O)O acetic acid\n";
        let entries = read_smi(Cursor::new(data)).expect("read smi");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id.as_deref(), Some("ethanol"));
        assert_eq!(entries[0].line, 2);
        assert_eq!(entries[1].id, None);
        assert_eq!(entries[2].id.as_deref(), Some("acetic acid"));
    }
}
