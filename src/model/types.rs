use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order string: '{0}'")]
pub struct ParseBondOrderError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
    Rb,
    Sr,
    Y,
    Zr,
    Nb,
    Mo,
    Tc,
    Ru,
    Rh,
    Pd,
    Ag,
    Cd,
    In,
    Sn,
    Sb,
    Te,
    I,
    Xe,
    Cs,
    Ba,
    La,
    Ce,
    Pr,
    Nd,
    Pm,
    Sm,
    Eu,
    Gd,
    Tb,
    Dy,
    Ho,
    Er,
    Tm,
    Yb,
    Lu,
    Hf,
    Ta,
    W,
    Re,
    Os,
    Ir,
    Pt,
    Au,
    Hg,
    Tl,
    Pb,
    Bi,
    Po,
    At,
    Rn,
    Fr,
    Ra,
    Ac,
    Th,
    Pa,
    U,
    Np,
    Pu,
    Am,
    Cm,
    Bk,
    Cf,
    Es,
    Fm,
    Md,
    No,
    Lr,
    Rf,
    Db,
    Sg,
    Bh,
    Hs,
    Mt,
    Ds,
    Rg,
    Cn,
    Nh,
    Fl,
    Mc,
    Lv,
    Ts,
    Og = 118,
}

/// Elements in atomic-number order with their symbols.
#[rustfmt::skip]
const ELEMENTS: [(Element, &str); 118] = [
    (Element::H, "H"), (Element::He, "He"), (Element::Li, "Li"), (Element::Be, "Be"), (Element::B, "B"), (Element::C, "C"),
    (Element::N, "N"), (Element::O, "O"), (Element::F, "F"), (Element::Ne, "Ne"), (Element::Na, "Na"), (Element::Mg, "Mg"),
    (Element::Al, "Al"), (Element::Si, "Si"), (Element::P, "P"), (Element::S, "S"), (Element::Cl, "Cl"), (Element::Ar, "Ar"),
    (Element::K, "K"), (Element::Ca, "Ca"), (Element::Sc, "Sc"), (Element::Ti, "Ti"), (Element::V, "V"), (Element::Cr, "Cr"),
    (Element::Mn, "Mn"), (Element::Fe, "Fe"), (Element::Co, "Co"), (Element::Ni, "Ni"), (Element::Cu, "Cu"), (Element::Zn, "Zn"),
    (Element::Ga, "Ga"), (Element::Ge, "Ge"), (Element::As, "As"), (Element::Se, "Se"), (Element::Br, "Br"), (Element::Kr, "Kr"),
    (Element::Rb, "Rb"), (Element::Sr, "Sr"), (Element::Y, "Y"), (Element::Zr, "Zr"), (Element::Nb, "Nb"), (Element::Mo, "Mo"),
    (Element::Tc, "Tc"), (Element::Ru, "Ru"), (Element::Rh, "Rh"), (Element::Pd, "Pd"), (Element::Ag, "Ag"), (Element::Cd, "Cd"),
    (Element::In, "In"), (Element::Sn, "Sn"), (Element::Sb, "Sb"), (Element::Te, "Te"), (Element::I, "I"), (Element::Xe, "Xe"),
    (Element::Cs, "Cs"), (Element::Ba, "Ba"), (Element::La, "La"), (Element::Ce, "Ce"), (Element::Pr, "Pr"), (Element::Nd, "Nd"),
    (Element::Pm, "Pm"), (Element::Sm, "Sm"), (Element::Eu, "Eu"), (Element::Gd, "Gd"), (Element::Tb, "Tb"), (Element::Dy, "Dy"),
    (Element::Ho, "Ho"), (Element::Er, "Er"), (Element::Tm, "Tm"), (Element::Yb, "Yb"), (Element::Lu, "Lu"), (Element::Hf, "Hf"),
    (Element::Ta, "Ta"), (Element::W, "W"), (Element::Re, "Re"), (Element::Os, "Os"), (Element::Ir, "Ir"), (Element::Pt, "Pt"),
    (Element::Au, "Au"), (Element::Hg, "Hg"), (Element::Tl, "Tl"), (Element::Pb, "Pb"), (Element::Bi, "Bi"), (Element::Po, "Po"),
    (Element::At, "At"), (Element::Rn, "Rn"), (Element::Fr, "Fr"), (Element::Ra, "Ra"), (Element::Ac, "Ac"), (Element::Th, "Th"),
    (Element::Pa, "Pa"), (Element::U, "U"), (Element::Np, "Np"), (Element::Pu, "Pu"), (Element::Am, "Am"), (Element::Cm, "Cm"),
    (Element::Bk, "Bk"), (Element::Cf, "Cf"), (Element::Es, "Es"), (Element::Fm, "Fm"), (Element::Md, "Md"), (Element::No, "No"),
    (Element::Lr, "Lr"), (Element::Rf, "Rf"), (Element::Db, "Db"), (Element::Sg, "Sg"), (Element::Bh, "Bh"), (Element::Hs, "Hs"),
    (Element::Mt, "Mt"), (Element::Ds, "Ds"), (Element::Rg, "Rg"), (Element::Cn, "Cn"), (Element::Nh, "Nh"), (Element::Fl, "Fl"),
    (Element::Mc, "Mc"), (Element::Lv, "Lv"), (Element::Ts, "Ts"), (Element::Og, "Og"),
];

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn from_atomic_number(z: u8) -> Option<Self> {
        let idx = usize::from(z).checked_sub(1)?;
        ELEMENTS.get(idx).map(|(el, _)| *el)
    }

    pub fn symbol(&self) -> &'static str {
        ELEMENTS[self.atomic_number() as usize - 1].1
    }

    /// Elements that may be written without brackets in SMILES.
    pub fn is_organic_subset(&self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::P
                | Element::S
                | Element::F
                | Element::Cl
                | Element::Br
                | Element::I
        )
    }

    /// Elements that may carry the aromatic flag.
    pub fn can_be_aromatic(&self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::P
                | Element::S
                | Element::Se
                | Element::As
        )
    }

    /// Permitted valences of the neutral element, ascending.
    ///
    /// An empty slice means the element has no valence model and is never
    /// given implicit hydrogens or checked.
    pub fn neutral_valences(&self) -> &'static [u8] {
        match self {
            Element::H => &[1],
            Element::B => &[3],
            Element::C | Element::Si | Element::Ge => &[4],
            Element::N => &[3],
            Element::P | Element::As => &[3, 5],
            Element::O => &[2],
            Element::S | Element::Se => &[2, 4, 6],
            Element::F | Element::Cl | Element::Br => &[1],
            Element::I => &[1, 3, 5],
            _ => &[],
        }
    }

    /// Permitted valences after accounting for a formal charge.
    pub fn valences(&self, charge: i8) -> Vec<u8> {
        let shift: i16 = match self {
            Element::N
            | Element::P
            | Element::As
            | Element::O
            | Element::S
            | Element::Se
            | Element::F
            | Element::Cl
            | Element::Br
            | Element::I => charge as i16,
            Element::B => -(charge as i16),
            _ => -(charge as i16).abs(),
        };
        self.neutral_valences()
            .iter()
            .filter_map(|&v| u8::try_from(v as i16 + shift).ok())
            .collect()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ELEMENTS
            .iter()
            .find(|(_, sym)| *sym == s)
            .map(|(el, _)| *el)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Integer valence contribution of a localized bond. Aromatic bonds
    /// count as one; the shared pi bond is resolved per atom.
    pub fn valence(&self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    /// Small stable code used when hashing bond environments.
    pub fn code(&self) -> u32 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 12,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" | "-" => Ok(BondOrder::Single),
            "double" | "2" | "=" => Ok(BondOrder::Double),
            "triple" | "3" | "#" => Ok(BondOrder::Triple),
            "aromatic" | "ar" | "4" | ":" => Ok(BondOrder::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("He").unwrap(), Element::He);
        assert_eq!(Element::from_str("Fe").unwrap(), Element::Fe);
        assert_eq!(Element::from_str("Og").unwrap(), Element::Og);
    }

    #[test]
    fn element_from_str_invalid_case() {
        let err = Element::from_str("h").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: 'h'");
    }

    #[test]
    fn symbol_table_matches_discriminants() {
        for z in 1..=118u8 {
            let el = Element::from_atomic_number(z).unwrap();
            assert_eq!(el.atomic_number(), z);
            assert_eq!(Element::from_str(el.symbol()).unwrap(), el);
        }
        assert_eq!(Element::Na.symbol(), "Na");
        assert_eq!(Element::Og.to_string(), "Og");
        assert!(Element::from_atomic_number(0).is_none());
        assert!(Element::from_atomic_number(119).is_none());
    }

    #[test]
    fn organic_subset_membership() {
        assert!(Element::C.is_organic_subset());
        assert!(Element::Cl.is_organic_subset());
        assert!(!Element::Se.is_organic_subset());
        assert!(!Element::Fe.is_organic_subset());
    }

    #[test]
    fn charged_valences_shift_by_group() {
        assert_eq!(Element::N.valences(0), vec![3]);
        assert_eq!(Element::N.valences(1), vec![4]);
        assert_eq!(Element::O.valences(-1), vec![1]);
        assert_eq!(Element::C.valences(-1), vec![3]);
        assert_eq!(Element::C.valences(1), vec![3]);
        assert_eq!(Element::B.valences(-1), vec![4]);
        assert_eq!(Element::Cl.valences(-1), vec![0]);
        assert!(Element::Fe.valences(2).is_empty());
    }

    #[test]
    fn bondorder_from_str_variants() {
        assert_eq!(BondOrder::from_str("single").unwrap(), BondOrder::Single);
        assert_eq!(BondOrder::from_str("1").unwrap(), BondOrder::Single);
        assert_eq!(BondOrder::from_str("Double").unwrap(), BondOrder::Double);
        assert_eq!(BondOrder::from_str("#").unwrap(), BondOrder::Triple);
        assert_eq!(BondOrder::from_str("AR").unwrap(), BondOrder::Aromatic);
        assert_eq!(BondOrder::from_str("4").unwrap(), BondOrder::Aromatic);
    }

    #[test]
    fn bondorder_from_str_invalid() {
        let err = BondOrder::from_str("quad").unwrap_err();
        assert_eq!(err.to_string(), "invalid bond order string: 'quad'");
    }

    #[test]
    fn bondorder_valence_and_code() {
        assert_eq!(BondOrder::Single.valence(), 1);
        assert_eq!(BondOrder::Double.valence(), 2);
        assert_eq!(BondOrder::Triple.valence(), 3);
        assert_eq!(BondOrder::Aromatic.valence(), 1);
        assert_eq!(BondOrder::Aromatic.code(), 12);
    }
}
