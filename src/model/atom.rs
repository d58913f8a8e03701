use super::types::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub element: Element,
    pub formal_charge: i8,
    pub isotope: Option<u16>,
    pub aromatic: bool,
    /// Hydrogens stated explicitly (bracket counts or folded `[H]` atoms).
    pub explicit_hydrogens: u8,
    /// Hydrogens derived from the valence model during normalization.
    pub implicit_hydrogens: u8,
    /// Bracket atoms never receive implicit hydrogens.
    pub no_implicit: bool,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            formal_charge: 0,
            isotope: None,
            aromatic: false,
            explicit_hydrogens: 0,
            implicit_hydrogens: 0,
            no_implicit: false,
        }
    }

    pub fn aromatic(element: Element) -> Self {
        Self {
            aromatic: true,
            ..Self::new(element)
        }
    }

    #[inline]
    pub fn total_hydrogens(&self) -> u8 {
        self.explicit_hydrogens + self.implicit_hydrogens
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.element == Element::H
    }
}
