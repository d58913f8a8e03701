use crate::model::types::{BondOrder, Element};
use std::str::FromStr;

/// Resolves a CTfile atom symbol, accepting upper-case spellings such as `CL`.
pub fn element_from_ctfile(token: &str) -> Option<Element> {
    let token = token.trim();
    if let Ok(el) = Element::from_str(token) {
        return Some(el);
    }
    let mut chars = token.chars();
    let first = chars.next()?.to_ascii_uppercase();
    let rest: String = chars.map(|c| c.to_ascii_lowercase()).collect();
    Element::from_str(&format!("{first}{rest}")).ok()
}

pub fn bond_order_from_ctfile(value: i32) -> Option<BondOrder> {
    match value {
        1 => Some(BondOrder::Single),
        2 => Some(BondOrder::Double),
        3 => Some(BondOrder::Triple),
        4 => Some(BondOrder::Aromatic),
        _ => None,
    }
}

/// Decodes the legacy charge column of a V2000 atom line.
///
/// Code 4 (doublet radical) carries no charge.
pub fn charge_from_ctfile(code: i32) -> Option<i8> {
    match code {
        0 | 4 => Some(0),
        1 => Some(3),
        2 => Some(2),
        3 => Some(1),
        5 => Some(-1),
        6 => Some(-2),
        7 => Some(-3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctfile_symbols_tolerate_case() {
        assert_eq!(element_from_ctfile("C"), Some(Element::C));
        assert_eq!(element_from_ctfile(" Cl "), Some(Element::Cl));
        assert_eq!(element_from_ctfile("BR"), Some(Element::Br));
        assert_eq!(element_from_ctfile("Xx"), None);
        assert_eq!(element_from_ctfile(""), None);
    }

    #[test]
    fn ctfile_bond_orders() {
        assert_eq!(bond_order_from_ctfile(1), Some(BondOrder::Single));
        assert_eq!(bond_order_from_ctfile(4), Some(BondOrder::Aromatic));
        assert_eq!(bond_order_from_ctfile(8), None);
    }

    #[test]
    fn ctfile_charge_codes() {
        assert_eq!(charge_from_ctfile(3), Some(1));
        assert_eq!(charge_from_ctfile(5), Some(-1));
        assert_eq!(charge_from_ctfile(4), Some(0));
        assert_eq!(charge_from_ctfile(9), None);
    }
}
