use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
    types::BondOrder,
};
use std::io::BufRead;

/// One record of a multi-record SDF file.
///
/// A malformed record carries its error; the reader resynchronizes on the
/// next `$$$$` delimiter.
#[derive(Debug)]
pub struct SdfRecord {
    /// Zero-based position of the record in the file.
    pub index: usize,
    /// Line number of the record's first line.
    pub line: usize,
    pub molecule: Result<Molecule, Error>,
}

/// Streaming reader over `$$$$`-delimited V2000 records.
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes only affect the
/// record that contains them.
pub struct Reader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    index: usize,
    done: bool,
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            index: 0,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }
        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    fn next_block(&mut self) -> Result<Option<(usize, Vec<(usize, String)>)>, Error> {
        let start = self.line_no + 1;
        let mut block = Vec::new();
        while let Some(content) = self.read_line()? {
            if content.trim() == "$$$$" {
                return Ok(Some((start, block)));
            }
            block.push((self.line_no, content));
        }
        if block.iter().all(|(_, l)| l.trim().is_empty()) {
            Ok(None)
        } else {
            Ok(Some((start, block)))
        }
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = SdfRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let index = self.index;
        match self.next_block() {
            Ok(Some((line, block))) => {
                self.index += 1;
                Some(SdfRecord {
                    index,
                    line,
                    molecule: parse_record(&block),
                })
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                self.index += 1;
                Some(SdfRecord {
                    index,
                    line: self.line_no + 1,
                    molecule: Err(e),
                })
            }
        }
    }
}

fn parse_record(lines: &[(usize, String)]) -> Result<Molecule, Error> {
    let first_line = lines.first().map(|(ln, _)| *ln).unwrap_or(1);
    if lines.len() < 4 {
        return Err(Error::parse(
            Format::Sdf,
            first_line,
            "SDF record must contain a header block and a counts line",
        ));
    }

    let counts_line_no = lines[3].0;
    let counts_line = &lines[3].1;
    if counts_line.contains("V3000") {
        return Err(Error::parse(
            Format::Sdf,
            counts_line_no,
            "V3000 is not supported",
        ));
    }

    let (atom_count, bond_count) = parse_counts(counts_line, counts_line_no)?;
    let atom_start = 4;
    let bond_start = atom_start + atom_count;
    let props_start = bond_start + bond_count;

    if lines.len() < props_start {
        return Err(Error::parse(
            Format::Sdf,
            lines.last().map(|(ln, _)| *ln).unwrap_or(counts_line_no),
            "SDF record ended before atoms/bonds were fully specified",
        ));
    }

    let mut atoms = parse_atoms(&lines[atom_start..bond_start])?;
    let bonds = parse_bonds(&lines[bond_start..props_start], &mut atoms)?;

    let mut molecule = Molecule {
        title: lines[0].1.trim().to_string(),
        atoms,
        bonds,
        properties: Vec::new(),
    };

    let data_start = parse_properties_block(&lines[props_start..], &mut molecule)?;
    molecule.properties = parse_data_items(&lines[props_start + data_start..]);
    Ok(molecule)
}

/// Reads leading 3-column integer fields, falling back to whitespace
/// splitting for writers that do not honour the fixed layout.
fn integer_fields(line: &str, count: usize) -> Option<Vec<i64>> {
    let fixed: Option<Vec<i64>> = (0..count)
        .map(|k| line.get(k * 3..k * 3 + 3)?.trim().parse().ok())
        .collect();
    fixed.or_else(|| {
        let tokens: Vec<i64> = line
            .split_whitespace()
            .take(count)
            .map(|tok| tok.parse().ok())
            .collect::<Option<_>>()?;
        (tokens.len() == count).then_some(tokens)
    })
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let fields = integer_fields(line, 2).ok_or_else(|| {
        Error::parse(
            Format::Sdf,
            line_no,
            "counts line must contain atom and bond counts",
        )
    })?;
    let atoms = usize::try_from(fields[0])
        .map_err(|_| Error::parse(Format::Sdf, line_no, "invalid atom count"))?;
    let bonds = usize::try_from(fields[1])
        .map_err(|_| Error::parse(Format::Sdf, line_no, "invalid bond count"))?;
    Ok((atoms, bonds))
}

fn parse_atoms(lines: &[(usize, String)]) -> Result<Vec<Atom>, Error> {
    let mut atoms = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        if !raw.is_ascii() {
            return Err(Error::parse(Format::Sdf, *ln, "atom line contains non-ASCII text"));
        }
        let padded = format!("{raw:<42}");
        for (range, axis) in [(0..10, 'x'), (10..20, 'y'), (20..30, 'z')] {
            padded[range].trim().parse::<f64>().map_err(|_| {
                Error::parse(Format::Sdf, *ln, format!("invalid {axis} coordinate in atom line"))
            })?;
        }
        let symbol = padded[31..34].trim();
        let element = util::element_from_ctfile(symbol).ok_or_else(|| {
            Error::parse(Format::Sdf, *ln, format!("unknown element symbol '{symbol}'"))
        })?;

        let mut atom = Atom::new(element);
        let charge_code = padded[36..39].trim();
        if !charge_code.is_empty() {
            let code = charge_code
                .parse::<i32>()
                .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid charge field"))?;
            atom.formal_charge = util::charge_from_ctfile(code)
                .ok_or_else(|| Error::parse(Format::Sdf, *ln, "unsupported charge code"))?;
        }
        atoms.push(atom);
    }
    Ok(atoms)
}

fn parse_bonds(lines: &[(usize, String)], atoms: &mut [Atom]) -> Result<Vec<Bond>, Error> {
    let atom_count = atoms.len();
    let mut bonds = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let fields = integer_fields(raw, 3)
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "invalid bond line"))?;
        let (a1, a2) = (fields[0], fields[1]);
        let order_val = i32::try_from(fields[2]).unwrap_or(0);

        let order = util::bond_order_from_ctfile(order_val)
            .ok_or_else(|| Error::parse(Format::Sdf, *ln, "unsupported bond order in bond line"))?;

        let in_range = |a: i64| a >= 1 && (a as usize) <= atom_count;
        if !in_range(a1) || !in_range(a2) || a1 == a2 {
            return Err(Error::parse(
                Format::Sdf,
                *ln,
                "bond references atom outside declared range",
            ));
        }
        let (i, j) = (a1 as usize - 1, a2 as usize - 1);
        if order == BondOrder::Aromatic {
            atoms[i].aromatic = true;
            atoms[j].aromatic = true;
        }
        bonds.push(Bond::new(i, j, order));
    }
    Ok(bonds)
}

/// Applies `M  CHG` and `M  ISO` lines; returns the offset just past `M  END`.
fn parse_properties_block(
    lines: &[(usize, String)],
    molecule: &mut Molecule,
) -> Result<usize, Error> {
    for (offset, (ln, raw)) in lines.iter().enumerate() {
        let line = raw.trim_end();
        if line.starts_with("M  END") {
            return Ok(offset + 1);
        }
        let is_chg = line.starts_with("M  CHG");
        let is_iso = line.starts_with("M  ISO");
        if !is_chg && !is_iso {
            continue;
        }
        let values: Vec<i32> = line
            .get(6..)
            .unwrap_or("")
            .split_whitespace()
            .map(|tok| tok.parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|_| Error::parse(Format::Sdf, *ln, "invalid property line"))?;
        let Some((&count, pairs)) = values.split_first() else {
            continue;
        };
        if count < 0 || pairs.len() < count as usize * 2 {
            return Err(Error::parse(Format::Sdf, *ln, "truncated property line"));
        }
        for pair in pairs.chunks_exact(2).take(count as usize) {
            let atom = usize::try_from(pair[0] - 1)
                .ok()
                .and_then(|idx| molecule.atoms.get_mut(idx))
                .ok_or_else(|| Error::parse(Format::Sdf, *ln, "property references unknown atom"))?;
            if is_chg {
                atom.formal_charge = i8::try_from(pair[1])
                    .map_err(|_| Error::parse(Format::Sdf, *ln, "charge out of range"))?;
            } else {
                atom.isotope = Some(
                    u16::try_from(pair[1])
                        .map_err(|_| Error::parse(Format::Sdf, *ln, "isotope out of range"))?,
                );
            }
        }
    }
    // Some writers omit `M  END` when there is no data section.
    Ok(lines.len())
}

fn parse_data_items(lines: &[(usize, String)]) -> Vec<(String, String)> {
    let mut items = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for (_, raw) in lines {
        let line = raw.trim_end();
        if line.starts_with('>') {
            if let Some((name, values)) = current.take() {
                items.push((name, values.join("\n")));
            }
            current = data_header_name(line).map(|name| (name, Vec::new()));
            continue;
        }
        if line.is_empty() {
            if let Some((name, values)) = current.take() {
                items.push((name, values.join("\n")));
            }
        } else if let Some((_, values)) = current.as_mut() {
            values.push(line.to_string());
        }
    }
    if let Some((name, values)) = current {
        items.push((name, values.join("\n")));
    }
    items
}

fn data_header_name(line: &str) -> Option<String> {
    let open = line.find('<')?;
    let close = line[open + 1..].find('>')? + open + 1;
    Some(line[open + 1..close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;
    use std::io::Cursor;

    fn read_all(data: impl AsRef<[u8]>) -> Result<Vec<Molecule>, Error> {
        Reader::new(Cursor::new(data.as_ref()))
            .map(|record| record.molecule)
            .collect()
    }

    const ETHANOL_AND_ACETATE: &str = "\
ethanol
  fp-forge

  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.5000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.0000    1.2000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  1  0
M  END
> <MW>
46.07

> <NAME>
Ethyl alcohol
grain alcohol

$$$$
acetate
  fp-forge

  4  3  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.5000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.0000    1.2000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
    2.0000   -1.2000    0.0000 O   0  5  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  2  0
  2  4  1  0
M  END
> <MW>
59.04

$$$$
";

    #[test]
    fn reads_multiple_records_with_data_items() {
        let records: Vec<_> = Reader::new(Cursor::new(ETHANOL_AND_ACETATE)).collect();
        assert_eq!(records.len(), 2);

        let ethanol = records[0].molecule.as_ref().expect("ethanol parses");
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].line, 1);
        assert_eq!(ethanol.title, "ethanol");
        assert_eq!(ethanol.atom_count(), 3);
        assert_eq!(ethanol.bond_count(), 2);
        assert_eq!(ethanol.property("MW"), Some("46.07"));
        assert_eq!(ethanol.property("NAME"), Some("Ethyl alcohol\ngrain alcohol"));

        let acetate = records[1].molecule.as_ref().expect("acetate parses");
        assert_eq!(records[1].index, 1);
        assert_eq!(acetate.atoms[3].formal_charge, -1);
        assert_eq!(acetate.bond_between(1, 2).unwrap().order, BondOrder::Double);
        assert_eq!(acetate.properties, vec![("MW".to_string(), "59.04".to_string())]);
    }

    #[test]
    fn malformed_record_does_not_stop_the_stream() {
        let data = format!(
            "broken\n\n\n  2  1  0  0  0  0  0  0  0  0999 V2000\n    0.0 Zz\n$$$$\n{ETHANOL_AND_ACETATE}"
        );
        let records: Vec<_> = Reader::new(Cursor::new(data)).collect();
        assert_eq!(records.len(), 3);
        assert!(records[0].molecule.is_err());
        assert!(records[1].molecule.is_ok());
        assert!(records[2].molecule.is_ok());
        assert_eq!(records[1].index, 1);
    }

    #[test]
    fn non_utf8_data_item_keeps_later_records() {
        let latin1 = ETHANOL_AND_ACETATE.replace("Ethyl alcohol", "Soci#t#");
        let mut data: Vec<u8> = latin1
            .bytes()
            .map(|b| if b == b'#' { 0xe9 } else { b })
            .collect();
        data.extend_from_slice(ETHANOL_AND_ACETATE.as_bytes());

        let records: Vec<_> = Reader::new(Cursor::new(data)).collect();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.molecule.is_ok()));
        assert_eq!(records[3].index, 3);

        let ethanol = records[0].molecule.as_ref().unwrap();
        assert_eq!(ethanol.property("NAME"), Some("Soci\u{fffd}t\u{fffd}\ngrain alcohol"));
    }

    #[test]
    fn non_utf8_atom_line_rejects_only_its_record() {
        let mut data = ETHANOL_AND_ACETATE.as_bytes().to_vec();
        let at = data.windows(3).position(|w| w == b" O ").unwrap() + 1;
        data[at] = 0xd6;
        let records: Vec<_> = Reader::new(Cursor::new(data)).collect();
        assert_eq!(records.len(), 2);
        assert!(records[0].molecule.is_err());
        assert!(records[1].molecule.is_ok());
    }

    #[test]
    fn charge_and_isotope_property_lines_override_atom_block() {
        let data = "\
ammonium
  fp-forge

  1  0  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 N   0  0  0  0  0  0  0  0  0  0  0  0
M  CHG  1   1   1
M  ISO  1   1  15
M  END
$$$$
";
        let mols = read_all(data).expect("read ammonium");
        assert_eq!(mols.len(), 1);
        assert_eq!(mols[0].atoms[0].element, Element::N);
        assert_eq!(mols[0].atoms[0].formal_charge, 1);
        assert_eq!(mols[0].atoms[0].isotope, Some(15));
        assert!(mols[0].properties.is_empty());
    }

    #[test]
    fn aromatic_bonds_flag_their_atoms() {
        let data = "\
pair
  fp-forge

  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.4000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  4  0
M  END
$$$$
";
        let mols = read_all(data).expect("read aromatic pair");
        assert!(mols[0].atoms.iter().all(|a| a.aromatic));
    }

    #[test]
    fn rejects_v3000_and_bad_bond_references() {
        let v3000 = "x\n\n\n  0  0  0     0  0            999 V3000\nM  END\n$$$$\n";
        assert!(read_all(v3000).is_err());

        let bad_bond = "\
x


  1  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
M  END
$$$$
";
        assert!(read_all(bad_bond).is_err());
    }

    #[test]
    fn missing_trailing_delimiter_still_yields_last_record() {
        let data = ETHANOL_AND_ACETATE.trim_end().trim_end_matches("$$$$");
        let records: Vec<_> = Reader::new(Cursor::new(data)).collect();
        assert_eq!(records.len(), 2);
        assert!(records[1].molecule.is_ok());
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert_eq!(Reader::new(Cursor::new("")).count(), 0);
        assert_eq!(Reader::new(Cursor::new("\n\n")).count(), 0);
    }
}
