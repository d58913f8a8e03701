use crate::io::error::Error;
use crate::pipeline::ResultSet;
use std::borrow::Cow;
use std::io::Write;

/// Writes `substance_id`, the metadata columns and `bit_0..bit_{n-1}`.
///
/// Missing metadata values are written as empty fields.
pub fn write<W: Write>(mut writer: W, results: &ResultSet) -> Result<(), Error> {
    let mut header: Vec<Cow<'_, str>> = vec![Cow::Borrowed("substance_id")];
    header.extend(results.metadata.columns().iter().map(|c| quote(c)));
    header.extend((0..results.n_bits()).map(|k| Cow::Owned(format!("bit_{k}"))));
    writeln!(writer, "{}", header.join(","))?;

    for (row, id) in results.ids.iter().enumerate() {
        write!(writer, "{}", quote(id))?;
        for value in results.metadata.row(row) {
            write!(writer, ",{}", value.as_deref().map(quote).unwrap_or_default())?;
        }
        for bit in results.matrix.row(row) {
            write!(writer, ",{bit}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
