use std::io::{self, Write};

use fp_forge::{FingerprintConfig, FingerprintType, ResultSet};

use crate::util::text::truncate;

const INDENT: &str = "      ";
const KEY_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 34;

pub fn print_run_summary(results: &ResultSet, config: &FingerprintConfig) {
    let total = results.len() + results.rejected;
    let density = if results.matrix.is_empty() {
        0.0
    } else {
        results.matrix.iter().map(|&b| f64::from(b)).sum::<f64>() / results.matrix.len() as f64
    };

    let mut rows = vec![
        ("Strategy", describe_strategy(config)),
        ("Width", format!("{} bits", config.n_bits)),
        ("Records", total.to_string()),
        ("Accepted", results.len().to_string()),
        ("Rejected", results.rejected.to_string()),
        ("Bit density", format!("{:.2}%", density * 100.0)),
    ];
    if !results.metadata.columns().is_empty() {
        rows.push(("Metadata", results.metadata.columns().join(", ")));
    }

    let mut out = io::stderr().lock();
    print_kv_table(&mut out, "Run Summary", &rows);
}

fn describe_strategy(config: &FingerprintConfig) -> String {
    match config.fingerprint_type {
        FingerprintType::Circular => format!("ecfp4 (radius {})", config.radius),
        FingerprintType::Combined => "apdp (pairs + torsions)".to_string(),
    }
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let k_line = "─".repeat(KEY_WIDTH + 2);
    let v_line = "─".repeat(VALUE_WIDTH + 2);

    let _ = writeln!(out, "{INDENT}┌─ {title} ─┐");
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");
    for (key, value) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<kw$} │ {:>vw$} │",
            truncate(key, KEY_WIDTH),
            truncate(value, VALUE_WIDTH),
            kw = KEY_WIDTH,
            vw = VALUE_WIDTH
        );
    }
    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_have_constant_width() {
        let rows = vec![
            ("Strategy", "ecfp4 (radius 2)".to_string()),
            ("Metadata", "a very long list of metadata columns that overflows".to_string()),
        ];
        let mut out = Vec::new();
        print_kv_table(&mut out, "Run Summary", &rows);
        let text = String::from_utf8(out).unwrap();
        let widths: Vec<usize> = text.lines().skip(1).map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert!(text.contains("…"));
    }

    #[test]
    fn strategy_descriptions() {
        let circular = FingerprintConfig::default().with_radius(3);
        assert_eq!(describe_strategy(&circular), "ecfp4 (radius 3)");
        let combined = FingerprintConfig::new(FingerprintType::Combined);
        assert!(describe_strategy(&combined).starts_with("apdp"));
    }
}
