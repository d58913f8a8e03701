use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Hints for the first typed error found in the chain, or text-based
/// fallbacks when none is recognized.
fn hints_for(err: &Error) -> Vec<String> {
    let mut hints = HintCollector::default();

    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<fp_forge::PipelineError>() {
            hints.pipeline(e);
        } else if let Some(e) = cause.downcast_ref::<fp_forge::ToolkitError>() {
            hints.toolkit(e);
        } else if let Some(e) = cause.downcast_ref::<fp_forge::io::Error>() {
            hints.parse(e);
        } else if let Some(e) = cause.downcast_ref::<std::io::Error>() {
            hints.std_io(e);
        } else {
            continue;
        }
        break;
    }

    if hints.0.is_empty() {
        hints.fallback(err);
    }
    hints.0
}

#[derive(Default)]
struct HintCollector(Vec<String>);

impl HintCollector {
    fn add(&mut self, hint: impl Into<String>) {
        self.0.push(hint.into());
    }

    fn pipeline(&mut self, err: &fp_forge::PipelineError) {
        use fp_forge::PipelineError as E;

        match err {
            E::UnknownFingerprintType(name) => {
                self.add(format!("'{name}' is not a known fingerprint type"));
                self.add("Circular: ecfp4, circular, circular-hash, morgan");
                self.add("Combined: apdp, combined, combined-pair-torsion-hash");
            }
            E::InvalidBitWidth(_) => {
                self.add("Use --bits with a positive width such as 1024 or 2048");
            }
            E::LengthMismatch { .. } => {
                self.add("Every notation needs exactly one identifier");
            }
            E::MissingInput { .. } => {
                self.add("Check the path spelling and ensure the file exists");
            }
            E::UnsupportedFileType(_) => {
                self.add("SDF input supports the circular (ecfp4) fingerprint only");
                self.add("Convert the records to SMILES to use the combined fingerprint");
            }
            E::ConfigRead { source, .. } => self.std_io(source),
            E::Config(_) => {
                self.add("Fingerprint settings file has invalid TOML or unknown keys");
                self.add("Allowed keys: fingerprint_type, n_bits, radius, verbose");
            }
            E::Toolkit(e) => self.toolkit(e),
        }
    }

    fn toolkit(&mut self, err: &fp_forge::ToolkitError) {
        use fp_forge::ToolkitError as E;

        match err {
            E::Io(source) => self.std_io(source),
            E::Parse(e) => self.parse(e),
            E::Valence { .. } => {
                self.add("Check charges and hydrogen counts on the reported atom");
            }
            E::Structure(_) | E::Fingerprint(_) => {
                self.add("This record cannot be fingerprinted; inspect its structure");
            }
        }
    }

    fn parse(&mut self, err: &fp_forge::io::Error) {
        use fp_forge::io::{Error as E, Format};

        match err {
            E::Io { source } => self.std_io(source),
            E::Parse { format, line, .. } => {
                self.add(format!("Inspect the {format} input around line {line}"));
                match format {
                    Format::Sdf => {
                        self.add("SDF: only V2000 records are supported");
                        self.add("SDF: records must be separated by '$$$$'");
                    }
                    Format::Smiles => {
                        self.add("SMILES files hold one 'SMILES [ID]' entry per line");
                    }
                }
            }
            E::Notation { column, .. } => {
                self.add(format!("The notation is malformed at column {column}"));
            }
        }
    }

    fn std_io(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }
            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }
            ErrorKind::InvalidData => {
                self.add("File contains invalid or non-UTF-8 data");
            }
            ErrorKind::BrokenPipe => {
                self.add("Output consumer terminated early (e.g. piping to `head`)");
            }
            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn fallback(&mut self, err: &Error) {
        let text = err
            .chain()
            .map(|cause| cause.to_string().to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        if text.contains("terminal") || text.contains("stdin") {
            self.add("Provide input via -i/--input or pipe data to stdin");
        } else if text.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}
