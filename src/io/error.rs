use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("invalid SMILES '{notation}': {details} (at column {column})")]
    Notation {
        notation: String,
        column: usize,
        details: String,
    },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn notation(notation: &str, column: usize, details: impl Into<String>) -> Self {
        Self::Notation {
            notation: notation.to_string(),
            column,
            details: details.into(),
        }
    }
}
