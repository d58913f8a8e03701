use super::error::Error;
use crate::model::record::Record;
use std::path::{Path, PathBuf};

/// A single value or a sequence of values.
///
/// A lone notation string and a one-element list are treated alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OneOrMany<String> {
    fn from(values: &[&str]) -> Self {
        OneOrMany::Many(values.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<String> {
    fn from(values: [&str; N]) -> Self {
        OneOrMany::Many(values.iter().map(|s| s.to_string()).collect())
    }
}

/// Notations paired with their identifiers, validated up front.
#[derive(Debug, Clone)]
pub struct NotationInput {
    notations: Vec<String>,
    ids: Vec<String>,
}

impl NotationInput {
    /// Pairs notations with identifiers. The counts must match.
    pub fn new(
        notations: impl Into<OneOrMany<String>>,
        ids: impl Into<OneOrMany<String>>,
    ) -> Result<Self, Error> {
        let notations = notations.into().into_vec();
        let ids = ids.into().into_vec();
        if notations.len() != ids.len() {
            return Err(Error::length_mismatch(notations.len(), ids.len()));
        }
        Ok(Self { notations, ids })
    }

    pub fn len(&self) -> usize {
        self.notations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notations.is_empty()
    }

    /// Records in input order, indexed from zero.
    pub fn records(self) -> impl Iterator<Item = Record<String>> {
        self.notations
            .into_iter()
            .zip(self.ids)
            .enumerate()
            .map(|(index, (notation, id))| Record::new(index, id, notation))
    }
}

/// A structure file that is known to exist.
#[derive(Debug, Clone)]
pub struct FileInput {
    path: PathBuf,
}

impl FileInput {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::missing_input(path));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Identifier for a file record: its title, or its position when untitled.
pub fn file_substance_id(title: &str, index: usize) -> String {
    let title = title.trim();
    if title.is_empty() {
        index.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_string_is_one_record() {
        let input = NotationInput::new("CCO", "ethanol").unwrap();
        assert_eq!(input.len(), 1);
        let records: Vec<_> = input.records().collect();
        assert_eq!(records[0].raw, "CCO");
        assert_eq!(records[0].substance_id, "ethanol");
        assert_eq!(records[0].index, 0);
    }

    #[test]
    fn sequences_keep_order_and_indices() {
        let input = NotationInput::new(["C", "CC", "CCC"], ["a", "b", "c"]).unwrap();
        let ids: Vec<_> = input.records().map(|r| (r.index, r.substance_id)).collect();
        assert_eq!(
            ids,
            vec![(0, "a".to_string()), (1, "b".to_string()), (2, "c".to_string())]
        );
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = NotationInput::new("CCO", ["a", "b"]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { notations: 1, ids: 2 }));
        let err = NotationInput::new(vec!["C", "N"], "a").unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { notations: 2, ids: 1 }));
    }

    #[test]
    fn empty_sequences_are_valid() {
        let input = NotationInput::new(Vec::<String>::new(), Vec::<String>::new()).unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn missing_file_fails_fast() {
        let err = FileInput::open("/no/such/library.sdf").unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
        assert!(err.to_string().contains("/no/such/library.sdf"));
    }

    #[test]
    fn untitled_records_fall_back_to_index() {
        assert_eq!(file_substance_id("aspirin", 3), "aspirin");
        assert_eq!(file_substance_id("   ", 3), "3");
    }
}
