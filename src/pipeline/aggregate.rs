use super::outcome::Rejection;
use crate::model::fingerprint::BitVector;
use ndarray::Array2;
use tracing::warn;

/// Per-record metadata aligned with the rows of a [`ResultSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl MetadataTable {
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row(&self, index: usize) -> &[Option<String>] {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index_or_insert(&mut self, name: &str) -> usize {
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => idx,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        }
    }
}

/// Rectangular output of a pipeline run.
///
/// `ids[i]`, `matrix.row(i)` and `metadata.row(i)` always describe the same
/// accepted record, in acceptance order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub ids: Vec<String>,
    pub matrix: Array2<u8>,
    pub metadata: MetadataTable,
    /// Number of records dropped during the run.
    pub rejected: usize,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn n_bits(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Collects per-record outcomes for one run.
#[derive(Debug)]
pub struct Aggregator {
    n_bits: usize,
    requested: Option<Vec<String>>,
    ids: Vec<String>,
    bits: Vec<u8>,
    metadata: MetadataTable,
    rejections: Vec<Rejection>,
}

impl Aggregator {
    /// `fields` names the metadata columns to keep; `None` keeps every
    /// property seen, in first-seen order.
    pub fn new(n_bits: usize, fields: Option<&[String]>) -> Self {
        Self {
            n_bits,
            requested: fields.map(<[String]>::to_vec),
            ids: Vec::new(),
            bits: Vec::new(),
            metadata: MetadataTable::with_columns(fields.map(<[String]>::to_vec).unwrap_or_default()),
            rejections: Vec::new(),
        }
    }

    /// Adds an accepted record. `index` is the record's input position and
    /// only used for diagnostics. Panics if the fingerprint width is wrong.
    pub fn accept(
        &mut self,
        index: usize,
        substance_id: impl Into<String>,
        fingerprint: BitVector,
        properties: Vec<(String, String)>,
    ) {
        assert_eq!(
            fingerprint.len(),
            self.n_bits,
            "fingerprint width does not match the aggregator"
        );
        let substance_id = substance_id.into();

        let row = match &self.requested {
            Some(fields) => fields
                .iter()
                .map(|field| {
                    let value = properties
                        .iter()
                        .find(|(name, _)| name == field)
                        .map(|(_, value)| value.clone());
                    if value.is_none() {
                        warn!(
                            index,
                            substance_id = %substance_id,
                            field = %field,
                            "metadata field missing"
                        );
                    }
                    value
                })
                .collect(),
            None => {
                let mut row = vec![None; self.metadata.columns.len()];
                for (name, value) in properties {
                    let col = self.metadata.column_index_or_insert(&name);
                    if col >= row.len() {
                        row.resize(col + 1, None);
                    }
                    row[col] = Some(value);
                }
                row
            }
        };

        self.ids.push(substance_id);
        self.bits.extend(fingerprint.to_dense());
        self.metadata.push_row(row);
    }

    /// Records a dropped record and reports it.
    pub fn reject(&mut self, rejection: Rejection) {
        warn!(
            index = rejection.index,
            substance_id = %rejection.substance_id,
            input = %rejection.raw,
            reason = %rejection.reason,
            "skipping record"
        );
        self.rejections.push(rejection);
    }

    pub fn accepted(&self) -> usize {
        self.ids.len()
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn finish(self) -> ResultSet {
        let Self {
            n_bits,
            ids,
            bits,
            mut metadata,
            rejections,
            ..
        } = self;

        let width = metadata.columns.len();
        for row in &mut metadata.rows {
            row.resize(width, None);
        }
        let matrix = Array2::from_shape_fn((ids.len(), n_bits), |(r, c)| bits[r * n_bits + c]);

        ResultSet {
            ids,
            matrix,
            metadata,
            rejected: rejections.len(),
        }
    }
}
