/// One input molecule as it enters the pipeline.
///
/// `raw` is a notation string for the notation pipeline and a toolkit file
/// entry for the file pipeline. `index` is the position in the input and is
/// only used for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<R> {
    pub index: usize,
    pub substance_id: String,
    pub raw: R,
}

impl<R> Record<R> {
    pub fn new(index: usize, substance_id: impl Into<String>, raw: R) -> Self {
        Self {
            index,
            substance_id: substance_id.into(),
            raw,
        }
    }
}

/// Short human-readable form of a record's raw input for diagnostics.
pub trait Describe {
    fn describe(&self) -> String;
}

impl Describe for String {
    fn describe(&self) -> String {
        self.clone()
    }
}

impl Describe for &str {
    fn describe(&self) -> String {
        (*self).to_string()
    }
}
