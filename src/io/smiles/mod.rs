pub mod reader;

pub use reader::{SmiEntry, parse, read_smi};
