pub mod reader;

pub use reader::{Reader, SdfRecord};
