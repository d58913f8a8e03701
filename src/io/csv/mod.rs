pub mod writer;

pub use writer::write;
