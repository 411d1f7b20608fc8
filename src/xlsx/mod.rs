pub mod writer;

pub use writer::write_comparison_to_xlsx;
