pub mod matrix_file;
pub mod report;

pub use matrix_file::*;
pub use report::*;
