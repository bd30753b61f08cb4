pub mod coords;
pub mod matrix_csv;
pub mod pose_csv;

pub use coords::*;
pub use matrix_csv::*;
pub use pose_csv::*;
