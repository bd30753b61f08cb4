pub mod decompose;
pub mod matrix;
pub mod reconcile;

pub use decompose::*;
pub use matrix::*;
pub use reconcile::*;
