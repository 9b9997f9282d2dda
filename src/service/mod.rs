pub mod arcade;
pub mod crud;
mod query;
pub mod rows;
pub mod validation;

pub use arcade::*;
pub use crud::*;
pub use rows::{row_to_json, rows_to_json, ResultTable};
pub use validation::*;
