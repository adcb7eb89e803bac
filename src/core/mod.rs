pub mod error;
pub mod filter;
pub mod traits;

pub use error::{AppError, ErrorKind, Result};
pub use filter::Filter;
pub use traits::{ColumnValue, Columns, Entity, Repository, Validate};
