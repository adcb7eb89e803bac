pub mod entity;
pub mod repository;
pub mod validate;

pub use entity::{ColumnValue, Columns, Entity};
pub use repository::Repository;
pub use validate::Validate;
