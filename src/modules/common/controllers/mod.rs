pub mod generic_controller;
pub mod validated;

pub use validated::Validated;
