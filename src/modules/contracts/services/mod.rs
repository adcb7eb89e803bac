pub mod contract_service;
pub mod document_renderer;

pub use contract_service::{ContractService, RenderedDocument};
pub use document_renderer::{DocumentRenderer, PdfRenderer};
