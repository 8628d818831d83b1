//! Pure domain types for documents, selections, and line references.

pub mod document;
pub mod errors;
pub mod model;
pub mod reference;
