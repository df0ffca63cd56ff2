//! CrudService: generic typed CRUD over the document store.

mod crud;
mod validation;
pub use crud::{shallow_merge, CrudService};
pub use validation::RequestValidator;
