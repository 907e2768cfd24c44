//! Catalog dataset access and validation.

pub mod dataset;
pub mod validate;
