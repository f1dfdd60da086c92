//! Domain layer for the utility dashboard voice summary
//!
//! Contains the forecast snapshot the summary is spoken from, the supported
//! languages and bill categories, and domain errors.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
