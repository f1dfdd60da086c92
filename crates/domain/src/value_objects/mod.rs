//! Value Objects - Immutable, identity-less domain primitives

mod bill_category;
mod language;

pub use bill_category::BillCategory;
pub use language::{Language, primary_subtag};
