//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access and from HTTP.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every mutation takes the caller identity explicitly.

pub mod auth;
pub mod listing;
pub mod runtime;
pub mod uploads;
#[cfg(test)]
pub mod test_support;
