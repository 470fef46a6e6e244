//! Listing module: house rows, their image gallery, and the admin-only
//! create/update workflows.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;

pub use errors::ListingError;
pub use service::ListingService;
