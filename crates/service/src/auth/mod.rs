//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login, session tokens and the admin access check live here,
//! independent of the web framework.

pub mod access;
pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;
pub mod session;

pub use access::{require_admin, AccessError};
pub use service::AuthService;
