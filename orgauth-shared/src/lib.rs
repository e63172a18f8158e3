//! # orgauth Shared Library
//!
//! Domain logic for the orgauth service: users, organisations and the
//! memberships linking them, plus the authentication that gates access.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL
//! - `db`: Connection pool and migrations
//! - `store`: Persistence seam with PostgreSQL and in-memory backends
//! - `auth`: Password hashing, bearer tokens, middleware, membership checks
//! - `validation`: Field validation producing client-facing errors
//! - `accounts`: Registration and login
//! - `tenancy`: Organisation listing, lookup, creation and membership

pub mod accounts;
pub mod auth;
pub mod db;
pub mod models;
pub mod store;
pub mod tenancy;
pub mod validation;

/// Current version of the orgauth shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
