/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `users`: User profiles
/// - `organisations`: Organisations and their members

pub mod auth;
pub mod health;
pub mod organisations;
pub mod users;
