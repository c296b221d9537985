//! Middleware del sistema
//!
//! Autenticación JWT, extractores de rol y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
