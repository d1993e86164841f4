// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition lives here. Every other route sits behind the JWT
// middleware in handlers/protected.

pub mod auth;

pub use auth::*;
