// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Middleware: jwt_auth_middleware injects `AuthUser`; handlers hand the
// caller's user id explicitly to `MessageService`.

pub mod messages; // Message board CRUD

pub use messages::*;
