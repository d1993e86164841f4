// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth)
pub mod public;    // Tier 1: No authentication required (/api/login)
pub mod protected; // Tier 2: JWT authentication required (/api/messages/*)

pub use public::*;
pub use protected::*;
