pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as messages_get;
pub use collection::post as messages_post;

pub use record::get as message_get;
pub use record::put as message_put;
pub use record::delete as message_delete;

/// Canonical read location for a message
pub fn message_location(id: i64) -> String {
    format!("/api/messages/{}", id)
}
