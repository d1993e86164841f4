pub mod message;

pub use message::{sanitize, FieldErrors, Message, MessageInput, ValidMessage};
