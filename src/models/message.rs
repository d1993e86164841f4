use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const TITLE_MIN_LEN: usize = 5;
pub const TITLE_MAX_LEN: usize = 50;
pub const TEXT_MAX_LEN: usize = 500;

/// A stored message. `user_id` and `created_at` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub text: String,
}

/// Client payload for create and update.
///
/// Owner and creation time are not part of the input; if a client sends
/// them they are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageInput {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Input that passed field validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMessage {
    pub id: i64,
    pub title: String,
    pub text: String,
}

/// Field name -> reason, for every field that failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub HashMap<String, String>);

impl FieldErrors {
    fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.0.insert(field.to_string(), reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl MessageInput {
    pub fn new(id: i64, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            text: Some(text.into()),
        }
    }

    /// Check title and text. Lengths count characters, not bytes.
    pub fn validate(self) -> Result<ValidMessage, FieldErrors> {
        let mut errors = FieldErrors::default();

        match required(self.title.as_deref()) {
            None => errors.add("title", "The title field is required"),
            Some(title) => {
                let len = title.chars().count();
                if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
                    errors.add(
                        "title",
                        format!(
                            "The title must be between {} and {} characters",
                            TITLE_MIN_LEN, TITLE_MAX_LEN
                        ),
                    );
                }
            }
        }

        match required(self.text.as_deref()) {
            None => errors.add("text", "The text field is required"),
            Some(text) => {
                if text.chars().count() > TEXT_MAX_LEN {
                    errors.add(
                        "text",
                        format!("The text must be at most {} characters", TEXT_MAX_LEN),
                    );
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidMessage {
            id: self.id,
            title: self.title.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
        })
    }
}

// Blank strings count as missing.
fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Replace angle brackets with '.' so stored content never carries raw markup
pub fn sanitize(value: &str) -> String {
    value.replace(|c: char| c == '<' || c == '>', ".")
}

impl ValidMessage {
    /// Build the record to persist, stamping owner and creation time
    pub fn into_message(self, user_id: i64, created_at: DateTime<Utc>) -> Message {
        Message {
            id: self.id,
            user_id,
            created_at,
            title: sanitize(&self.title),
            text: sanitize(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_angle_brackets() {
        assert_eq!(sanitize("a<b>c"), "a.b.c");
        assert_eq!(sanitize("<script>alert(1)</script>"), ".script.alert(1)./script.");
        assert_eq!(sanitize("plain"), "plain");
    }

    #[test]
    fn title_length_bounds() {
        assert!(MessageInput::new(1, "a".repeat(4), "x").validate().is_err());
        assert!(MessageInput::new(1, "a".repeat(5), "x").validate().is_ok());
        assert!(MessageInput::new(1, "a".repeat(50), "x").validate().is_ok());

        let errors = MessageInput::new(1, "a".repeat(51), "x").validate().unwrap_err();
        assert!(errors.contains("title"));
        assert!(!errors.contains("text"));
    }

    #[test]
    fn text_length_bounds() {
        assert!(MessageInput::new(1, "Title", "t".repeat(500)).validate().is_ok());

        let errors = MessageInput::new(1, "Title", "t".repeat(501)).validate().unwrap_err();
        assert!(errors.contains("text"));
    }

    #[test]
    fn lengths_count_characters() {
        // 50 multi-byte characters is still a valid title
        assert!(MessageInput::new(1, "é".repeat(50), "x").validate().is_ok());
    }

    #[test]
    fn missing_or_blank_fields_are_required() {
        let errors = MessageInput::default().validate().unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("text"));

        let errors = MessageInput::new(1, "Valid title", "   ").validate().unwrap_err();
        assert!(errors.contains("text"));
    }

    #[test]
    fn into_message_sanitizes_and_stamps() {
        let now = Utc::now();
        let message = MessageInput::new(3, "a<b>c title", "<b>hi</b>")
            .validate()
            .unwrap()
            .into_message(7, now);

        assert_eq!(message.id, 3);
        assert_eq!(message.user_id, 7);
        assert_eq!(message.created_at, now);
        assert_eq!(message.title, "a.b.c title");
        assert_eq!(message.text, ".b.hi./b.");
    }

    #[test]
    fn input_ignores_server_assigned_fields() {
        let input: MessageInput = serde_json::from_str(
            r#"{"id": 4, "user_id": 99, "created_at": "2001-01-01T00:00:00Z", "title": "Hello world", "text": "body"}"#,
        )
        .unwrap();
        assert_eq!(input.id, 4);
        assert_eq!(input.title.as_deref(), Some("Hello world"));
    }

    #[test]
    fn missing_id_defaults_to_zero() {
        let input: MessageInput = serde_json::from_str(r#"{"title": "Hello world", "text": "body"}"#).unwrap();
        assert_eq!(input.id, 0);
    }
}
