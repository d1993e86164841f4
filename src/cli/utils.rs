use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a list of messages in the appropriate format
pub fn output_messages(output_format: OutputFormat, messages: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(messages)?),
        OutputFormat::Text => {
            let items = messages.as_array().map(Vec::as_slice).unwrap_or_default();
            if items.is_empty() {
                println!("No messages");
            }
            for message in items {
                println!("{}", format_message_line(message));
            }
        }
    }
    Ok(())
}

/// Output a single message in the appropriate format
pub fn output_message(output_format: OutputFormat, message: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(message)?),
        OutputFormat::Text => {
            println!("{}", format_message_line(message));
            if let Some(text) = message.get("text").and_then(Value::as_str) {
                println!("{}", text);
            }
        }
    }
    Ok(())
}

/// One-line summary: `#id [user N] created_at  title`
pub fn format_message_line(message: &Value) -> String {
    format!(
        "#{} [user {}] {}  {}",
        message.get("id").and_then(Value::as_i64).unwrap_or_default(),
        message.get("user_id").and_then(Value::as_i64).unwrap_or_default(),
        message.get("created_at").and_then(Value::as_str).unwrap_or("-"),
        message.get("title").and_then(Value::as_str).unwrap_or(""),
    )
}
