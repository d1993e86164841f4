use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::config::load_session_config;
use crate::cli::utils::{output_message, output_messages, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum MessageCommands {
    #[command(about = "List all messages")]
    List,

    #[command(about = "Show a single message")]
    Get {
        #[arg(help = "Message ID")]
        id: i64,
    },

    #[command(about = "Create a message owned by the logged-in user")]
    Create {
        #[arg(long, help = "Message ID (chosen by the client)")]
        id: i64,
        #[arg(long, help = "Title, 5 to 50 characters")]
        title: String,
        #[arg(long, help = "Text, up to 500 characters")]
        text: String,
    },

    #[command(about = "Replace the title and text of a message you own")]
    Update {
        #[arg(help = "Message ID")]
        id: i64,
        #[arg(long, help = "New title")]
        title: String,
        #[arg(long, help = "New text")]
        text: String,
    },

    #[command(about = "Delete a message you own")]
    Delete {
        #[arg(help = "Message ID")]
        id: i64,
    },
}

pub async fn handle(cmd: MessageCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = load_session_config()?;
    let token = session.require_token()?.to_string();
    let client = ApiClient::new(session.server.clone(), Some(token));

    match cmd {
        MessageCommands::List => {
            let messages = client.list_messages().await?;
            output_messages(output_format, &messages)
        }
        MessageCommands::Get { id } => {
            let message = client.get_message(id).await?;
            output_message(output_format, &message)
        }
        MessageCommands::Create { id, title, text } => {
            let message = client.create_message(id, &title, &text).await?;
            output_success(output_format, &format!("Created message {}", id), Some(message))
        }
        MessageCommands::Update { id, title, text } => {
            client.update_message(id, &title, &text).await?;
            output_success(output_format, &format!("Updated message {}", id), None)
        }
        MessageCommands::Delete { id } => {
            let message = client.delete_message(id).await?;
            output_success(output_format, &format!("Deleted message {}", id), Some(message))
        }
    }
}
