use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::{load_session_config, parse_server_url, save_session_config};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, env = "BOARD_PASSWORD", help = "Password (or set BOARD_PASSWORD)")]
        password: String,
        #[arg(long, help = "Server base URL, e.g. http://localhost:3000")]
        server: Option<String>,
    },

    #[command(about = "Forget the saved token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = load_session_config()?;

    match cmd {
        AuthCommands::Login { username, password, server } => {
            if let Some(server) = server {
                session.server = parse_server_url(&server)?;
            }

            let client = ApiClient::new(session.server.clone(), None);
            let data = client.login(&username, &password).await?;
            let token = data
                .get("token")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow::anyhow!("Server response did not include a token"))?
                .to_string();

            session.login(username.clone(), token);
            save_session_config(&session)?;

            output_success(
                output_format,
                &format!("Logged in as '{}' on {}", username, session.server),
                data.get("user").map(|user| json!({ "user": user })),
            )
        }
        AuthCommands::Logout => {
            session.logout();
            save_session_config(&session)?;
            output_success(output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let message = match &session.username {
                Some(username) if session.token.is_some() => {
                    format!("Logged in as '{}' on {}", username, session.server)
                }
                _ => format!("Not logged in (server: {})", session.server),
            };
            output_success(
                output_format,
                &message,
                Some(json!({
                    "server": session.server,
                    "username": session.username,
                    "logged_in_at": session.logged_in_at,
                })),
            )
        }
    }
}
