//! Interactive terminal chat: stdin is the transport

use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::bot::help_text;
use crate::bot::IncomingMessage;
use crate::bot::MoodBot;
use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

pub async fn handle_chat(
    config: &AppConfig,
    user: String,
    name: Option<String>,
    conversation: Option<String>,
) -> Result<()> {
    let bot = MoodBot::from_config(config)?;
    let conversation = conversation.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let name = name.unwrap_or_else(|| user.clone());

    print_info(&format!("Conversation {conversation} as {name} (Ctrl-D to quit)"));
    println!("{}\n", help_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt("you> ");
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let message = IncomingMessage::new(&conversation, &user, &name, line);
        match bot.handle_message(&message).await {
            Ok(reply) => {
                println!("bot> {}", reply.text);
                if let Some(url) = &reply.image_url {
                    println!("     🖼  {url}");
                }
                if let Some(point) = reply.point {
                    println!("     📍 {point}");
                }
            }
            Err(e) => print_error(&format!("{e}")),
        }
    }

    Ok(())
}
