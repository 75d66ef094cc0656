pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod history;
pub mod llm;
pub mod models;

#[cfg(test)]
mod test_support;

use cli::Args;
use conversation::{ Conversation, ConversationOptions };
use error::ChatError;
use log::info;

/// Builds a conversation from the command line, performs one exchange and
/// returns what should be printed: the reply, or the full transcript with
/// `--print-history`.
pub async fn run(args: Args) -> Result<String, ChatError> {
    info!("--- Chat Configuration ---");
    info!("Model: {}", args.model);
    info!("Base URL: {}", args.base_url);
    info!("Timeout: {}", args.timeout_secs.map_or("none".to_string(), |s| format!("{}s", s)));
    info!("--------------------------");

    let seed = args.seed()?;
    let client = llm::chat::new_client(&args.llm_config()).map_err(|e| {
        ChatError::configuration(format!("failed to build HTTP client: {}", e))
    })?;

    let options = ConversationOptions {
        api_key: args.api_key.clone(),
        model: args.model.clone(),
        seed,
    };
    let mut conversation = Conversation::new(options, client)?;
    info!("Sending {} messages to API.", conversation.messages().len());
    let reply = conversation.exchange().await?;

    if args.print_history {
        let transcript = conversation.transcript();
        Ok(transcript.strip_suffix('\n').unwrap_or(&transcript).to_string())
    } else {
        Ok(reply)
    }
}
