use clap::builder::PossibleValuesParser;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_BASE_URL;
use crate::conversation::Seed;
use crate::error::ChatError;
use crate::history::load_messages_file;
use crate::llm::{ LlmConfig, SUPPORTED_MODELS };
use crate::models::chat::Message;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Send a conversation to a chat-completion model", long_about = None)]
pub struct Args {
    /// The model to use for the API call
    #[arg(value_parser = PossibleValuesParser::new(SUPPORTED_MODELS))]
    pub model: String,

    /// The prompt to use for the system.
    #[arg(long)]
    pub system_prompt: Option<String>,

    /// A message to add to the conversation, as role:content (e.g. "user:Hi!"). Can be repeated.
    #[arg(long = "message", value_name = "ROLE:CONTENT", conflicts_with = "messages_file")]
    pub messages: Vec<String>,

    /// File of "role: content" turns to load as the conversation history.
    #[arg(long, value_name = "PATH")]
    pub messages_file: Option<PathBuf>,

    /// Your OpenAI API key. If not provided, the OPENAI_API_KEY environment variable will be used.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds. No timeout when unset.
    #[arg(long, env = "OPENAI_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Print the whole conversation, including the reply, instead of only the reply.
    #[arg(long, default_value = "false")]
    pub print_history: bool,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl Args {
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Collects the initial history from `--message` or `--messages-file`
    /// and combines it with `--system-prompt`. A system prompt given next to
    /// messages is prepended as the first message.
    pub fn seed(&self) -> Result<Seed, ChatError> {
        let mut messages = match &self.messages_file {
            Some(path) => load_messages_file(path)?,
            None =>
                self.messages
                    .iter()
                    .map(|token| parse_message_arg(token))
                    .collect::<Result<Vec<_>, _>>()?,
        };

        let prompt = self.system_prompt.clone().filter(|p| !p.is_empty());
        match prompt {
            Some(prompt) if !messages.is_empty() => {
                messages.insert(0, Message::system(prompt));
                Seed::from_parts(None, messages)
            }
            prompt => Seed::from_parts(prompt, messages),
        }
    }
}

/// Parses a `role:content` token. Only the first colon separates the role.
pub fn parse_message_arg(token: &str) -> Result<Message, ChatError> {
    let (role, content) = token
        .split_once(':')
        .ok_or_else(||
            ChatError::validation(format!("malformed message '{}': expected role:content", token))
        )?;
    Message::from_parts(role.trim(), content.trim())
}
