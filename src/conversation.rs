//! A single conversation with the chat-completion service.
//!
//! A [`Conversation`] owns its ordered history. Every [`Conversation::exchange`]
//! sends the whole history, then appends the assistant's reply to it.

use log::{ debug, info };
use std::sync::Arc;

use crate::config::{ process_env, resolve_api_key, ApiKey };
use crate::error::ChatError;
use crate::history::format_transcript;
use crate::llm::chat::{ ChatClient, ChatRequest };
use crate::llm::ChatModel;
use crate::models::chat::{ Message, Role };

/// How a conversation starts: from a system prompt, or from an existing
/// history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    FromPrompt(String),
    FromHistory(Vec<Message>),
}

impl Seed {
    /// Builds a seed from the optional-prompt / message-list pair. Exactly
    /// one of them must be non-empty.
    pub fn from_parts(system_prompt: Option<String>, messages: Vec<Message>) -> Result<Self, ChatError> {
        let prompt = system_prompt.filter(|p| !p.is_empty());
        match (prompt, messages.is_empty()) {
            (Some(_), false) => {
                Err(ChatError::validation("you cannot provide both messages and a system prompt"))
            }
            (None, true) => {
                Err(ChatError::validation("you must provide either messages or a system prompt"))
            }
            (Some(prompt), true) => Ok(Seed::FromPrompt(prompt)),
            (None, false) => Ok(Seed::FromHistory(messages)),
        }
    }

    fn into_messages(self) -> Result<Vec<Message>, ChatError> {
        match self {
            Seed::FromPrompt(prompt) if prompt.is_empty() => {
                Err(ChatError::validation("system prompt must not be empty"))
            }
            Seed::FromPrompt(prompt) => Ok(vec![Message::system(prompt)]),
            Seed::FromHistory(messages) if messages.is_empty() => {
                Err(ChatError::validation("message history must not be empty"))
            }
            Seed::FromHistory(messages) => Ok(messages),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversationOptions {
    /// Explicit credential; `None` falls back to `OPENAI_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
    pub seed: Seed,
}

pub struct Conversation {
    api_key: ApiKey,
    model: ChatModel,
    messages: Vec<Message>,
    client: Arc<dyn ChatClient>,
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("api_key", &self.api_key)
            .field("model", &self.model)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl Conversation {
    /// Creates a conversation, reading the credential fallback from the
    /// process environment.
    pub fn new(options: ConversationOptions, client: Arc<dyn ChatClient>) -> Result<Self, ChatError> {
        Self::with_env(options, client, process_env)
    }

    pub fn with_env<F>(
        options: ConversationOptions,
        client: Arc<dyn ChatClient>,
        lookup: F
    ) -> Result<Self, ChatError>
        where F: Fn(&str) -> Option<String>
    {
        debug!("Initializing conversation for model {}", options.model);
        let model: ChatModel = options.model.parse()?;
        let messages = options.seed.into_messages()?;
        let api_key = resolve_api_key(options.api_key.as_deref(), lookup)?;

        Ok(Self {
            api_key,
            model,
            messages,
            client,
        })
    }

    pub fn model(&self) -> ChatModel {
        self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Renders the history in the messages-file format.
    pub fn transcript(&self) -> String {
        format_transcript(&self.messages)
    }

    /// Appends a user or assistant turn. System messages are only accepted
    /// at construction.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) -> Result<(), ChatError> {
        if role == Role::System {
            return Err(ChatError::validation("only user or assistant messages can be added"));
        }
        let message = Message::new(role, content);
        debug!("Adding message: {}", message);
        self.messages.push(message);
        Ok(())
    }

    /// Sends the full history to the remote service and appends the reply.
    /// On failure the history is left as it was.
    pub async fn exchange(&mut self) -> Result<String, ChatError> {
        info!("Prompting {} with {} messages", self.model, self.messages.len());
        let request = ChatRequest {
            model: self.model,
            messages: &self.messages,
            api_key: self.api_key.expose(),
        };
        let completion = self.client.complete(request).await.map_err(ChatError::RemoteService)?;

        let reply = completion.response;
        self.messages.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}
