pub mod openai;

use async_trait::async_trait;
use serde::Deserialize;
use std::error::Error as StdError;
use std::sync::Arc;

use super::{ ChatModel, LlmConfig };
use self::openai::OpenAIChatClient;
use crate::models::chat::Message;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// One chat-completion call: the full ordered history plus the model and
/// credential to use for it.
#[derive(Clone, Copy)]
pub struct ChatRequest<'a> {
    pub model: ChatModel,
    pub messages: &'a [Message],
    pub api_key: &'a str,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the history and returns the text of the first reply choice.
    async fn complete(
        &self,
        request: ChatRequest<'_>
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
