pub mod chat;

use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DEFAULT_BASE_URL;
use crate::error::ChatError;

/// Model identifiers accepted by the chat-completion endpoint.
pub const SUPPORTED_MODELS: [&str; 4] = ["gpt-4", "gpt-4-32k", "gpt-3.5-turbo", "gpt-3.5-turbo-16k"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ChatModel {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-32k")]
    Gpt4Context32k,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-3.5-turbo-16k")]
    Gpt35Turbo16k,
}

impl ChatModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Gpt4 => "gpt-4",
            ChatModel::Gpt4Context32k => "gpt-4-32k",
            ChatModel::Gpt35Turbo => "gpt-3.5-turbo",
            ChatModel::Gpt35Turbo16k => "gpt-3.5-turbo-16k",
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatModel {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4" => Ok(ChatModel::Gpt4),
            "gpt-4-32k" => Ok(ChatModel::Gpt4Context32k),
            "gpt-3.5-turbo" => Ok(ChatModel::Gpt35Turbo),
            "gpt-3.5-turbo-16k" => Ok(ChatModel::Gpt35Turbo16k),
            _ =>
                Err(
                    ChatError::validation(
                        format!(
                            "model {} is not supported. Supported models are: {}",
                            s,
                            SUPPORTED_MODELS.join(", ")
                        )
                    )
                ),
        }
    }
}

/// Transport settings for the remote chat client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_model_parses_back_to_itself() {
        for id in SUPPORTED_MODELS {
            let model: ChatModel = id.parse().unwrap();
            assert_eq!(model.as_str(), id);
        }
    }

    #[test]
    fn unknown_models_are_rejected() {
        for id in ["gpt4", "GPT-4", "gpt-4o", "claude-3-opus", ""] {
            assert!(matches!(id.parse::<ChatModel>(), Err(ChatError::Validation(_))), "{}", id);
        }
    }
}
