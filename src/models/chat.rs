use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

use crate::error::ChatError;

/// The author of a [`Message`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model, usually the first message of a dialog.
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ =>
                Err(
                    ChatError::validation(
                        format!("invalid role '{}': expected one of system, user, assistant", s)
                    )
                ),
        }
    }
}

/// A single turn of a conversation. Messages are never mutated; a new turn
/// is a new `Message`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    /// Builds a message from an untyped role tag such as `"user"`.
    pub fn from_parts(role: &str, content: impl Into<String>) -> Result<Self, ChatError> {
        Ok(Self::new(role.parse()?, content))
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_role_builds_and_displays() {
        for role in ["user", "assistant", "system"] {
            let message = Message::from_parts(role, "Hello there!").unwrap();

            assert_eq!(message.role().as_str(), role);
            assert_eq!(message.content(), "Hello there!");
            assert_eq!(message.to_string(), format!("{}: Hello there!", role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        for role in ["bad", "User", "SYSTEM", "", "tool"] {
            let err = Message::from_parts(role, "Hello there!").unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)), "role {:?} gave {:?}", role, err);
        }
    }

    #[test]
    fn empty_content_is_allowed() {
        let message = Message::user("");
        assert_eq!(message.to_string(), "user: ");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Message::user("hi"), Message::from_parts("user", "hi").unwrap());
        assert_ne!(Message::user("hi"), Message::assistant("hi"));
        assert_ne!(Message::user("hi"), Message::user("hi "));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }
}
