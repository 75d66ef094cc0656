//! Plain-text conversation histories.
//!
//! A history is written as a sequence of role markers (`system:`, `user:`,
//! `assistant:`), each followed by that turn's content:
//!
//! ```text
//! system: You are helpful.
//! user: Hi!
//! ```
//!
//! Text before the first marker is ignored. Markers are case-sensitive and
//! there is no way to escape one inside content.

use log::debug;
use std::fs;
use std::path::Path;

use crate::error::ChatError;
use crate::models::chat::{ Message, Role };

const MARKERS: [(&str, Role); 3] = [
    ("system:", Role::System),
    ("user:", Role::User),
    ("assistant:", Role::Assistant),
];

enum ScanState {
    Seeking,
    Accumulating {
        role: Role,
        start: usize,
    },
}

fn marker_at(rest: &str) -> Option<(Role, usize)> {
    MARKERS.iter()
        .find(|(marker, _)| rest.starts_with(marker))
        .map(|(marker, role)| (*role, marker.len()))
}

/// Splits `text` into messages, one per role marker, in document order.
pub fn parse_messages(text: &str) -> Result<Vec<Message>, ChatError> {
    let mut messages = Vec::new();
    let mut state = ScanState::Seeking;
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        match marker_at(&text[pos..]) {
            Some((role, len)) => {
                if let ScanState::Accumulating { role: current, start } = state {
                    messages.push(Message::new(current, text[start..pos].trim()));
                }
                pos += len;
                state = ScanState::Accumulating { role, start: pos };
            }
            None => {
                pos += ch.len_utf8();
            }
        }
    }

    if let ScanState::Accumulating { role, start } = state {
        messages.push(Message::new(role, text[start..].trim()));
    }

    if messages.is_empty() {
        return Err(ChatError::validation("messages file must contain at least one message"));
    }
    Ok(messages)
}

pub fn load_messages_file(path: &Path) -> Result<Vec<Message>, ChatError> {
    let text = fs::read_to_string(path).map_err(|source| ChatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let messages = parse_messages(&text)?;
    debug!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(messages)
}

/// Renders one `role: content` line per message. The output parses back
/// with [`parse_messages`] as long as no content contains a role marker.
pub fn format_transcript(messages: &[Message]) -> String {
    let mut result = String::new();
    for msg in messages {
        result.push_str(&format!("{}\n", msg));
    }
    result
}
