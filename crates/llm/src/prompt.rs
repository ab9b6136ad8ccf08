//! Chat messages
//!
//! Messages in the shape the chat-completions backend sends them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<tagasuri_core::Role> for Role {
    fn from(role: tagasuri_core::Role) -> Self {
        match role {
            tagasuri_core::Role::System => Role::System,
            tagasuri_core::Role::User => Role::User,
            tagasuri_core::Role::Assistant => Role::Assistant,
        }
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

impl From<&tagasuri_core::Message> for Message {
    fn from(msg: &tagasuri_core::Message) -> Self {
        Self {
            role: msg.role.into(),
            content: msg.content.clone(),
        }
    }
}
