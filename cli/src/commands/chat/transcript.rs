//! # Chat Transcript
//!
//! File: cli/src/commands/chat/transcript.rs
//!
//! The time-ordered list of messages shown during one chat session. It only
//! lives as long as the session; nothing is written to disk.
//!
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

/// Messages in the order they were appended.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        let idx = self.messages.len();
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
            sent_at: Local::now(),
        });
        &self.messages[idx]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
