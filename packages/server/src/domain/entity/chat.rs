//! Chat messages and the bounded chat log.

use std::collections::VecDeque;

use crate::domain::value_object::{ChatText, MessageId, Nickname, Timestamp};

/// Number of messages the room keeps by default
pub const DEFAULT_CHAT_CAPACITY: usize = 50;

/// Nickname shown for notices generated by the room itself
pub const SYSTEM_NICKNAME: &str = "SYSTEM";

/// Who wrote a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAuthor {
    Member(Nickname),
    System,
}

impl ChatAuthor {
    pub fn display_name(&self) -> &str {
        match self {
            ChatAuthor::Member(nickname) => nickname.as_str(),
            ChatAuthor::System => SYSTEM_NICKNAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: ChatAuthor,
    pub text: String,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn from_member(nickname: Nickname, text: ChatText, sent_at: Timestamp) -> Self {
        Self {
            id: MessageId::generate(),
            author: ChatAuthor::Member(nickname),
            text: text.into_string(),
            sent_at,
        }
    }

    pub fn system(text: impl Into<String>, sent_at: Timestamp) -> Self {
        Self {
            id: MessageId::generate(),
            author: ChatAuthor::System,
            text: text.into(),
            sent_at,
        }
    }
}

/// Append-only chat history that evicts its oldest entries beyond `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLog {
    capacity: usize,
    messages: VecDeque<ChatMessage>,
}

impl ChatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a message, dropping from the front until the log fits.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(n: usize) -> ChatMessage {
        ChatMessage::system(format!("message {n}"), Timestamp::new(n as i64))
    }

    #[test]
    fn test_chat_log_keeps_everything_below_capacity() {
        // テスト項目: 容量未満なら全メッセージが到着順で保持される
        // given (前提条件):
        let mut log = ChatLog::default();

        // when (操作):
        for n in 0..10 {
            log.push(message(n));
        }

        // then (期待する結果):
        assert_eq!(log.len(), 10);
        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.first(), Some(&"message 0"));
        assert_eq!(texts.last(), Some(&"message 9"));
    }

    #[test]
    fn test_chat_log_evicts_oldest_first() {
        // テスト項目: 容量超過時は古いものから削除され、最新 50 件が残る
        // given (前提条件):
        let mut log = ChatLog::default();

        // when (操作):
        for n in 0..120 {
            log.push(message(n));
        }

        // then (期待する結果):
        assert_eq!(log.len(), DEFAULT_CHAT_CAPACITY);
        let sent_at: Vec<i64> = log.iter().map(|m| m.sent_at.value()).collect();
        let expected: Vec<i64> = (70..120).collect();
        assert_eq!(sent_at, expected);
    }

    #[test]
    fn test_chat_log_with_custom_capacity() {
        // テスト項目: 任意の容量でも min(N, capacity) 件が残る
        // given (前提条件):
        let mut log = ChatLog::new(3);

        // when (操作):
        for n in 0..5 {
            log.push(message(n));
        }

        // then (期待する結果):
        assert_eq!(log.len(), 3);
        assert_eq!(log.to_vec()[0].text, "message 2");
    }

    #[test]
    fn test_system_author_display_name() {
        // テスト項目: システム通知の表示名は "SYSTEM"
        // given (前提条件):
        let notice = ChatMessage::system("hello", Timestamp::new(0));

        // when (操作) / then (期待する結果):
        assert_eq!(notice.author.display_name(), SYSTEM_NICKNAME);
    }
}
