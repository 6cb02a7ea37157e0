//! Value objects of the room domain.
//!
//! Every value object validates itself on construction, so a value that
//! exists is always well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Minimum nickname length (in characters, after trimming)
pub const NICKNAME_MIN_CHARS: usize = 2;
/// Maximum nickname length (in characters, after trimming)
pub const NICKNAME_MAX_CHARS: usize = 12;
/// Maximum chat text length (in characters, after trimming)
pub const CHAT_TEXT_MAX_CHARS: usize = 300;
/// Length of a canonical video id
pub const VIDEO_ID_LEN: usize = 11;

// ========================================
// ConnectionId
// ========================================

/// Ephemeral identifier of one WebSocket connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh random connection id (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// Nickname
// ========================================

/// Display name of a room member.
///
/// Trimmed, 2 to 12 characters, each one an ASCII letter, digit, space or a
/// Hangul syllable / compatibility jamo. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let nickname = raw.trim();
        let len = nickname.chars().count();

        if !(NICKNAME_MIN_CHARS..=NICKNAME_MAX_CHARS).contains(&len)
            || !nickname.chars().all(is_nickname_char)
        {
            return Err(ValueObjectError::InvalidNickname(nickname.to_string()));
        }

        Ok(Self(nickname.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_nickname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || matches!(c, '가'..='힣' | 'ㄱ'..='ㅎ' | 'ㅏ'..='ㅣ')
}

// ========================================
// ChatText
// ========================================

/// Body of a member's chat message (trimmed, 1 to 300 characters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatText(String);

impl ChatText {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ValueObjectError::EmptyChatText);
        }

        let len = text.chars().count();
        if len > CHAT_TEXT_MAX_CHARS {
            return Err(ValueObjectError::ChatTextTooLong {
                max: CHAT_TEXT_MAX_CHARS,
                actual: len,
            });
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// ========================================
// VideoId
// ========================================

/// Canonical external video identifier: exactly 11 of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let is_valid = raw.len() == VIDEO_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

        if !is_valid {
            return Err(ValueObjectError::InvalidVideoId(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// Timestamp
// ========================================

/// Server wall-clock instant in Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Instant `millis` before `self`.
    pub fn minus_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

// ========================================
// MessageId / QueueItemId
// ========================================

/// Identifier of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// Identifier of a queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueItemId(Uuid);

impl QueueItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}
