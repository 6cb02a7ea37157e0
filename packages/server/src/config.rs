//! Runtime configuration of the server.

use std::time::Duration;

use crate::domain::entity::DEFAULT_CHAT_CAPACITY;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BEACON_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Period of the `SYNC_TICK` clock beacon. Must be non-zero.
    pub beacon_interval: Duration,
    /// Number of chat messages the room retains
    pub chat_capacity: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            beacon_interval: DEFAULT_BEACON_INTERVAL,
            chat_capacity: DEFAULT_CHAT_CAPACITY,
        }
    }
}
