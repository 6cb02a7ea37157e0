//! Sajiki watch-party server.
//!
//! Hosts one room: members join with a nickname, chat, queue video links and
//! watch them in sync.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sajiki-server
//! cargo run --bin sajiki-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use clap::Parser;
use sajiki_server::{
    config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    domain::{Room, Timestamp, entity::DEFAULT_CHAT_CAPACITY},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use sajiki_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "sajiki-server")]
#[command(about = "Synchronized watch-party room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds between clock beacons (SYNC_TICK)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    beacon_interval_secs: u64,

    /// Number of chat messages kept in the room
    #[arg(long, default_value_t = DEFAULT_CHAT_CAPACITY)]
    chat_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            beacon_interval: Duration::from_secs(args.beacon_interval_secs),
            chat_capacity: args.chat_capacity,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Repository
    // 3. MessagePusher
    // 4. UseCases (AppState)
    // 5. Server

    // 1. Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Create Repository (in-memory room)
    let room = Arc::new(Mutex::new(Room::with_chat_capacity(
        Timestamp::new(clock.now_millis()),
        config.chat_capacity,
    )));
    tracing::info!("Room created (chat capacity {})", config.chat_capacity);
    let repository = Arc::new(InMemoryRoomRepository::new(room));

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 4. Create UseCases
    let state = AppState::new(repository, message_pusher, clock);

    // 5. Create and run the server
    let server = Server::new(state, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
