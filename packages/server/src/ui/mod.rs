//! WebSocket / HTTP server implementation.

mod beacon;
mod handler;
mod server;
mod signal;
pub mod state;

pub use beacon::spawn_clock_beacon;
pub use server::Server;
pub use state::AppState;
