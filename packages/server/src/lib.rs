//! Sajiki: a synchronized watch-party room server.
//!
//! One room per process. Members share a chat log, a FIFO queue of video
//! links and a single playback clock that every client follows.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
