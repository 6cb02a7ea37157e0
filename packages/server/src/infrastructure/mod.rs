//! Infrastructure layer: adapters for the domain ports and the wire format.

pub mod dto;
pub mod message_pusher;
pub mod repository;
