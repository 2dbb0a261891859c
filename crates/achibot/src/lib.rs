//! achibot library interface

pub mod client;
pub mod config;
pub mod error;
pub mod harness;
pub mod service;
pub mod session;
pub mod socket;

pub use client::NakamaClient;
pub use config::Config;
pub use error::ClientError;
pub use harness::{Connection, Harness};
pub use service::{GameService, RealtimeChannel};
pub use session::Session;
pub use socket::Socket;
