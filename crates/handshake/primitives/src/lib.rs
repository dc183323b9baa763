//! Boundary contracts consumed by the handshake orchestration layer.
//!
//! These are the types a handshake stage sees at its seams: the transport
//! endpoint it reads and writes, the channel configuration it may mutate,
//! and the passive-accept metadata it may inspect. None of them carry any
//! orchestration logic of their own.

pub mod acceptor;
pub mod config;
pub mod endpoint;

pub use acceptor::Acceptor;
pub use config::{ChannelConfig, ConfigValue};
pub use endpoint::{BoxedEndpoint, Endpoint};
