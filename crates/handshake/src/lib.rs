//! Handshake orchestration for freshly established connections.
//!
//! A connection rarely goes straight from `accept()` to the application:
//! it may first pass through proxy negotiation, a transport security
//! upgrade, protocol preface detection, and so on. This crate chains such
//! stages behind a uniform contract:
//!
//! - [`Handshaker`]: one pluggable stage (the capability trait)
//! - [`HandshakerArgs`]: the record threaded through the chain (endpoint,
//!   configuration, leftover read bytes)
//! - [`HandshakeManager`]: runs registered stages strictly in registration
//!   order under a single deadline, short-circuiting on the first error
//!
//! The manager resolves exactly once per handshake, whether the chain ran
//! to completion, a stage failed, the deadline fired, or
//! [`HandshakeManager::shutdown`] was called from another task.

mod error;
mod handshaker;
mod manager;

pub use error::HandshakeError;
pub use handshaker::{Handshaker, HandshakerArgs};
pub use manager::HandshakeManager;
