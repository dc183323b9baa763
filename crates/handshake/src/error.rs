use thiserror::Error;

/// Failure of a handshake chain.
///
/// The manager forwards the first stage error verbatim and never wraps or
/// reinterprets it. Deadline expiry is deliberately not a distinct kind:
/// the timer shuts the chain down and the aborted stage surfaces as
/// [`HandshakeError::Shutdown`], exactly like an external cancellation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HandshakeError {
    /// The chain was shut down before completion, either by the deadline
    /// timer or by an explicit `shutdown()` call.
    #[error("handshake shut down before completion")]
    Shutdown,

    /// `do_handshake` was invoked more than once on the same manager.
    #[error("handshake already started on this manager")]
    AlreadyStarted,

    /// A stage failed reading from or writing to the endpoint.
    #[error("endpoint i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The peer rejected or failed the negotiation a stage was running.
    #[error("negotiation failed: {0}")]
    Negotiation(String),

    /// Any other stage-specific failure.
    #[error("handshake stage failed: {0}")]
    Stage(String),
}
