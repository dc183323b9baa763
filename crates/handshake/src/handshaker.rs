use core::fmt;

use bytes::BytesMut;
use mantle_handshake_primitives::{Acceptor, BoxedEndpoint, ChannelConfig};

use crate::error::HandshakeError;

/// State threaded through the handshake chain.
///
/// The manager owns this record for the whole chain and lends it to
/// exactly one stage at a time, so no two stages ever observe it
/// concurrently. On success the caller gets it back with whatever the
/// stages left in it; on failure it is discarded along with the endpoint.
pub struct HandshakerArgs {
    /// The transport being negotiated. A stage may replace it wholesale,
    /// e.g. a security stage wrapping the raw stream in an encrypted one.
    pub endpoint: BoxedEndpoint,
    /// Private copy of the channel configuration; stages mutate it freely.
    pub config: ChannelConfig,
    /// Bytes a stage read past the end of its own traffic. Carried forward
    /// so the next stage (or the application) consumes them first.
    pub read_buffer: BytesMut,
}

impl HandshakerArgs {
    #[must_use]
    pub fn new(endpoint: BoxedEndpoint, config: ChannelConfig) -> Self {
        Self {
            endpoint,
            config,
            read_buffer: BytesMut::new(),
        }
    }
}

impl fmt::Debug for HandshakerArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandshakerArgs")
            .field("config", &self.config)
            .field("read_buffer_len", &self.read_buffer.len())
            .finish_non_exhaustive()
    }
}

/// One pluggable stage in a handshake chain.
///
/// Stages are registered with a [`HandshakeManager`](crate::HandshakeManager)
/// and invoked strictly in registration order, one at a time. A stage
/// signals completion by resolving its `handshake` future; the first error
/// short-circuits every stage after it.
#[async_trait::async_trait]
pub trait Handshaker: Send + Sync {
    /// Stable stage name, used in logs.
    fn name(&self) -> &'static str;

    /// Runs this stage to completion.
    ///
    /// `acceptor` is present only for passively accepted connections.
    /// Implementations must tolerate being raced by
    /// [`Handshaker::shutdown`]: the manager may drop this future
    /// mid-flight when the chain is cancelled.
    async fn handshake(
        &self,
        acceptor: Option<&Acceptor>,
        args: &mut HandshakerArgs,
    ) -> Result<(), HandshakeError>;

    /// Unblocks any pending asynchronous work so an in-flight `handshake`
    /// can terminate promptly.
    ///
    /// Called on every registered stage when the chain is shut down, not
    /// just the active one, so a stage that has not started yet also
    /// learns to refuse. Must be safe to call repeatedly and before
    /// `handshake` was ever invoked. Stages with no internal blocking
    /// resources can rely on the default no-op.
    fn shutdown(&self) {}
}
