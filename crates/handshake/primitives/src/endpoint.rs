use tokio::io::{AsyncRead, AsyncWrite};

/// A bidirectional byte-stream transport.
///
/// The orchestration layer never performs I/O itself; it only moves
/// ownership of the endpoint into the handshaker args at chain start and
/// hands it back to the caller at chain completion. Any `AsyncRead +
/// AsyncWrite` stream qualifies, so TCP sockets, TLS streams and in-memory
/// duplex pipes all work unchanged.
pub trait Endpoint: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> Endpoint for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// An owned, type-erased endpoint as threaded through the handshake chain.
pub type BoxedEndpoint = Box<dyn Endpoint>;
