use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Metadata for a passively accepted connection.
///
/// Present only when the endpoint came from a listening socket; actively
/// initiated connections carry no acceptor. The orchestration layer passes
/// this through to every handshake stage unmodified.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Acceptor {
    /// Address of the listening socket that accepted the connection.
    pub local_addr: SocketAddr,
    /// Address of the connecting peer.
    pub remote_addr: SocketAddr,
}
