use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use mantle_handshake_primitives::{Acceptor, BoxedEndpoint, ChannelConfig};

use crate::error::HandshakeError;
use crate::handshaker::{Handshaker, HandshakerArgs};

/// Orchestrates an ordered chain of [`Handshaker`] stages over one
/// connection.
///
/// Cheap to clone; all clones share the same chain state. During an active
/// handshake the manager is co-owned by the caller, the deadline timer
/// task, and the driving `do_handshake` future, and the registered stages
/// are dropped (in registration order) when the last handle goes away.
///
/// `shutdown` may be called from any task at any point; it is the single
/// cancellation path for both external aborts and deadline expiry.
#[derive(Clone)]
pub struct HandshakeManager {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<State>,
    shutdown: CancellationToken,
}

struct State {
    handshakers: Vec<Arc<dyn Handshaker>>,
    /// Index of the next stage to invoke. Monotonically non-decreasing,
    /// never exceeds `handshakers.len()`.
    index: usize,
    started: bool,
}

impl HandshakeManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    handshakers: Vec::new(),
                    index: 0,
                    started: false,
                }),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Appends a stage to the chain. Registration order is execution order.
    pub fn add(&self, handshaker: Arc<dyn Handshaker>) {
        let mut state = self.inner.state.lock();
        state.handshakers.push(handshaker);
    }

    /// Shuts the chain down.
    ///
    /// Broadcast to every registered stage, not just the active one, so a
    /// stage that has not started yet also learns to refuse. This only
    /// unblocks the chain; the in-flight `do_handshake` future observes the
    /// cancellation and resolves with [`HandshakeError::Shutdown`]. Calling
    /// this repeatedly, or after the chain already completed, has no
    /// further effect.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
        let state = self.inner.state.lock();
        for handshaker in &state.handshakers {
            handshaker.shutdown();
        }
    }

    /// Runs every registered stage in order against the given endpoint.
    ///
    /// Takes ownership of the endpoint and a private copy of `config`,
    /// arms a single deadline for the whole chain, and resolves exactly
    /// once: with the negotiated [`HandshakerArgs`] on success, or with the
    /// first stage's error, forwarded verbatim, on failure. On failure the
    /// endpoint is discarded; the handshake did not complete and the
    /// connection must not be used.
    ///
    /// May be called at most once per manager; later calls resolve with
    /// [`HandshakeError::AlreadyStarted`].
    ///
    /// # Errors
    ///
    /// The first error reported by any stage, or
    /// [`HandshakeError::Shutdown`] if the deadline fired or `shutdown`
    /// was called before the chain completed.
    pub async fn do_handshake(
        &self,
        endpoint: BoxedEndpoint,
        config: &ChannelConfig,
        deadline: Instant,
        acceptor: Option<Acceptor>,
    ) -> Result<HandshakerArgs, HandshakeError> {
        {
            let mut state = self.inner.state.lock();
            if state.started {
                return Err(HandshakeError::AlreadyStarted);
            }
            state.started = true;
        }

        let mut args = HandshakerArgs::new(endpoint, config.clone());

        // The timer task holds its own manager handle for the duration of
        // the chain and stands down when `done` is cancelled. The guard
        // cancels `done` on every chain exit, including the driving future
        // being dropped, so fire and stand-down cannot both happen.
        let done = CancellationToken::new();
        let timer = tokio::spawn({
            let manager = self.clone();
            let done = done.clone();
            async move {
                tokio::select! {
                    () = time::sleep_until(deadline) => {
                        warn!("handshake deadline exceeded, shutting down chain");
                        manager.shutdown();
                    }
                    () = done.cancelled() => {}
                }
            }
        });
        let done_guard = done.drop_guard();

        let result = self.run_chain(acceptor.as_ref(), &mut args).await;

        drop(done_guard);
        let _ignored = timer.await;

        match result {
            Ok(()) => {
                debug!("handshake chain complete");
                Ok(args)
            }
            Err(err) => {
                debug!(%err, "handshake chain failed");
                Err(err)
            }
        }
    }

    async fn run_chain(
        &self,
        acceptor: Option<&Acceptor>,
        args: &mut HandshakerArgs,
    ) -> Result<(), HandshakeError> {
        loop {
            let (index, handshaker) = {
                let mut state = self.inner.state.lock();
                debug_assert!(state.index <= state.handshakers.len());
                let Some(handshaker) = state.handshakers.get(state.index) else {
                    return Ok(());
                };
                let handshaker = Arc::clone(handshaker);
                let index = state.index;
                state.index += 1;
                (index, handshaker)
            };

            if self.inner.shutdown.is_cancelled() {
                debug!(index, name = handshaker.name(), "chain shut down, stage skipped");
                return Err(HandshakeError::Shutdown);
            }

            debug!(index, name = handshaker.name(), "starting handshaker");

            tokio::select! {
                result = handshaker.handshake(acceptor, args) => result?,
                () = self.inner.shutdown.cancelled() => {
                    debug!(index, name = handshaker.name(), "handshaker shut down mid-stage");
                    return Err(HandshakeError::Shutdown);
                }
            }
        }
    }
}

impl Default for HandshakeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandshakeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("HandshakeManager")
            .field("handshakers", &state.handshakers.len())
            .field("index", &state.index)
            .field("started", &state.started)
            .field("shutdown", &self.inner.shutdown.is_cancelled())
            .finish()
    }
}
