//! Session state machine.
//!
//! One spawned task per mounted session. The task owns the only writer
//! to the session snapshot channel; everything else in the system reads
//! snapshots. The loop's shape *is* the concurrency contract:
//!
//! ```text
//!   ┌────────────────────────── run loop ──────────────────────────┐
//!   │ resolve current status          wait for what changes next   │
//!   │ ┌──────────────────────┐        ┌──────────────────────────┐ │
//!   │ │ select! {            │        │ select! {                │ │
//!   │ │   shutdown ── break  │        │   shutdown ──── break    │ │
//!   │ │   new event ─ restart│  ───►  │   retry ─────── re-run   │ │
//!   │ │   lookup ──── publish│        │   new event ─── re-run   │ │
//!   │ │ }                    │        │ }                        │ │
//!   │ └──────────────────────┘        └──────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A newer identity event or a shutdown wins the race against an
//! in-flight profile lookup, dropping the lookup future before its
//! result can be committed — last-event-wins and no-write-after-teardown
//! fall out of the structure rather than a generation counter.

use crate::{
    AuthStatus, IdentityStream, IdentityWatch, ProfileStore, SessionState, UnauthReason,
};
use bhoomi_types::{ErrorCode, SessionId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Commands a handle can send into the run loop.
#[derive(Debug)]
enum SessionCommand {
    /// Re-run resolution for the current stream status.
    Retry,
    /// Stop the loop without publishing anything further.
    Shutdown,
}

/// The session machine task.
///
/// Constructed and spawned through [`SessionMachine::spawn`]; the struct
/// itself never escapes the task.
pub struct SessionMachine {
    session_id: SessionId,
    watch: IdentityWatch,
    store: Arc<dyn ProfileStore>,
    state_tx: watch::Sender<SessionState>,
    commands: mpsc::Receiver<SessionCommand>,
}

impl SessionMachine {
    /// Subscribes to the identity stream (exactly once) and starts the
    /// machine.
    ///
    /// The returned handle observes [`SessionState::Resolving`] until the
    /// first resolution settles.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(stream: &dyn IdentityStream, store: Arc<dyn ProfileStore>) -> SessionHandle {
        let session_id = SessionId::new();
        let (state_tx, state_rx) = watch::channel(SessionState::Resolving);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);

        let machine = SessionMachine {
            session_id,
            watch: stream.subscribe(),
            store,
            state_tx,
            commands: cmd_rx,
        };
        let task = tokio::spawn(machine.run());

        SessionHandle {
            session_id,
            state_rx,
            commands: cmd_tx,
            task: Some(task),
        }
    }

    async fn run(self) {
        let SessionMachine {
            session_id,
            mut watch,
            store,
            state_tx,
            mut commands,
        } = self;

        info!(session = %session_id, "session machine started");
        let mut status = watch.current();

        'event: loop {
            match status.clone() {
                AuthStatus::Pending => {
                    // Startup window: stay Resolving, the channel's
                    // initial value, until the provider announces.
                    debug!(session = %session_id, "identity stream pending");
                }
                AuthStatus::SignedOut => {
                    publish(
                        &state_tx,
                        session_id,
                        SessionState::Unauthenticated {
                            reason: UnauthReason::SignedOut,
                        },
                    );
                }
                AuthStatus::SignedIn(principal) => {
                    debug!(
                        session = %session_id,
                        principal = %principal.id(),
                        "resolving role"
                    );
                    let looked_up = tokio::select! {
                        biased;
                        cmd = commands.recv() => match cmd {
                            Some(SessionCommand::Retry) => continue 'event,
                            Some(SessionCommand::Shutdown) | None => break 'event,
                        },
                        fresh = watch.next() => match fresh {
                            Some(fresh) => {
                                status = fresh;
                                continue 'event;
                            }
                            None => {
                                warn!(session = %session_id, "identity stream closed mid-resolution");
                                break 'event;
                            }
                        },
                        result = store.fetch_profile(principal.id()) => result,
                    };

                    let next = match looked_up {
                        Ok(Some(profile)) => {
                            let role = profile.role();
                            info!(
                                session = %session_id,
                                principal = %principal.id(),
                                %role,
                                "session authenticated"
                            );
                            SessionState::Authenticated {
                                principal,
                                role,
                                profile,
                            }
                        }
                        Ok(None) => {
                            warn!(
                                session = %session_id,
                                principal = %principal.id(),
                                "no usable profile record; treating principal as signed out"
                            );
                            SessionState::Unauthenticated {
                                reason: UnauthReason::ProfileMissing,
                            }
                        }
                        Err(err) => {
                            warn!(
                                session = %session_id,
                                principal = %principal.id(),
                                code = err.code(),
                                error = %err,
                                "profile lookup failed"
                            );
                            SessionState::Unauthenticated {
                                reason: UnauthReason::LookupFailed,
                            }
                        }
                    };
                    publish(&state_tx, session_id, next);
                }
            }

            tokio::select! {
                biased;
                cmd = commands.recv() => match cmd {
                    Some(SessionCommand::Retry) => {
                        debug!(session = %session_id, "retry requested; re-running resolution");
                    }
                    Some(SessionCommand::Shutdown) | None => break 'event,
                },
                fresh = watch.next() => match fresh {
                    Some(fresh) => status = fresh,
                    None => break 'event,
                },
            }
        }

        debug!(session = %session_id, "session machine stopped");
    }
}

/// Publishes a settled state. `Resolving` is only ever the channel's
/// initial value; this is never called with it.
fn publish(tx: &watch::Sender<SessionState>, session: SessionId, next: SessionState) {
    let from = tx.borrow().phase();
    let to = next.phase();
    debug!(%session, %from, %to, role = ?next.role(), "session transition");
    tx.send_replace(next);
}

/// Handle to a running session machine.
///
/// Cheap snapshot reads via [`state`](Self::state), async observation via
/// [`watch`](Self::watch). [`shutdown`](Self::shutdown) stops the machine
/// gracefully; dropping the handle aborts it. Either way the machine's
/// identity subscription is released and no state write can happen
/// afterward.
#[derive(Debug)]
pub struct SessionHandle {
    session_id: SessionId,
    state_rx: watch::Receiver<SessionState>,
    commands: mpsc::Sender<SessionCommand>,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Returns the machine's log-correlation id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the latest session snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// Returns a receiver observing every published snapshot.
    ///
    /// The receiver outliving the handle sees the channel close when the
    /// machine stops.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Asks the machine to re-run resolution for the current stream
    /// status. Meaningful after [`UnauthReason::LookupFailed`]; harmless
    /// otherwise.
    ///
    /// Returns `false` if the machine has already stopped.
    pub async fn retry(&self) -> bool {
        self.commands.send(SessionCommand::Retry).await.is_ok()
    }

    /// Stops the machine and waits for the task to finish.
    ///
    /// An in-flight profile lookup is dropped, not awaited: its result
    /// can no longer reach the state channel.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
