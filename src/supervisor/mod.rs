//! Session lifecycle supervision
//!
//! The supervisor owns the console's session lifecycle. It is a two-state
//! machine, ticked at a fixed interval:
//!
//! * `NoSession`: try to create a session. Creation failure is silently
//!   retried on the next tick; it is never fatal.
//! * `SessionActive`: watch the session's task handle. Once it terminates,
//!   reclaim its resources and return to `NoSession`.
//!
//! At most one session is ever alive, which is also what makes unlocked use
//! of the console stream sound: only the active session writes to it. The
//! design polls rather than waiting on events, trading responsiveness for
//! simplicity on a constrained target.

use core::time::Duration;

use crate::kernel::{Kernel, SpawnError};

/// Interval between supervisor ticks.
pub const SUPERVISOR_TICK: Duration = Duration::from_millis(1000);

/// Session creation and reclamation, as the supervisor sees it.
///
/// An implementation spawns a task (within
/// [`SESSION_STACK_BYTES`](crate::kernel::SESSION_STACK_BYTES)) that drives
/// [`Shell::run`](crate::shell::Shell::run) over the console stream, and
/// reports that task's termination.
pub trait SessionSpawner {
    /// Handle to a spawned session task. Owned by the supervisor until
    /// released.
    type Handle;

    /// Start a new session task.
    fn spawn(&mut self) -> Result<Self::Handle, SpawnError>;

    /// Whether the session task has terminated.
    fn is_terminated(&self, handle: &Self::Handle) -> bool;

    /// Reclaim a terminated session task's resources.
    fn release(&mut self, handle: Self::Handle);
}

/// Supervisor state. The handle lives inside the state, so a session can
/// exist exactly when the machine says one does.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionState<H> {
    /// No session is alive; the next tick attempts creation.
    NoSession,
    /// A session task is alive (or terminated and awaiting reclamation).
    SessionActive(H),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new session task was created.
    SessionStarted,
    /// Session creation failed; will retry next tick.
    SpawnFailed,
    /// The active session is still running.
    SessionRunning,
    /// A terminated session was reclaimed.
    SessionReclaimed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TickOutcome::SessionStarted => defmt::write!(f, "SessionStarted"),
            TickOutcome::SpawnFailed => defmt::write!(f, "SpawnFailed"),
            TickOutcome::SessionRunning => defmt::write!(f, "SessionRunning"),
            TickOutcome::SessionReclaimed => defmt::write!(f, "SessionReclaimed"),
        }
    }
}

/// The session supervisor.
pub struct Supervisor<S: SessionSpawner> {
    spawner: S,
    state: SessionState<S::Handle>,
}

impl<S: SessionSpawner> Supervisor<S> {
    /// Create a supervisor in the `NoSession` state.
    pub fn new(spawner: S) -> Self {
        Self {
            spawner,
            state: SessionState::NoSession,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> &SessionState<S::Handle> {
        &self.state
    }

    /// Perform one supervision step without sleeping.
    ///
    /// Exactly one transition check per tick: creation when no session
    /// exists, reclamation when the existing one has terminated.
    pub fn tick(&mut self) -> TickOutcome {
        match core::mem::replace(&mut self.state, SessionState::NoSession) {
            SessionState::NoSession => match self.spawner.spawn() {
                Ok(handle) => {
                    self.state = SessionState::SessionActive(handle);
                    TickOutcome::SessionStarted
                }
                Err(SpawnError::OutOfMemory) => TickOutcome::SpawnFailed,
            },
            SessionState::SessionActive(handle) => {
                if self.spawner.is_terminated(&handle) {
                    self.spawner.release(handle);
                    TickOutcome::SessionReclaimed
                } else {
                    self.state = SessionState::SessionActive(handle);
                    TickOutcome::SessionRunning
                }
            }
        }
    }

    /// Supervise forever, ticking every [`SUPERVISOR_TICK`] regardless of
    /// state.
    pub fn run<K: Kernel>(mut self, kernel: &K) -> ! {
        loop {
            self.tick();
            kernel.sleep(SUPERVISOR_TICK);
        }
    }
}
