//! Scheduling services consumed from the host real-time kernel
//!
//! The console never implements scheduling itself. Everything it needs from
//! the kernel — suspending, spawning the built-in self-test, walking the task
//! registry, heap statistics — is expressed through the [`Kernel`] trait, and
//! the board support layer supplies the implementation. Tests supply mocks.

use core::fmt;
use core::time::Duration;

/// Stack budget, in bytes, for the self-test sub-task.
pub const SELF_TEST_STACK_BYTES: usize = 256;

/// Stack budget, in bytes, for an interactive session task.
pub const SESSION_STACK_BYTES: usize = 2048;

/// A task priority.
///
/// A numerically greater value means greater urgency. Implementations whose
/// scheduler orders priorities the other way around must translate at the
/// trait boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(pub u8);

/// Liveness state of a task, as reported by the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Runnable, waiting for the CPU.
    Ready,
    /// Currently executing.
    Running,
    /// Suspended on a timed sleep.
    Sleeping,
    /// Blocked on an event or another task.
    Waiting,
    /// Finished; resources not yet reclaimed by the owner.
    Terminated,
}

impl TaskState {
    /// Human-readable state name, as printed by the `threads` command.
    pub fn name(&self) -> &'static str {
        match self {
            TaskState::Ready => "ready",
            TaskState::Running => "running",
            TaskState::Sleeping => "sleeping",
            TaskState::Waiting => "waiting",
            TaskState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the host task registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Task name, if the creator registered one.
    pub name: Option<&'static str>,
    /// Address of the task control block.
    pub address: u32,
    /// Saved stack pointer.
    pub stack_pointer: u32,
    /// Scheduling priority.
    pub priority: Priority,
    /// Reference count held on the task.
    pub refs: u8,
    /// Current liveness state.
    pub state: TaskState,
}

/// Heap statistics reported by the kernel allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStatus {
    /// Unallocated bytes in the core memory pool.
    pub core_free: usize,
    /// Number of free heap fragments.
    pub fragments: usize,
    /// Total free heap bytes across all fragments.
    pub heap_free: usize,
}

/// Task creation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// The kernel could not allot working memory for the task.
    OutOfMemory,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SpawnError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SpawnError::OutOfMemory => defmt::write!(f, "OutOfMemory"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TaskState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TaskState::Ready => defmt::write!(f, "ready"),
            TaskState::Running => defmt::write!(f, "running"),
            TaskState::Sleeping => defmt::write!(f, "sleeping"),
            TaskState::Waiting => defmt::write!(f, "waiting"),
            TaskState::Terminated => defmt::write!(f, "terminated"),
        }
    }
}

/// Scheduling services provided by the host kernel.
///
/// A [`Handle`](Kernel::Handle) is owned by whichever component created the
/// task until [`release`](Kernel::release) returns it to the kernel; a
/// terminated task's resources stay allotted until then.
pub trait Kernel {
    /// Opaque handle to a schedulable unit of execution.
    type Handle;

    /// Suspend the calling task for at least `duration`.
    fn sleep(&self, duration: Duration);

    /// Priority of the calling task.
    fn current_priority(&self) -> Priority;

    /// Query allocator statistics.
    fn heap_status(&self) -> HeapStatus;

    /// Call `visit` once for every live task in the registry.
    fn visit_tasks(&self, visit: &mut dyn FnMut(&TaskSnapshot));

    /// Start the board's built-in self-test routine as a task at `priority`,
    /// within the [`SELF_TEST_STACK_BYTES`] budget. Diagnostic output goes to
    /// the stream the implementation wired in.
    fn spawn_self_test(&mut self, priority: Priority) -> Result<Self::Handle, SpawnError>;

    /// Current liveness state of a task.
    fn state_of(&self, handle: &Self::Handle) -> TaskState;

    /// Block until the task reaches [`TaskState::Terminated`].
    fn join(&self, handle: &Self::Handle);

    /// Reclaim a terminated task's resources, consuming the handle.
    fn release(&mut self, handle: Self::Handle);
}
