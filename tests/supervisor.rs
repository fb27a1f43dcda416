use std::cell::RefCell;
use std::rc::Rc;

use diagshell::kernel::SpawnError;
use diagshell::supervisor::{SessionSpawner, SessionState, Supervisor, TickOutcome};

#[derive(Default)]
struct SpawnerLog {
    fail: bool,
    next_handle: u32,
    spawned: Vec<u32>,
    terminated: Vec<u32>,
    released: Vec<u32>,
}

/// Mock session factory. Tests hold the second `Rc` so they can mark
/// sessions terminated and inspect the log while the supervisor owns the
/// spawner.
struct MockSpawner(Rc<RefCell<SpawnerLog>>);

impl SessionSpawner for MockSpawner {
    type Handle = u32;

    fn spawn(&mut self) -> Result<u32, SpawnError> {
        let mut log = self.0.borrow_mut();
        if log.fail {
            return Err(SpawnError::OutOfMemory);
        }
        let handle = log.next_handle;
        log.next_handle += 1;
        log.spawned.push(handle);
        Ok(handle)
    }

    fn is_terminated(&self, handle: &u32) -> bool {
        self.0.borrow().terminated.contains(handle)
    }

    fn release(&mut self, handle: u32) {
        self.0.borrow_mut().released.push(handle);
    }
}

fn supervisor() -> (Supervisor<MockSpawner>, Rc<RefCell<SpawnerLog>>) {
    let log = Rc::new(RefCell::new(SpawnerLog::default()));
    (Supervisor::new(MockSpawner(Rc::clone(&log))), log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_no_session() {
        let (supervisor, _) = supervisor();
        assert_eq!(supervisor.state(), &SessionState::NoSession);
    }

    #[test]
    fn first_tick_creates_a_session() {
        let (mut supervisor, log) = supervisor();

        assert_eq!(supervisor.tick(), TickOutcome::SessionStarted);
        assert_eq!(supervisor.state(), &SessionState::SessionActive(0));
        assert_eq!(log.borrow().spawned, vec![0]);
    }

    #[test]
    fn running_session_is_left_alone() {
        let (mut supervisor, log) = supervisor();
        supervisor.tick();

        for _ in 0..5 {
            assert_eq!(supervisor.tick(), TickOutcome::SessionRunning);
        }
        assert_eq!(log.borrow().spawned, vec![0], "no second session while one is alive");
        assert!(log.borrow().released.is_empty());
    }

    #[test]
    fn terminated_session_is_reclaimed_then_replaced() {
        let (mut supervisor, log) = supervisor();
        supervisor.tick();

        log.borrow_mut().terminated.push(0);
        assert_eq!(supervisor.tick(), TickOutcome::SessionReclaimed);
        assert_eq!(supervisor.state(), &SessionState::NoSession);
        assert_eq!(log.borrow().released, vec![0]);

        assert_eq!(supervisor.tick(), TickOutcome::SessionStarted);
        assert_eq!(supervisor.state(), &SessionState::SessionActive(1));
        assert_eq!(log.borrow().spawned, vec![0, 1]);
    }

    #[test]
    fn spawn_failure_is_retried_silently() {
        let (mut supervisor, log) = supervisor();
        log.borrow_mut().fail = true;

        for _ in 0..3 {
            assert_eq!(supervisor.tick(), TickOutcome::SpawnFailed);
            assert_eq!(supervisor.state(), &SessionState::NoSession);
        }
        assert!(log.borrow().spawned.is_empty());

        log.borrow_mut().fail = false;
        assert_eq!(supervisor.tick(), TickOutcome::SessionStarted);
        assert_eq!(log.borrow().spawned, vec![0]);
    }

    #[test]
    fn at_most_one_session_across_a_lifecycle() {
        let (mut supervisor, log) = supervisor();

        for round in 0u32..3 {
            assert_eq!(supervisor.tick(), TickOutcome::SessionStarted);
            assert_eq!(supervisor.tick(), TickOutcome::SessionRunning);
            log.borrow_mut().terminated.push(round);
            assert_eq!(supervisor.tick(), TickOutcome::SessionReclaimed);
        }

        let log = log.borrow();
        assert_eq!(log.spawned, vec![0, 1, 2]);
        assert_eq!(log.released, vec![0, 1, 2]);
    }
}
