//! Stand-in for the task-execution side of the chat app.
//!
//! Every submitted message keeps its session busy for a fixed window, which
//! is enough to exercise the editor's busy guard from the demo host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::editor::{SessionActivity, SessionId};

#[derive(Debug)]
pub struct SimulatedAgent {
    task_duration: Duration,
    busy_until: RefCell<HashMap<SessionId, Instant>>,
}

impl SimulatedAgent {
    pub fn new(task_duration: Duration) -> Self {
        Self {
            task_duration,
            busy_until: RefCell::new(HashMap::new()),
        }
    }

    pub fn start_task(&self, session: &SessionId) {
        self.start_task_at(session, Instant::now());
    }

    fn start_task_at(&self, session: &SessionId, now: Instant) {
        debug!(%session, ms = self.task_duration.as_millis() as u64, "agent task started");
        self.busy_until
            .borrow_mut()
            .insert(session.clone(), now + self.task_duration);
    }

    fn busy_at(&self, session: &SessionId, now: Instant) -> bool {
        let mut busy_until = self.busy_until.borrow_mut();
        match busy_until.get(session) {
            Some(until) if now < *until => true,
            Some(_) => {
                busy_until.remove(session);
                false
            }
            None => false,
        }
    }
}

impl SessionActivity for SimulatedAgent {
    fn is_session_busy(&self, session: &SessionId) -> bool {
        self.busy_at(session, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::SimulatedAgent;
    use crate::editor::{SessionActivity, SessionId};
    use std::time::{Duration, Instant};

    #[test]
    fn task_keeps_only_its_session_busy_until_it_ends() {
        let agent = SimulatedAgent::new(Duration::from_secs(2));
        let a = SessionId::new("a");
        let b = SessionId::new("b");
        let start = Instant::now();

        agent.start_task_at(&a, start);

        assert!(agent.busy_at(&a, start + Duration::from_secs(1)));
        assert!(!agent.busy_at(&b, start + Duration::from_secs(1)));
        assert!(!agent.busy_at(&a, start + Duration::from_secs(2)));
    }

    #[test]
    fn zero_duration_never_reports_busy() {
        let agent = SimulatedAgent::new(Duration::ZERO);
        let session = SessionId::new("a");
        agent.start_task(&session);
        assert!(!agent.is_session_busy(&session));
    }
}
