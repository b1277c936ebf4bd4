use std::sync::Arc;

use bson::oid::ObjectId;
use log::debug;
use model::session::Session;
use parking_lot::{Mutex, RwLock};

pub type SessionHandle = Arc<Mutex<Session>>;

/// Scheduled sessions in scheduling order. Each session has its own lock so
/// enrollment into one session never waits on another.
#[derive(Default)]
pub struct CalendarStore {
    sessions: RwLock<Vec<(ObjectId, SessionHandle)>>,
}

impl CalendarStore {
    pub(crate) fn new() -> Self {
        CalendarStore::default()
    }

    pub fn add_session(&self, session: Session) {
        debug!("add session {}", session.id());
        self.sessions
            .write()
            .push((session.id(), Arc::new(Mutex::new(session))));
    }

    pub fn get(&self, id: ObjectId) -> Option<SessionHandle> {
        self.sessions
            .read()
            .iter()
            .find(|(session_id, _)| *session_id == id)
            .map(|(_, session)| session.clone())
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.sessions
            .read()
            .iter()
            .map(|(_, session)| session.lock().clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}
