use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::{DateTime, Local};
use log::{info, warn};
use model::{
    catalog::SessionCatalog,
    errors::LedgerError,
    session::{ForumType, Session, SessionType},
    tx::Tx,
};
use storage::calendar::{CalendarStore, SessionHandle};
use tx_macro::tx;

use super::{history::History, users::Users};

#[derive(Clone)]
pub struct Calendar {
    calendar: Arc<CalendarStore>,
    catalog: Arc<SessionCatalog>,
    users: Users,
    logs: History,
}

impl Calendar {
    pub(crate) fn new(
        calendar: Arc<CalendarStore>,
        catalog: SessionCatalog,
        users: Users,
        logs: History,
    ) -> Self {
        Calendar {
            calendar,
            catalog: Arc::new(catalog),
            users,
            logs,
        }
    }

    #[tx]
    pub fn schedule_session(
        &self,
        tx: &mut Tx,
        tp: SessionType,
        start_at: DateTime<Local>,
        forum: ForumType,
        instructor: ObjectId,
    ) -> Result<Session, LedgerError> {
        let instructor = self
            .users
            .get_instructor(instructor)
            .ok_or(LedgerError::InstructorNotFound(instructor))?;

        let session = Session::create(tp, start_at, forum, &instructor, &self.catalog)
            .inspect_err(|err| warn!("failed to schedule {}: {}", tp, err))?;
        self.calendar.add_session(session.clone());
        self.logs.schedule_session(tx, &session, &instructor);
        info!("scheduled {}", session);
        Ok(session)
    }

    pub fn get(&self, id: ObjectId) -> Option<Session> {
        self.calendar.get(id).map(|session| session.lock().clone())
    }

    /// Sessions in scheduling order.
    pub fn sessions(&self) -> Vec<Session> {
        self.calendar.sessions()
    }

    pub(crate) fn handle(&self, id: ObjectId) -> Result<SessionHandle, LedgerError> {
        self.calendar.get(id).ok_or(LedgerError::SessionNotFound(id))
    }
}
