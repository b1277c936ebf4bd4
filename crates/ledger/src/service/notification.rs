use std::sync::Arc;

use bson::oid::ObjectId;
use log::info;
use model::{errors::LedgerError, tx::Tx};
use storage::user::UserStore;
use tx_macro::tx;

use super::{calendar::Calendar, history::History};

#[derive(Clone)]
pub struct Notifications {
    users: Arc<UserStore>,
    calendar: Calendar,
    logs: History,
}

impl Notifications {
    pub(crate) fn new(users: Arc<UserStore>, calendar: Calendar, logs: History) -> Self {
        Notifications {
            users,
            calendar,
            logs,
        }
    }

    /// Sends `message` to every registered client.
    #[tx]
    pub fn notify_all(&self, tx: &mut Tx, message: &str) -> Result<usize, LedgerError> {
        let recipients = self.users.notify_active(message);
        info!("notified {} clients", recipients.len());
        let delivered = recipients.len();
        self.logs.notify_all(tx, recipients, message);
        Ok(delivered)
    }

    #[tx]
    pub fn notify_all_dated(
        &self,
        tx: &mut Tx,
        date: &str,
        message: &str,
    ) -> Result<usize, LedgerError> {
        let text = format!("[{}] {}", date, message);
        let recipients = self.users.notify_active(&text);
        let delivered = recipients.len();
        self.logs.notify_all_dated(tx, recipients, date, message);
        Ok(delivered)
    }

    /// Sends `message` to everyone listed in the session, including clients
    /// who unregistered after joining.
    #[tx]
    pub fn notify_session(
        &self,
        tx: &mut Tx,
        session: ObjectId,
        message: &str,
    ) -> Result<usize, LedgerError> {
        let session = self
            .calendar
            .get(session)
            .ok_or(LedgerError::SessionNotFound(session))?;
        let delivered = self.users.notify(session.participants(), message);
        info!("notified {} participants of {}", delivered, session);
        self.logs.notify_session(tx, &session, message);
        Ok(delivered)
    }
}
