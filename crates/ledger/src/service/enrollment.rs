use bson::oid::ObjectId;
use log::{info, warn};
use model::{errors::LedgerError, session::Session, tx::Tx};
use tx_macro::tx;

use super::{calendar::Calendar, history::History, users::Users};

#[derive(Clone)]
pub struct Enrollment {
    calendar: Calendar,
    users: Users,
    logs: History,
    senior_age: u32,
}

impl Enrollment {
    pub(crate) fn new(calendar: Calendar, users: Users, logs: History, senior_age: u32) -> Self {
        Enrollment {
            calendar,
            users,
            logs,
            senior_age,
        }
    }

    /// Adds the client to the session. The session stays locked from the
    /// first check until the participant is written, so concurrent callers
    /// can never push it over capacity.
    #[tx]
    pub fn enroll(
        &self,
        tx: &mut Tx,
        client: ObjectId,
        session: ObjectId,
    ) -> Result<(), LedgerError> {
        let handle = self.calendar.handle(session)?;
        let mut session = handle.lock();
        match self.check_and_add(tx, client, &mut session) {
            Ok(()) => {
                info!("client {} enrolled to {}", client, *session);
                Ok(())
            }
            Err(err) => {
                warn!("Failed registration: {}", err);
                Err(err)
            }
        }
    }

    fn check_and_add(
        &self,
        tx: &mut Tx,
        client: ObjectId,
        session: &mut Session,
    ) -> Result<(), LedgerError> {
        let now = tx.now();
        if !session.is_in_future(now) {
            return Err(LedgerError::SessionNotUpcoming {
                session: session.id(),
            });
        }

        if session.is_full() {
            return Err(LedgerError::SessionFull {
                session: session.id(),
                capacity: session.capacity(),
            });
        }

        let record = self
            .users
            .get_client(client)
            .ok_or(LedgerError::ClientNotRegistered(client))?;
        if record.balance() < session.price() {
            return Err(LedgerError::InsufficientBalance {
                client,
                balance: record.balance(),
                price: session.price(),
            });
        }

        let age = record.age(now.date_naive());
        if !session
            .forum()
            .admits(record.gender(), age, self.senior_age)
        {
            return Err(LedgerError::ForumMismatch {
                client,
                forum: session.forum(),
            });
        }

        if !self.users.is_registered(client) {
            return Err(LedgerError::ClientNotRegistered(client));
        }

        if !session.add_participant(client) {
            return Err(LedgerError::DuplicateEnrollment {
                client,
                session: session.id(),
            });
        }

        self.logs.enroll(tx, &record, session);
        Ok(())
    }
}
