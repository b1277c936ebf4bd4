use std::sync::Arc;

use bson::oid::ObjectId;
use model::{
    decimal::Decimal,
    history::{Action, HistoryRow},
    session::Session,
    tx::Tx,
    user::{client::Client, instructor::Instructor, secretary::Secretary},
};
use storage::history::HistoryStore;

#[derive(Clone)]
pub struct History {
    store: Arc<HistoryStore>,
}

impl History {
    pub fn new(store: Arc<HistoryStore>) -> Self {
        History { store }
    }

    pub fn logs(&self, limit: usize, offset: usize) -> Vec<HistoryRow> {
        self.store.get_logs(limit, offset)
    }

    pub fn actor_logs(&self, actor: ObjectId, limit: usize, offset: usize) -> Vec<HistoryRow> {
        self.store.get_actor_logs(actor, limit, offset)
    }

    /// Human readable action log, oldest first.
    pub fn actions(&self) -> Vec<String> {
        self.store
            .dump()
            .iter()
            .map(|row| row.action.to_string())
            .collect()
    }

    pub(crate) fn appoint_secretary(&self, tx: &mut Tx, secretary: &Secretary) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            vec![secretary.id()],
            tx.now(),
            Action::AppointSecretary {
                name: secretary.person.name.clone(),
                salary: secretary.salary,
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn register_client(&self, tx: &mut Tx, client: &Client) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            vec![client.id()],
            tx.now(),
            Action::RegisterClient {
                name: client.name().to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn unregister_client(&self, tx: &mut Tx, client: &Client) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            vec![client.id()],
            tx.now(),
            Action::UnregisterClient {
                name: client.name().to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn hire_instructor(&self, tx: &mut Tx, instructor: &Instructor) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            vec![instructor.id()],
            tx.now(),
            Action::HireInstructor {
                name: instructor.name().to_string(),
                salary_per_hour: instructor.salary_per_hour,
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn schedule_session(&self, tx: &mut Tx, session: &Session, instructor: &Instructor) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            vec![instructor.id()],
            tx.now(),
            Action::ScheduleSession {
                tp: session.tp(),
                start_at: session.start_at(),
                instructor: instructor.name().to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn enroll(&self, tx: &mut Tx, client: &Client, session: &Session) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            vec![client.id()],
            tx.now(),
            Action::Enroll {
                name: client.name().to_string(),
                tp: session.tp(),
                start_at: session.start_at(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn notify_all(&self, tx: &mut Tx, recipients: Vec<ObjectId>, message: &str) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            recipients,
            tx.now(),
            Action::NotifyAll {
                message: message.to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn notify_all_dated(
        &self,
        tx: &mut Tx,
        recipients: Vec<ObjectId>,
        date: &str,
        message: &str,
    ) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            recipients,
            tx.now(),
            Action::NotifyAllDated {
                date: date.to_string(),
                message: message.to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn notify_session(&self, tx: &mut Tx, session: &Session, message: &str) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            session.participants().to_vec(),
            tx.now(),
            Action::NotifySession {
                tp: session.tp(),
                start_at: session.start_at(),
                message: message.to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn deposit(&self, tx: &mut Tx, amount: Decimal, description: &str) {
        let entry = HistoryRow::new(
            tx.actor(),
            tx.now(),
            Action::Deposit {
                amount,
                description: description.to_string(),
            },
        );
        tx.stage(entry);
    }

    pub(crate) fn pay_salaries(&self, tx: &mut Tx, employees: Vec<ObjectId>, total: Decimal) {
        let entry = HistoryRow::with_sub_actors(
            tx.actor(),
            employees,
            tx.now(),
            Action::PaySalaries { total },
        );
        tx.stage(entry);
    }
}
