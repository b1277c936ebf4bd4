use bson::oid::ObjectId;
use chrono::{DateTime, Local};
use model::{
    catalog::SessionCatalog,
    config::Config,
    decimal::Decimal,
    errors::LedgerError,
    session::{ForumType, Session, SessionType},
    tx::Tx,
    user::{client::Client, instructor::Instructor, secretary::Secretary, Person},
};
use service::{
    calendar::Calendar, enrollment::Enrollment, history::History,
    notification::Notifications, treasury::Treasury, users::Users,
};
use storage::{session::Db, Storage};

pub mod service;

/// The gym registry. Owns every client, instructor and session and is the
/// only entry point for changing them.
#[derive(Clone)]
pub struct Ledger {
    pub db: Db,
    pub config: Config,
    pub users: Users,
    pub calendar: Calendar,
    pub enrollment: Enrollment,
    pub notifications: Notifications,
    pub treasury: Treasury,
    pub history: History,
}

impl Ledger {
    pub fn new(storage: Storage, config: Config) -> Self {
        Ledger::with_catalog(storage, config, SessionCatalog::default())
    }

    pub fn with_catalog(storage: Storage, config: Config, catalog: SessionCatalog) -> Self {
        let history = History::new(storage.history);
        let users = Users::new(storage.users.clone(), history.clone());
        let calendar = Calendar::new(storage.calendar, catalog, users.clone(), history.clone());
        let enrollment = Enrollment::new(
            calendar.clone(),
            users.clone(),
            history.clone(),
            config.senior_age,
        );
        let notifications = Notifications::new(storage.users, calendar.clone(), history.clone());
        let treasury = Treasury::new(storage.treasury, users.clone(), history.clone());
        Ledger {
            db: storage.db,
            config,
            users,
            calendar,
            enrollment,
            notifications,
            treasury,
            history,
        }
    }

    /// Opens a transaction acting as the current secretary.
    pub fn tx(&self) -> Tx {
        self.tx_at(Local::now())
    }

    /// Same as [`Ledger::tx`] with a fixed clock.
    pub fn tx_at(&self, now: DateTime<Local>) -> Tx {
        let actor = self
            .users
            .secretary()
            .map(|s| s.id())
            .unwrap_or_else(system_actor);
        self.db.start_session(actor, now)
    }

    pub fn appoint_secretary(
        &self,
        tx: &mut Tx,
        person: Person,
        salary: Decimal,
    ) -> Result<Secretary, LedgerError> {
        let secretary = self.users.appoint_secretary(tx, person, salary)?;
        tx.set_actor(secretary.id());
        Ok(secretary)
    }

    pub fn register_client(&self, tx: &mut Tx, person: Person) -> Result<Client, LedgerError> {
        self.users
            .register_client(tx, person, self.config.min_client_age)
    }

    pub fn unregister_client(&self, tx: &mut Tx, client: ObjectId) -> Result<(), LedgerError> {
        self.users.unregister_client(tx, client)
    }

    pub fn hire_instructor(
        &self,
        tx: &mut Tx,
        person: Person,
        salary_per_hour: Decimal,
        certifications: Vec<SessionType>,
    ) -> Result<Instructor, LedgerError> {
        self.users
            .hire_instructor(tx, person, salary_per_hour, certifications)
    }

    pub fn schedule_session(
        &self,
        tx: &mut Tx,
        tp: SessionType,
        start_at: DateTime<Local>,
        forum: ForumType,
        instructor: ObjectId,
    ) -> Result<Session, LedgerError> {
        self.calendar
            .schedule_session(tx, tp, start_at, forum, instructor)
    }

    pub fn enroll(
        &self,
        tx: &mut Tx,
        client: ObjectId,
        session: ObjectId,
    ) -> Result<(), LedgerError> {
        self.enrollment.enroll(tx, client, session)
    }

    pub fn notify_all(&self, tx: &mut Tx, message: &str) -> Result<usize, LedgerError> {
        self.notifications.notify_all(tx, message)
    }

    pub fn notify_all_dated(
        &self,
        tx: &mut Tx,
        date: &str,
        message: &str,
    ) -> Result<usize, LedgerError> {
        self.notifications.notify_all_dated(tx, date, message)
    }

    pub fn notify_session(
        &self,
        tx: &mut Tx,
        session: ObjectId,
        message: &str,
    ) -> Result<usize, LedgerError> {
        self.notifications.notify_session(tx, session, message)
    }

    pub fn deposit(
        &self,
        tx: &mut Tx,
        amount: Decimal,
        description: &str,
    ) -> Result<(), LedgerError> {
        self.treasury.deposit(tx, amount, description)
    }

    pub fn pay_salaries(&self, tx: &mut Tx) -> Result<Decimal, LedgerError> {
        self.treasury.pay_salaries(tx)
    }

    pub fn balance(&self) -> Decimal {
        self.treasury.balance()
    }
}

fn system_actor() -> ObjectId {
    ObjectId::from_bytes([0; 12])
}

#[cfg(test)]
pub(crate) mod testing;
