use std::sync::Arc;

use bson::oid::ObjectId;
use log::{info, warn};
use model::{
    decimal::Decimal,
    errors::LedgerError,
    session::SessionType,
    tx::Tx,
    user::{client::Client, instructor::Instructor, secretary::Secretary, Person},
};
use storage::user::{ClientUpsert, UserStore};
use tx_macro::tx;

use super::history::History;

#[derive(Clone)]
pub struct Users {
    store: Arc<UserStore>,
    logs: History,
}

impl Users {
    pub(crate) fn new(store: Arc<UserStore>, logs: History) -> Self {
        Users { store, logs }
    }

    #[tx]
    pub fn register_client(
        &self,
        tx: &mut Tx,
        person: Person,
        min_age: u32,
    ) -> Result<Client, LedgerError> {
        let age = person.age(tx.now().date_naive());
        if age < min_age {
            warn!("{} is too young to register: {}", person.name, age);
            return Err(LedgerError::InvalidAge {
                person: person.id,
                age,
                min: min_age,
            });
        }

        let id = person.id;
        let client = match self.store.register_client(person) {
            ClientUpsert::Inserted(client) => client,
            ClientUpsert::Reactivated(client) => {
                info!("client {} registered again", client.name());
                client
            }
            ClientUpsert::AlreadyActive => return Err(LedgerError::DuplicateClient(id)),
        };
        self.logs.register_client(tx, &client);
        Ok(client)
    }

    #[tx]
    pub fn unregister_client(&self, tx: &mut Tx, id: ObjectId) -> Result<(), LedgerError> {
        let client = self
            .store
            .deactivate_client(id)
            .ok_or(LedgerError::ClientNotRegistered(id))?;
        self.logs.unregister_client(tx, &client);
        Ok(())
    }

    #[tx]
    pub fn hire_instructor(
        &self,
        tx: &mut Tx,
        person: Person,
        salary_per_hour: Decimal,
        certifications: Vec<SessionType>,
    ) -> Result<Instructor, LedgerError> {
        let instructor = Instructor::new(person, salary_per_hour, certifications);
        self.store.insert_instructor(instructor.clone());
        self.logs.hire_instructor(tx, &instructor);
        Ok(instructor)
    }

    #[tx]
    pub fn appoint_secretary(
        &self,
        tx: &mut Tx,
        person: Person,
        salary: Decimal,
    ) -> Result<Secretary, LedgerError> {
        let secretary = Secretary::new(person, salary);
        if let Some(previous) = self.store.set_secretary(secretary.clone()) {
            info!("secretary {} replaced", previous.person.name);
        }
        self.logs.appoint_secretary(tx, &secretary);
        Ok(secretary)
    }

    pub fn get_client(&self, id: ObjectId) -> Option<Client> {
        self.store.get_client(id)
    }

    pub fn is_registered(&self, id: ObjectId) -> bool {
        self.store.is_active_client(id)
    }

    /// Registered clients in registration order.
    pub fn clients(&self) -> Vec<Client> {
        self.store.clients(true)
    }

    pub fn get_instructor(&self, id: ObjectId) -> Option<Instructor> {
        self.store.get_instructor(id)
    }

    pub fn instructors(&self) -> Vec<Instructor> {
        self.store.instructors()
    }

    pub fn secretary(&self) -> Option<Secretary> {
        self.store.secretary()
    }
}

#[cfg(test)]
mod tests {
    use model::{decimal::Decimal, history::Action, user::Gender};

    use super::*;
    use crate::testing::{ledger, now, person};

    #[test]
    fn test_register_exactly_18() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        let adult = Person::new("Adult", Decimal::int(10), Gender::Male, "15-01-2007").unwrap();
        let minor = Person::new("Minor", Decimal::int(10), Gender::Male, "16-01-2007").unwrap();

        let client = ledger.register_client(&mut tx, adult).unwrap();
        assert!(ledger.users.is_registered(client.id()));

        let err = ledger.register_client(&mut tx, minor).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAge { age: 17, min: 18, .. }));
        assert_eq!(1, ledger.users.clients().len());
    }

    #[test]
    fn test_register_same_person_twice() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        let dana = person("Dana", Gender::Female, 30, 100);

        ledger.register_client(&mut tx, dana.clone()).unwrap();
        let err = ledger.register_client(&mut tx, dana.clone()).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateClient(id) if id == dana.id));
        assert_eq!(1, ledger.users.clients().len());
    }

    #[test]
    fn test_namesakes_are_different_clients() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        ledger
            .register_client(&mut tx, person("Dana", Gender::Female, 30, 100))
            .unwrap();
        ledger
            .register_client(&mut tx, person("Dana", Gender::Female, 45, 100))
            .unwrap();
        assert_eq!(2, ledger.users.clients().len());
    }

    #[test]
    fn test_unregister() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        let client = ledger
            .register_client(&mut tx, person("Dana", Gender::Female, 30, 100))
            .unwrap();

        ledger.unregister_client(&mut tx, client.id()).unwrap();
        assert!(!ledger.users.is_registered(client.id()));
        assert!(ledger.users.clients().is_empty());
        // the record stays reachable for sessions that refer to it
        assert!(ledger.users.get_client(client.id()).is_some());

        let err = ledger.unregister_client(&mut tx, client.id()).unwrap_err();
        assert!(matches!(err, LedgerError::ClientNotRegistered(_)));
        let err = ledger.unregister_client(&mut tx, ObjectId::new()).unwrap_err();
        assert!(matches!(err, LedgerError::ClientNotRegistered(_)));
    }

    #[test]
    fn test_register_again_after_unregister() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        let dana = person("Dana", Gender::Female, 30, 100);
        let client = ledger.register_client(&mut tx, dana.clone()).unwrap();
        ledger.notify_all(&mut tx, "hello").unwrap();
        ledger.unregister_client(&mut tx, client.id()).unwrap();

        let again = ledger.register_client(&mut tx, dana).unwrap();
        assert_eq!(client.id(), again.id());
        assert_eq!(vec!["hello"], again.notifications());
        assert!(ledger.users.is_registered(client.id()));
    }

    #[test]
    fn test_failed_registration_leaves_no_history() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        let _ = ledger.register_client(&mut tx, person("Kid", Gender::Male, 12, 0));
        assert!(ledger.history.logs(10, 0).is_empty());
        assert!(!tx.in_transaction());
    }

    #[test]
    fn test_hire_instructor_and_secretary() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        let instructor = ledger
            .hire_instructor(
                &mut tx,
                person("Elis", Gender::Male, 40, 0),
                Decimal::int(70),
                vec![SessionType::Ninja],
            )
            .unwrap();
        assert_eq!(1, ledger.users.instructors().len());
        assert!(ledger
            .users
            .get_instructor(instructor.id())
            .unwrap()
            .is_certified(SessionType::Ninja));

        let secretary = ledger
            .appoint_secretary(&mut tx, person("Lior", Gender::Female, 35, 0), Decimal::int(9000))
            .unwrap();
        assert_eq!(secretary.id(), tx.actor());
        assert_eq!(secretary.id(), ledger.tx_at(now()).actor());

        let rows = ledger.history.actor_logs(secretary.id(), 10, 0);
        assert_eq!(1, rows.len());
        assert!(matches!(rows[0].action, Action::AppointSecretary { .. }));
    }

    #[test]
    fn test_new_secretary_replaces_old() {
        let ledger = ledger();
        let mut tx = ledger.tx_at(now());
        ledger
            .appoint_secretary(&mut tx, person("Lior", Gender::Female, 35, 0), Decimal::int(9000))
            .unwrap();
        let next = ledger
            .appoint_secretary(&mut tx, person("Omer", Gender::Male, 28, 0), Decimal::int(8000))
            .unwrap();
        assert_eq!(next.id(), ledger.users.secretary().unwrap().id());
    }
}
