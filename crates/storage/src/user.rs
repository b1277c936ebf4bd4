use bson::oid::ObjectId;
use log::debug;
use model::user::{client::Client, instructor::Instructor, secretary::Secretary, Person};
use parking_lot::RwLock;

pub enum ClientUpsert {
    Inserted(Client),
    Reactivated(Client),
    AlreadyActive,
}

#[derive(Default)]
pub struct UserStore {
    clients: RwLock<Vec<Client>>,
    instructors: RwLock<Vec<Instructor>>,
    secretary: RwLock<Option<Secretary>>,
}

impl UserStore {
    pub(crate) fn new() -> Self {
        UserStore::default()
    }

    /// Adds a client for `person`, or reactivates the record left behind by
    /// an earlier unregistration. Both happen under one write lock.
    pub fn register_client(&self, person: Person) -> ClientUpsert {
        let mut clients = self.clients.write();
        match clients.iter_mut().find(|c| c.id() == person.id) {
            Some(client) if client.is_active => ClientUpsert::AlreadyActive,
            Some(client) => {
                debug!("reactivate client {}", client.id());
                client.is_active = true;
                ClientUpsert::Reactivated(client.clone())
            }
            None => {
                debug!("insert client {}", person.id);
                let client = Client::new(person);
                clients.push(client.clone());
                ClientUpsert::Inserted(client)
            }
        }
    }

    pub fn get_client(&self, id: ObjectId) -> Option<Client> {
        self.clients.read().iter().find(|c| c.id() == id).cloned()
    }

    pub fn is_active_client(&self, id: ObjectId) -> bool {
        self.clients
            .read()
            .iter()
            .any(|c| c.id() == id && c.is_active)
    }

    /// Marks an active client as unregistered and returns it. The record
    /// itself stays, sessions may still refer to it.
    pub fn deactivate_client(&self, id: ObjectId) -> Option<Client> {
        let mut clients = self.clients.write();
        let client = clients.iter_mut().find(|c| c.id() == id && c.is_active)?;
        client.is_active = false;
        Some(client.clone())
    }

    pub fn clients(&self, only_active: bool) -> Vec<Client> {
        self.clients
            .read()
            .iter()
            .filter(|c| !only_active || c.is_active)
            .cloned()
            .collect()
    }

    /// Delivers `message` to every listed client record, active or not.
    /// Returns the number of inboxes written.
    pub fn notify(&self, ids: &[ObjectId], message: &str) -> usize {
        let mut clients = self.clients.write();
        let mut delivered = 0;
        for client in clients.iter_mut().filter(|c| ids.contains(&c.id())) {
            client.notify(message);
            delivered += 1;
        }
        delivered
    }

    pub fn notify_active(&self, message: &str) -> Vec<ObjectId> {
        let mut clients = self.clients.write();
        clients
            .iter_mut()
            .filter(|c| c.is_active)
            .map(|client| {
                client.notify(message);
                client.id()
            })
            .collect()
    }

    pub fn insert_instructor(&self, instructor: Instructor) {
        debug!("insert instructor {}", instructor.id());
        self.instructors.write().push(instructor);
    }

    pub fn get_instructor(&self, id: ObjectId) -> Option<Instructor> {
        self.instructors
            .read()
            .iter()
            .find(|i| i.id() == id)
            .cloned()
    }

    pub fn instructors(&self) -> Vec<Instructor> {
        self.instructors.read().clone()
    }

    pub fn set_secretary(&self, secretary: Secretary) -> Option<Secretary> {
        self.secretary.write().replace(secretary)
    }

    pub fn secretary(&self) -> Option<Secretary> {
        self.secretary.read().clone()
    }
}
