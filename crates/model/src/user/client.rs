use std::fmt::{Display, Formatter};

use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

use super::{Gender, Person};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Client {
    pub person: Person,
    /// Cleared on unregistration. Sessions keep referring to the record.
    pub is_active: bool,
    #[serde(default)]
    notifications: Vec<String>,
}

impl Client {
    pub fn new(person: Person) -> Client {
        Client {
            person,
            is_active: true,
            notifications: vec![],
        }
    }

    pub fn id(&self) -> ObjectId {
        self.person.id
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub fn balance(&self) -> Decimal {
        self.person.balance
    }

    pub fn gender(&self) -> Gender {
        self.person.gender
    }

    pub fn age(&self, today: NaiveDate) -> u32 {
        self.person.age(today)
    }

    pub fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Gender: {} | Birthday: {} | Balance: {}",
            self.id(),
            self.name(),
            self.gender(),
            self.person.birthday.format(super::BIRTHDAY_FORMAT),
            self.balance()
        )
    }
}
