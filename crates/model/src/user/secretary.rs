use std::fmt::{Display, Formatter};

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

use super::Person;

/// The employee who performs administrative actions on behalf of the gym.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Secretary {
    pub person: Person,
    pub salary: Decimal,
}

impl Secretary {
    pub fn new(person: Person, salary: Decimal) -> Self {
        Secretary { person, salary }
    }

    pub fn id(&self) -> ObjectId {
        self.person.id
    }
}

impl Display for Secretary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Role: Secretary | Salary per Month: {}",
            self.id(),
            self.person.name,
            self.salary
        )
    }
}
