use std::fmt::{Display, Formatter};

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{decimal::Decimal, session::SessionType};

use super::Person;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Instructor {
    pub person: Person,
    pub salary_per_hour: Decimal,
    certifications: Vec<SessionType>,
}

impl Instructor {
    pub fn new(person: Person, salary_per_hour: Decimal, certifications: Vec<SessionType>) -> Self {
        let mut certified = Vec::with_capacity(certifications.len());
        for tp in certifications {
            if !certified.contains(&tp) {
                certified.push(tp);
            }
        }
        Instructor {
            person,
            salary_per_hour,
            certifications: certified,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.person.id
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub fn certifications(&self) -> &[SessionType] {
        &self.certifications
    }

    pub fn is_certified(&self, tp: SessionType) -> bool {
        self.certifications.contains(&tp)
    }
}

impl Display for Instructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let certified = self
            .certifications
            .iter()
            .map(|tp| tp.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "ID: {} | Name: {} | Role: Instructor | Salary per Hour: {} | Certified Classes: {}",
            self.id(),
            self.name(),
            self.salary_per_hour,
            certified
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Gender;

    #[test]
    fn test_certifications_are_a_set() {
        let person = Person::new("Elis", Decimal::int(0), Gender::Male, "10-10-1985").unwrap();
        let instructor = Instructor::new(
            person,
            Decimal::int(70),
            vec![SessionType::Ninja, SessionType::Pilates, SessionType::Ninja],
        );
        assert_eq!(
            &[SessionType::Ninja, SessionType::Pilates],
            instructor.certifications()
        );
        assert!(instructor.is_certified(SessionType::Pilates));
        assert!(!instructor.is_certified(SessionType::ThaiBoxing));
    }
}
