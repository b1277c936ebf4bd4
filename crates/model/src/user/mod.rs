use std::fmt::{Display, Formatter};

use bson::oid::ObjectId;
use chrono::{Datelike as _, NaiveDate};
use eyre::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

pub mod client;
pub mod instructor;
pub mod secretary;

pub const BIRTHDAY_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// A human known to the gym. The id is assigned once and identifies the
/// person across every role it later takes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub balance: Decimal,
    pub gender: Gender,
    pub birthday: NaiveDate,
}

impl Person {
    /// Builds a person from a `dd-MM-yyyy` birth date.
    pub fn new(name: &str, balance: Decimal, gender: Gender, birthday: &str) -> Result<Person> {
        let birthday = parse_birthday(birthday)?;
        Ok(Person::with_birthday(name, balance, gender, birthday))
    }

    pub fn with_birthday(
        name: &str,
        balance: Decimal,
        gender: Gender,
        birthday: NaiveDate,
    ) -> Person {
        Person {
            id: ObjectId::new(),
            name: name.to_string(),
            balance,
            gender,
            birthday,
        }
    }

    /// Full years lived as of `today`.
    pub fn age(&self, today: NaiveDate) -> u32 {
        full_years(self.birthday, today)
    }
}

pub fn parse_birthday(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BIRTHDAY_FORMAT)
        .with_context(|| format!("Invalid birth date '{}', expected dd-MM-yyyy", value))
}

fn full_years(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_birthday() {
        assert_eq!(date(5, 3, 1990), parse_birthday("05-03-1990").unwrap());
        assert!(parse_birthday("1990-03-05").is_err());
        assert!(parse_birthday("31-02-1990").is_err());
    }

    #[test]
    fn test_age_turns_on_birthday() {
        let person = Person::new("Nofar", Decimal::int(10), Gender::Female, "15-01-2007").unwrap();
        assert_eq!(17, person.age(date(14, 1, 2025)));
        assert_eq!(18, person.age(date(15, 1, 2025)));
        assert_eq!(18, person.age(date(14, 1, 2026)));
    }

    #[test]
    fn test_age_of_unborn_is_zero() {
        assert_eq!(0, full_years(date(1, 1, 2030), date(1, 1, 2025)));
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(0, full_years(date(29, 2, 2024), date(28, 2, 2025)));
        assert_eq!(1, full_years(date(29, 2, 2024), date(1, 3, 2025)));
    }

    #[test]
    fn test_every_person_gets_own_id() {
        let a = Person::new("Dana", Decimal::zero(), Gender::Female, "01-01-1990").unwrap();
        let b = Person::new("Dana", Decimal::zero(), Gender::Female, "01-01-1990").unwrap();
        assert_ne!(a.id, b.id);
    }
}
