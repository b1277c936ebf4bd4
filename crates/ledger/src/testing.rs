use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone as _};
use model::{
    config::Config,
    decimal::Decimal,
    session::{ForumType, Session, SessionType},
    tx::Tx,
    user::{client::Client, instructor::Instructor, Gender, Person},
};
use storage::Storage;

use crate::Ledger;

pub fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).single().unwrap()
}

pub fn ledger() -> Ledger {
    Ledger::new(Storage::new(), Config::default())
}

/// A person who turns `age` on the first of January of the test year.
pub fn person(name: &str, gender: Gender, age: i32, balance: i64) -> Person {
    let birthday = NaiveDate::from_ymd_opt(2025 - age, 1, 1).unwrap();
    Person::with_birthday(name, Decimal::int(balance), gender, birthday)
}

pub fn client(
    ledger: &Ledger,
    tx: &mut Tx,
    name: &str,
    gender: Gender,
    age: i32,
    balance: i64,
) -> Client {
    ledger
        .register_client(tx, person(name, gender, age, balance))
        .unwrap()
}

pub fn instructor(ledger: &Ledger, tx: &mut Tx, certifications: Vec<SessionType>) -> Instructor {
    ledger
        .hire_instructor(
            tx,
            person("Coach", Gender::Male, 35, 0),
            Decimal::int(50),
            certifications,
        )
        .unwrap()
}

pub fn tomorrow() -> DateTime<Local> {
    now() + Duration::days(1)
}

pub fn session(ledger: &Ledger, tx: &mut Tx, tp: SessionType, forum: ForumType) -> Session {
    let couch = instructor(ledger, tx, vec![tp]);
    ledger
        .schedule_session(tx, tp, tomorrow(), forum, couch.id())
        .unwrap()
}
