use std::fmt::{Display, Formatter};

use bson::oid::ObjectId;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use crate::{
    catalog::SessionCatalog,
    decimal::Decimal,
    errors::LedgerError,
    user::{instructor::Instructor, Gender},
};

pub const START_AT_FORMAT: &str = "%d-%m-%Y %H:%M";

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    EnumIter,
    EnumString,
)]
pub enum SessionType {
    Pilates,
    MachinePilates,
    ThaiBoxing,
    Ninja,
}

/// Who may take part in a session.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, strum::Display, EnumString)]
pub enum ForumType {
    Male,
    Female,
    Seniors,
    All,
}

impl ForumType {
    pub fn admits(&self, gender: Gender, age: u32, senior_age: u32) -> bool {
        match self {
            ForumType::Male => gender == Gender::Male,
            ForumType::Female => gender == Gender::Female,
            ForumType::Seniors => age >= senior_age,
            ForumType::All => true,
        }
    }
}

/// A single scheduled class. Everything except the participant list is
/// fixed when the session is created.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Session {
    #[serde(rename = "_id")]
    id: ObjectId,
    tp: SessionType,
    start_at: DateTime<Utc>,
    forum: ForumType,
    instructor: ObjectId,
    participants: Vec<ObjectId>,
    capacity: u32,
    price: Decimal,
}

impl Session {
    pub fn create(
        tp: SessionType,
        start_at: DateTime<Local>,
        forum: ForumType,
        instructor: &Instructor,
        catalog: &SessionCatalog,
    ) -> Result<Session, LedgerError> {
        if !instructor.is_certified(tp) {
            return Err(LedgerError::NotQualified {
                instructor: instructor.id(),
                tp,
            });
        }
        let tier = catalog
            .lookup(tp)
            .ok_or(LedgerError::UnknownSessionType(tp))?;

        Ok(Session {
            id: ObjectId::new(),
            tp,
            start_at: start_at.with_timezone(&Utc),
            forum,
            instructor: instructor.id(),
            participants: Vec::new(),
            capacity: tier.capacity,
            price: tier.price,
        })
    }

    /// Returns `false` and leaves the session untouched if the client is
    /// already listed. Capacity is the caller's business.
    pub fn add_participant(&mut self, client: ObjectId) -> bool {
        if self.participants.contains(&client) {
            return false;
        }
        self.participants.push(client);
        true
    }

    pub fn is_in_future(&self, now: DateTime<Local>) -> bool {
        self.start_at > now.with_timezone(&Utc)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() as u32 >= self.capacity
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn tp(&self) -> SessionType {
        self.tp
    }

    pub fn start_at(&self) -> DateTime<Local> {
        self.start_at.with_timezone(&Local)
    }

    pub fn forum(&self) -> ForumType {
        self.forum
    }

    pub fn instructor(&self) -> ObjectId {
        self.instructor
    }

    pub fn participants(&self) -> &[ObjectId] {
        &self.participants
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session Type: {} | Date: {} | Forum: {} | Price: {} | Participants: {}/{}",
            self.tp,
            self.start_at().format(START_AT_FORMAT),
            self.forum,
            self.price,
            self.participants.len(),
            self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone as _};

    use super::*;
    use crate::{catalog::Tier, user::Person};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).single().unwrap()
    }

    fn instructor(certifications: Vec<SessionType>) -> Instructor {
        let person = Person::new("Gal", Decimal::zero(), Gender::Female, "20-06-1988").unwrap();
        Instructor::new(person, Decimal::int(50), certifications)
    }

    #[test]
    fn test_create_takes_tier_from_catalog() {
        let catalog = SessionCatalog::default();
        let couch = instructor(vec![SessionType::Ninja]);
        let session = Session::create(
            SessionType::Ninja,
            now() + Duration::days(1),
            ForumType::All,
            &couch,
            &catalog,
        )
        .unwrap();
        assert_eq!(5, session.capacity());
        assert_eq!(Decimal::int(150), session.price());
        assert_eq!(couch.id(), session.instructor());
        assert!(session.participants().is_empty());
    }

    #[test]
    fn test_create_requires_certification() {
        let catalog = SessionCatalog::default();
        let couch = instructor(vec![SessionType::Pilates]);
        let err = Session::create(
            SessionType::ThaiBoxing,
            now(),
            ForumType::All,
            &couch,
            &catalog,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NotQualified { tp: SessionType::ThaiBoxing, .. }
        ));
    }

    #[test]
    fn test_create_with_missing_tier() {
        let catalog = SessionCatalog::new([(
            SessionType::Pilates,
            Tier::new(30, Decimal::int(60)),
        )]);
        let couch = instructor(vec![SessionType::Ninja]);
        let err = Session::create(SessionType::Ninja, now(), ForumType::All, &couch, &catalog)
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::UnknownSessionType(SessionType::Ninja)
        ));
    }

    #[test]
    fn test_add_participant_rejects_duplicates() {
        let catalog = SessionCatalog::default();
        let couch = instructor(vec![SessionType::Pilates]);
        let mut session =
            Session::create(SessionType::Pilates, now(), ForumType::All, &couch, &catalog).unwrap();
        let first = ObjectId::new();
        let second = ObjectId::new();
        assert!(session.add_participant(first));
        assert!(session.add_participant(second));
        assert!(!session.add_participant(first));
        assert_eq!(&[first, second], session.participants());
    }

    #[test]
    fn test_is_in_future_is_strict() {
        let catalog = SessionCatalog::default();
        let couch = instructor(vec![SessionType::Pilates]);
        let session =
            Session::create(SessionType::Pilates, now(), ForumType::All, &couch, &catalog).unwrap();
        assert!(!session.is_in_future(now()));
        assert!(session.is_in_future(now() - Duration::minutes(1)));
        assert!(!session.is_in_future(now() + Duration::minutes(1)));
    }

    #[test]
    fn test_forum_admission() {
        assert!(ForumType::Male.admits(Gender::Male, 30, 65));
        assert!(!ForumType::Male.admits(Gender::Female, 30, 65));
        assert!(ForumType::Female.admits(Gender::Female, 30, 65));
        assert!(!ForumType::Female.admits(Gender::Male, 30, 65));
        assert!(ForumType::Seniors.admits(Gender::Male, 65, 65));
        assert!(!ForumType::Seniors.admits(Gender::Female, 64, 65));
        assert!(ForumType::All.admits(Gender::Female, 18, 65));
    }

    #[test]
    fn test_session_type_from_str() {
        assert_eq!(
            SessionType::MachinePilates,
            "MachinePilates".parse::<SessionType>().unwrap()
        );
        assert!("Zumba".parse::<SessionType>().is_err());
    }
}
