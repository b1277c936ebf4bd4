use bson::oid::ObjectId;
use thiserror::Error;

use crate::{
    decimal::Decimal,
    session::{ForumType, SessionType},
};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Client must be at least {min} years old to register, got {age}")]
    InvalidAge { person: ObjectId, age: u32, min: u32 },
    #[error("The client is already registered: {0}")]
    DuplicateClient(ObjectId),
    #[error("Client is not registered: {0}")]
    ClientNotRegistered(ObjectId),
    #[error("Instructor {instructor} is not qualified to conduct {tp}")]
    NotQualified {
        instructor: ObjectId,
        tp: SessionType,
    },
    #[error("Unknown session type: {0}")]
    UnknownSessionType(SessionType),
    #[error("Instructor not found: {0}")]
    InstructorNotFound(ObjectId),
    #[error("Session not found: {0}")]
    SessionNotFound(ObjectId),
    #[error("Session is not in the future: {session}")]
    SessionNotUpcoming { session: ObjectId },
    #[error("No available spots for session {session} (capacity {capacity})")]
    SessionFull { session: ObjectId, capacity: u32 },
    #[error("Client {client} doesn't have enough balance: {balance} < {price}")]
    InsufficientBalance {
        client: ObjectId,
        balance: Decimal,
        price: Decimal,
    },
    #[error("Client {client} doesn't meet the {forum} forum requirements")]
    ForumMismatch { client: ObjectId, forum: ForumType },
    #[error("Client {client} is already enrolled in session {session}")]
    DuplicateEnrollment { client: ObjectId, session: ObjectId },
}
