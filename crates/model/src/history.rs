use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};

use bson::oid::ObjectId;
use chrono::{DateTime, Local, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    decimal::Decimal,
    session::{SessionType, START_AT_FORMAT},
};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryRow {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub actor: ObjectId,
    pub sub_actors: Vec<ObjectId>,
    pub date_time: DateTime<Utc>,
    pub action: Action,
}

impl HistoryRow {
    pub fn new(actor: ObjectId, date_time: DateTime<Local>, action: Action) -> Self {
        HistoryRow::with_sub_actors(actor, vec![], date_time, action)
    }

    pub fn with_sub_actors(
        actor: ObjectId,
        sub_actors: Vec<ObjectId>,
        date_time: DateTime<Local>,
        action: Action,
    ) -> Self {
        HistoryRow {
            id: ObjectId::new(),
            actor,
            sub_actors,
            date_time: date_time.with_timezone(&Utc),
            action,
        }
    }

    pub fn involves(&self, user: ObjectId) -> bool {
        self.actor == user || self.sub_actors.contains(&user)
    }
}

impl Display for HistoryRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.action, f)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Action {
    AppointSecretary {
        name: String,
        salary: Decimal,
    },
    RegisterClient {
        name: String,
    },
    UnregisterClient {
        name: String,
    },
    HireInstructor {
        name: String,
        salary_per_hour: Decimal,
    },
    ScheduleSession {
        tp: SessionType,
        start_at: DateTime<Local>,
        instructor: String,
    },
    Enroll {
        name: String,
        tp: SessionType,
        start_at: DateTime<Local>,
    },
    NotifyAll {
        message: String,
    },
    NotifyAllDated {
        date: String,
        message: String,
    },
    NotifySession {
        tp: SessionType,
        start_at: DateTime<Local>,
        message: String,
    },
    Deposit {
        amount: Decimal,
        description: String,
    },
    PaySalaries {
        total: Decimal,
    },
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::AppointSecretary { name, salary } => write!(
                f,
                "A new secretary has started working at the gym: {} with salary: {}",
                name, salary
            ),
            Action::RegisterClient { name } => write!(f, "Registered new client: {}", name),
            Action::UnregisterClient { name } => write!(f, "Unregistered client: {}", name),
            Action::HireInstructor {
                name,
                salary_per_hour,
            } => write!(
                f,
                "Hired new instructor: {} with salary per hour: {}",
                name, salary_per_hour
            ),
            Action::ScheduleSession {
                tp,
                start_at,
                instructor,
            } => write!(
                f,
                "Created new session: {} on {} with instructor: {}",
                tp,
                start_at.format(START_AT_FORMAT),
                instructor
            ),
            Action::Enroll { name, tp, start_at } => write!(
                f,
                "Registered client: {} to session: {} on {}",
                name,
                tp,
                start_at.format(START_AT_FORMAT)
            ),
            Action::NotifyAll { message } => {
                write!(f, "A message was sent to all gym clients: {}", message)
            }
            Action::NotifyAllDated { date, message } => {
                write!(f, "Notified all clients with date: [{}] {}", date, message)
            }
            Action::NotifySession {
                tp,
                start_at,
                message,
            } => write!(
                f,
                "A message was sent to everyone registered for session {} on {} : {}",
                tp,
                start_at.format(START_AT_FORMAT),
                message
            ),
            Action::Deposit {
                amount,
                description,
            } => write!(f, "Deposit of {}: {}", amount, description),
            Action::PaySalaries { total } => {
                write!(f, "Salaries have been paid to all employees: {}", total)
            }
        }
    }
}

/// Append-only sink of committed history rows, shared by every transaction
/// opened on the same storage.
#[derive(Clone, Default)]
pub struct Journal(Arc<RwLock<Vec<HistoryRow>>>);

impl Journal {
    pub fn append(&self, rows: impl IntoIterator<Item = HistoryRow>) {
        self.0.write().extend(rows);
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn rows(&self) -> Vec<HistoryRow> {
        self.0.read().clone()
    }

    /// Newest first, skipping `offset` matches.
    pub fn find<F>(&self, filter: F, limit: usize, offset: usize) -> Vec<HistoryRow>
    where
        F: Fn(&HistoryRow) -> bool,
    {
        self.0
            .read()
            .iter()
            .rev()
            .filter(|row| filter(row))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}
