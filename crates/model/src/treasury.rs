use bson::oid::ObjectId;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TreasuryEvent {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub date_time: DateTime<Utc>,
    pub event: Event,
    /// Money coming into the gym.
    pub debit: Decimal,
    /// Money leaving the gym.
    pub credit: Decimal,
    pub actor: ObjectId,
}

impl TreasuryEvent {
    pub fn income(actor: ObjectId, date_time: DateTime<Local>, event: Event, amount: Decimal) -> Self {
        TreasuryEvent {
            id: ObjectId::new(),
            date_time: date_time.with_timezone(&Utc),
            event,
            debit: amount,
            credit: Decimal::zero(),
            actor,
        }
    }

    pub fn outcome(
        actor: ObjectId,
        date_time: DateTime<Local>,
        event: Event,
        amount: Decimal,
    ) -> Self {
        TreasuryEvent {
            id: ObjectId::new(),
            date_time: date_time.with_timezone(&Utc),
            event,
            debit: Decimal::zero(),
            credit: amount,
            actor,
        }
    }

    pub fn delta(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Event {
    Deposit { description: String },
    Salaries { employees: Vec<ObjectId> },
}
