use bson::oid::ObjectId;
use chrono::{DateTime, Local};
use model::{history::Journal, tx::Tx};

/// Handle to the in-memory database. Every transaction started here commits
/// its history into the same journal.
#[derive(Clone, Default)]
pub struct Db {
    journal: Journal,
}

impl Db {
    pub(crate) fn new() -> Self {
        Db::default()
    }

    pub fn start_session(&self, actor: ObjectId, now: DateTime<Local>) -> Tx {
        Tx::new(self.journal.clone(), actor, now)
    }

    pub(crate) fn journal(&self) -> Journal {
        self.journal.clone()
    }
}
