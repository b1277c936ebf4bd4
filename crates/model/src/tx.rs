use bson::oid::ObjectId;
use chrono::{DateTime, Local};
use log::debug;

use crate::history::{HistoryRow, Journal};

/// Context of a ledger operation: who acts, what time it is for the
/// business rules, and the history rows not yet committed.
pub struct Tx {
    actor: ObjectId,
    now: DateTime<Local>,
    journal: Journal,
    staged: Vec<HistoryRow>,
    marks: Vec<usize>,
}

impl Tx {
    pub fn new(journal: Journal, actor: ObjectId, now: DateTime<Local>) -> Self {
        Tx {
            actor,
            now,
            journal,
            staged: vec![],
            marks: vec![],
        }
    }

    pub fn actor(&self) -> ObjectId {
        self.actor
    }

    pub fn set_actor(&mut self, actor: ObjectId) {
        self.actor = actor;
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn in_transaction(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Rows written outside of a transaction are published immediately.
    pub fn stage(&mut self, row: HistoryRow) {
        if self.in_transaction() {
            self.staged.push(row);
        } else {
            self.journal.append([row]);
        }
    }

    pub fn start_transaction(&mut self) {
        self.marks.push(self.staged.len());
    }

    pub fn commit_transaction(&mut self) {
        if self.marks.pop().is_none() {
            return;
        }
        if self.marks.is_empty() && !self.staged.is_empty() {
            debug!("committing {} history rows", self.staged.len());
            self.journal.append(self.staged.drain(..));
        }
    }

    pub fn abort_transaction(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.staged.truncate(mark);
        }
    }
}

impl Drop for Tx {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            debug!("dropping {} uncommitted history rows", self.staged.len());
        }
    }
}
