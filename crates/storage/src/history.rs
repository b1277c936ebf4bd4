use bson::oid::ObjectId;
use model::history::{HistoryRow, Journal};

/// Read side of the committed journal. Rows are written through `Tx`.
pub struct HistoryStore {
    journal: Journal,
}

impl HistoryStore {
    pub(crate) fn new(journal: Journal) -> Self {
        HistoryStore { journal }
    }

    pub fn get_logs(&self, limit: usize, offset: usize) -> Vec<HistoryRow> {
        self.journal.find(|_| true, limit, offset)
    }

    pub fn get_actor_logs(&self, actor: ObjectId, limit: usize, offset: usize) -> Vec<HistoryRow> {
        self.journal.find(|row| row.involves(actor), limit, offset)
    }

    /// Oldest first.
    pub fn dump(&self) -> Vec<HistoryRow> {
        self.journal.rows()
    }
}
