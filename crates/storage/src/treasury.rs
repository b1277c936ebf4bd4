use model::{decimal::Decimal, treasury::TreasuryEvent};
use parking_lot::RwLock;

#[derive(Default)]
pub struct TreasuryStore {
    events: RwLock<Vec<TreasuryEvent>>,
}

impl TreasuryStore {
    pub(crate) fn new() -> Self {
        TreasuryStore::default()
    }

    pub fn insert(&self, event: TreasuryEvent) {
        self.events.write().push(event);
    }

    pub fn list(&self, limit: usize, offset: usize) -> Vec<TreasuryEvent> {
        self.events
            .read()
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn balance(&self) -> Decimal {
        self.events.read().iter().map(|e| e.delta()).sum()
    }
}
