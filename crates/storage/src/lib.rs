pub mod calendar;
pub mod history;
pub mod session;
pub mod treasury;
pub mod user;

use std::sync::Arc;

use calendar::CalendarStore;
use history::HistoryStore;
use session::Db;
use treasury::TreasuryStore;
use user::UserStore;

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub users: Arc<UserStore>,
    pub calendar: Arc<CalendarStore>,
    pub history: Arc<HistoryStore>,
    pub treasury: Arc<TreasuryStore>,
}

impl Storage {
    pub fn new() -> Self {
        let db = Db::new();
        let history = HistoryStore::new(db.journal());
        Storage {
            users: Arc::new(UserStore::new()),
            calendar: Arc::new(CalendarStore::new()),
            history: Arc::new(history),
            treasury: Arc::new(TreasuryStore::new()),
            db,
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Storage::new()
    }
}
