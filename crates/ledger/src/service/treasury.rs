use std::sync::Arc;

use log::info;
use model::{
    decimal::Decimal,
    errors::LedgerError,
    treasury::{Event, TreasuryEvent},
    tx::Tx,
};
use storage::treasury::TreasuryStore;
use tx_macro::tx;

use super::{history::History, users::Users};

#[derive(Clone)]
pub struct Treasury {
    store: Arc<TreasuryStore>,
    users: Users,
    logs: History,
}

impl Treasury {
    pub(crate) fn new(store: Arc<TreasuryStore>, users: Users, logs: History) -> Self {
        Treasury { store, users, logs }
    }

    pub fn balance(&self) -> Decimal {
        self.store.balance()
    }

    /// Newest first.
    pub fn page(&self, limit: usize, offset: usize) -> Vec<TreasuryEvent> {
        self.store.list(limit, offset)
    }

    #[tx]
    pub fn deposit(
        &self,
        tx: &mut Tx,
        amount: Decimal,
        description: &str,
    ) -> Result<(), LedgerError> {
        let event = TreasuryEvent::income(
            tx.actor(),
            tx.now(),
            Event::Deposit {
                description: description.to_string(),
            },
            amount,
        );
        self.store.insert(event);
        self.logs.deposit(tx, amount, description);
        Ok(())
    }

    /// Pays one hour of wage to every instructor. The balance may go negative.
    #[tx]
    pub fn pay_salaries(&self, tx: &mut Tx) -> Result<Decimal, LedgerError> {
        let instructors = self.users.instructors();
        let total: Decimal = instructors.iter().map(|i| i.salary_per_hour).sum();
        let employees = instructors.iter().map(|i| i.id()).collect::<Vec<_>>();

        self.store.insert(TreasuryEvent::outcome(
            tx.actor(),
            tx.now(),
            Event::Salaries {
                employees: employees.clone(),
            },
            total,
        ));
        self.logs.pay_salaries(tx, employees, total);
        info!("paid {} in salaries, balance {}", total, self.store.balance());
        Ok(total)
    }
}
