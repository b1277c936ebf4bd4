use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{decimal::Decimal, session::SessionType};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub capacity: u32,
    pub price: Decimal,
}

impl Tier {
    pub const fn new(capacity: u32, price: Decimal) -> Self {
        Tier { capacity, price }
    }
}

/// Capacity and price per session type. Fixed once built.
#[derive(Debug, Clone)]
pub struct SessionCatalog {
    tiers: HashMap<SessionType, Tier>,
}

impl SessionCatalog {
    pub fn new(tiers: impl IntoIterator<Item = (SessionType, Tier)>) -> Self {
        SessionCatalog {
            tiers: tiers.into_iter().collect(),
        }
    }

    pub fn lookup(&self, tp: SessionType) -> Option<Tier> {
        self.tiers.get(&tp).copied()
    }
}

impl Default for SessionCatalog {
    fn default() -> Self {
        SessionCatalog::new([
            (SessionType::Pilates, Tier::new(30, Decimal::int(60))),
            (SessionType::MachinePilates, Tier::new(10, Decimal::int(80))),
            (SessionType::ThaiBoxing, Tier::new(20, Decimal::int(100))),
            (SessionType::Ninja, Tier::new(5, Decimal::int(150))),
        ])
    }
}
