use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_CLIENT_AGE: u32 = 18;
pub const DEFAULT_SENIOR_AGE: u32 = 65;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub gym_name: String,
    /// Registration rejects anyone younger than this.
    pub min_client_age: u32,
    /// Minimal age admitted to `Seniors` sessions.
    pub senior_age: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gym_name: "Gym".to_string(),
            min_client_age: DEFAULT_MIN_CLIENT_AGE,
            senior_age: DEFAULT_SENIOR_AGE,
        }
    }
}
