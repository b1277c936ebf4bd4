use std::{env::var, str::FromStr, sync::Arc};

use dotenv::dotenv;
use eyre::{eyre, Context, Error};
use log::info;
use model::{
    config::{Config, DEFAULT_MIN_CLIENT_AGE, DEFAULT_SENIOR_AGE},
    decimal::Decimal,
};

#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone)]
pub struct EnvInner {
    rust_log: String,
    gym_name: String,
    gym_balance: Decimal,
    min_client_age: u32,
    senior_age: u32,
}

impl Env {
    pub fn rust_log(&self) -> &str {
        &self.0.rust_log
    }

    pub fn gym_name(&self) -> &str {
        &self.0.gym_name
    }

    pub fn gym_balance(&self) -> Decimal {
        self.0.gym_balance
    }

    pub fn min_client_age(&self) -> u32 {
        self.0.min_client_age
    }

    pub fn senior_age(&self) -> u32 {
        self.0.senior_age
    }

    pub fn config(&self) -> Config {
        Config {
            gym_name: self.0.gym_name.clone(),
            min_client_age: self.0.min_client_age,
            senior_age: self.0.senior_age,
        }
    }

    pub fn load() -> Result<Env, Error> {
        if let Err(err) = dotenv() {
            info!("Failed to load .env file: {}", err);
        }

        Ok(Env(Arc::new(EnvInner {
            rust_log: var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gym_name: var("GYM_NAME").unwrap_or_else(|_| "Gym".to_string()),
            gym_balance: parse_or("GYM_BALANCE", Decimal::zero())?,
            min_client_age: parse_or("MIN_CLIENT_AGE", DEFAULT_MIN_CLIENT_AGE)?,
            senior_age: parse_or("SENIOR_AGE", DEFAULT_SENIOR_AGE)?,
        })))
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|err| eyre!("{}", err))
            .with_context(|| format!("{} has invalid value '{}'", key, value)),
        Err(_) => Ok(default),
    }
}
