pub mod catalog;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod history;
pub mod session;
pub mod treasury;
pub mod tx;
pub mod user;
