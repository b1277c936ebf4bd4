pub mod calendar;
pub mod enrollment;
pub mod history;
pub mod notification;
pub mod treasury;
pub mod users;
