pub mod notifications;
pub mod records;
pub mod state;
pub mod users;
