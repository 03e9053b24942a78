pub mod catalog;
pub mod health;
pub mod messages;
pub mod sessions;
