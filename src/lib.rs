pub mod auction;
pub mod cache;
pub mod database;
pub mod error;
pub mod image;
pub mod notify;
pub mod scheduler;
pub mod store;
pub mod user;
